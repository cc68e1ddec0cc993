//! Mock executor for development and tests. Serves canned rows per result
//! type and, when recording, keeps every query it is handed.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use bb_protocol::{QueryResult, ResultType};

use super::executor::{ExecError, QueryExecutor, bind_named};

/// In-memory stand-in for `PgExecutor`.
///
/// Validates placeholder binding the same way the real executor does, so a
/// query with an unbound placeholder fails here too. Queries are only kept
/// after [`MockExecutor::recording`].
pub struct MockExecutor {
    rows: HashMap<ResultType, Vec<Value>>,
    failure: Option<String>,
    record: bool,
    executed: Mutex<Vec<QueryResult>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            failure: None,
            record: false,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Set the rows returned for a result type.
    pub fn set_rows(&mut self, result_type: ResultType, rows: Vec<Value>) {
        self.rows.insert(result_type, rows);
    }

    /// Executor that fails every call with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Keep every executed query for later inspection.
    pub fn recording(mut self) -> Self {
        self.record = true;
        self
    }

    /// Queries received so far, oldest first. Empty unless recording.
    pub fn executed(&self) -> Vec<QueryResult> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Executor with a small, plausible data set for every result type.
    pub fn with_sample_data() -> Self {
        let mut m = Self::new();
        m.set_rows(
            ResultType::BloodAvailability,
            vec![
                json!({
                    "blood_group": "O+",
                    "component": "whole blood",
                    "total_units": 42,
                    "centre_name": "Government General Hospital Blood Bank",
                    "district_name": "Chennai",
                    "state_name": "Tamil Nadu",
                    "last_updated": "2025-06-01T09:30:00Z"
                }),
                json!({
                    "blood_group": "O+",
                    "component": "plasma",
                    "total_units": 17,
                    "centre_name": "Rotary TTK Blood Bank",
                    "district_name": "Bangalore Urban",
                    "state_name": "Karnataka",
                    "last_updated": "2025-06-01T08:00:00Z"
                }),
            ],
        );
        m.set_rows(
            ResultType::CenterInfo,
            vec![
                json!({
                    "centre_name": "Rotary TTK Blood Bank",
                    "centre_code": "KA-BLR-004",
                    "address": "Indiranagar, Bangalore",
                    "district_name": "Bangalore Urban",
                    "state_name": "Karnataka",
                    "blood_types_available": 7,
                    "total_units": 310
                }),
                json!({
                    "centre_name": "Victoria Hospital Blood Centre",
                    "centre_code": "KA-BLR-011",
                    "address": "Fort Road, Bangalore",
                    "district_name": "Bangalore Urban",
                    "state_name": "Karnataka",
                    "blood_types_available": 0,
                    "total_units": null
                }),
            ],
        );
        m.set_rows(
            ResultType::CampInfo,
            vec![json!({
                "camp_name": "Monsoon Donation Drive",
                "location": "Andheri Sports Complex",
                "camp_date": "2025-07-12",
                "camp_time": "09:00:00",
                "status": "scheduled",
                "organization_name": "Red Cross Mumbai",
                "contact_person": "A. Kulkarni",
                "phone": "022-5550-1122",
                "centre_name": "KEM Hospital Blood Bank",
                "district_name": "Mumbai Suburban",
                "state_name": "Maharashtra"
            })],
        );
        m.set_rows(
            ResultType::DonorStats,
            vec![
                json!({
                    "blood_group": "B+",
                    "gender": "male",
                    "donor_count": 128,
                    "avg_age": 31.4,
                    "district_name": "New Delhi",
                    "state_name": "Delhi"
                }),
                json!({
                    "blood_group": "B+",
                    "gender": "female",
                    "donor_count": 96,
                    "avg_age": 28.9,
                    "district_name": "New Delhi",
                    "state_name": "Delhi"
                }),
            ],
        );
        m.set_rows(
            ResultType::AppointmentInfo,
            vec![json!({
                "appointment_date": "2025-06-18",
                "appointment_time": "10:30:00",
                "status": "booked",
                "appointment_count": 5,
                "centre_name": "AIIMS Blood Bank",
                "district_name": "New Delhi"
            })],
        );
        m.set_rows(
            ResultType::General,
            vec![json!({
                "metric": "Total Blood Units",
                "value": 5230,
                "unit": "units"
            })],
        );
        m
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn execute(&self, query: &QueryResult) -> Result<Vec<Value>, ExecError> {
        if self.record {
            self.executed
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(query.clone());
        }

        if let Some(message) = &self.failure {
            return Err(ExecError::Other(message.clone()));
        }
        bind_named(&query.sql, &query.params)?;

        Ok(self
            .rows
            .get(&query.result_type)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
