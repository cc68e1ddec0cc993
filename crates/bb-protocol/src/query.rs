use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic category of a generated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    BloodAvailability,
    CenterInfo,
    CampInfo,
    DonorStats,
    AppointmentInfo,
    General,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BloodAvailability => "blood_availability",
            Self::CenterInfo => "center_info",
            Self::CampInfo => "camp_info",
            Self::DonorStats => "donor_stats",
            Self::AppointmentInfo => "appointment_info",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameterized SQL statement ready for an executor.
///
/// `sql` carries `:name` placeholders only; every value a user can influence
/// travels through `params`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub sql: String,
    pub params: BTreeMap<String, String>,
    pub description: String,
    pub result_type: ResultType,
}

impl QueryResult {
    /// Bound value for a placeholder, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
