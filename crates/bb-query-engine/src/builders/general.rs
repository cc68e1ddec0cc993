//! Fallback for questions no intent pattern matched.

use std::collections::BTreeMap;

use bb_protocol::{EntityBag, QueryResult, ResultType};

use super::{blood_availability, center_info};

const TOTALS: &str = "SELECT
    'Total Blood Units' AS metric,
    SUM(bi.units_available) AS value,
    'units' AS unit
FROM blood_inventory bi
WHERE bi.units_available > 0";

/// A blood group routes to availability, a location to centres, anything
/// else gets inventory-wide totals.
pub fn build(entities: &EntityBag) -> QueryResult {
    if entities.blood_group.is_some() {
        return blood_availability::build(entities);
    }
    if entities.location.is_some() {
        return center_info::build(entities);
    }

    QueryResult {
        sql: TOTALS.to_string(),
        params: BTreeMap::new(),
        description: "General blood bank statistics".to_string(),
        result_type: ResultType::General,
    }
}
