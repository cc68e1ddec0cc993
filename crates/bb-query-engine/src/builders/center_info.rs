//! Donation centres with their current stock summary.

use bb_protocol::{EntityBag, QueryResult, ResultType};

use super::{Description, Statement};

// LEFT JOIN keeps centres that currently hold no stock.
const BASE: &str = "SELECT
    c.centre_name,
    c.centre_code,
    c.address,
    d.district_name,
    s.state_name,
    COUNT(DISTINCT bi.blood_group_id) AS blood_types_available,
    SUM(bi.units_available) AS total_units
FROM centres c
JOIN districts d ON c.district_id = d.district_id
JOIN states s ON d.state_id = s.state_id
LEFT JOIN blood_inventory bi ON c.centre_code = bi.centre_id AND bi.units_available > 0";

const TAIL: &str = "
GROUP BY c.centre_name, c.centre_code, c.address, d.district_name, s.state_name
ORDER BY total_units DESC NULLS LAST";

pub fn build(entities: &EntityBag) -> QueryResult {
    let mut stmt = Statement::new(BASE, false);

    if let Some(location) = entities.location {
        stmt.location(
            &["d.district_name", "c.centre_name", "s.state_name"],
            location,
        );
    }

    let description = Description::new("Blood centers/centres")
        .location(entities.location)
        .build();

    stmt.finish(TAIL, description, ResultType::CenterInfo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_protocol::{BloodGroup, Location};

    #[test]
    fn all_centres_without_location() {
        let result = build(&EntityBag::default());
        assert!(!result.sql.contains("WHERE"));
        assert!(result.sql.contains("LEFT JOIN blood_inventory bi"));
        assert!(result.sql.ends_with("ORDER BY total_units DESC NULLS LAST"));
        assert_eq!(result.description, "Blood centers/centres");
    }

    #[test]
    fn location_over_district_centre_and_state() {
        let result = build(&EntityBag {
            location: Some(Location::Bangalore),
            ..Default::default()
        });
        assert!(result.sql.contains(
            "WHERE (LOWER(d.district_name) LIKE :location OR LOWER(c.centre_name) LIKE :location OR LOWER(s.state_name) LIKE :location)"
        ));
        assert_eq!(result.param("location"), Some("%bangalore%"));
        assert_eq!(result.description, "Blood centers/centres in Bangalore");
        assert_eq!(result.result_type, ResultType::CenterInfo);
    }

    #[test]
    fn blood_group_is_ignored() {
        let result = build(&EntityBag {
            blood_group: Some(BloodGroup::BNegative),
            ..Default::default()
        });
        assert!(result.params.is_empty());
        assert_eq!(result.description, "Blood centers/centres");
    }
}
