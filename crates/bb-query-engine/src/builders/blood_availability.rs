//! Blood stock by group, component and centre.

use bb_protocol::{EntityBag, QueryResult, ResultType};

use super::{COMPONENT, Description, Statement, like_pattern};

const BASE: &str = "SELECT
    bg.group_name AS blood_group,
    bi.component,
    SUM(bi.units_available) AS total_units,
    c.centre_name,
    d.district_name,
    s.state_name,
    bi.last_updated
FROM blood_inventory bi
JOIN blood_groups bg ON bi.blood_group_id = bg.id
JOIN centres c ON bi.centre_id = c.centre_code
JOIN districts d ON c.district_id = d.district_id
JOIN states s ON d.state_id = s.state_id
WHERE bi.units_available > 0";

const TAIL: &str = "
GROUP BY bg.group_name, bi.component, c.centre_name, d.district_name, s.state_name, bi.last_updated
ORDER BY total_units DESC";

pub fn build(entities: &EntityBag) -> QueryResult {
    let mut stmt = Statement::new(BASE, true);

    if let Some(group) = entities.blood_group {
        stmt.blood_group("bg.group_name", group);
    }
    if let Some(location) = entities.location {
        stmt.location(&["d.district_name", "c.centre_name"], location);
    }
    if let Some(component) = entities.component {
        stmt.filter(format!("LOWER(bi.component::text) LIKE :{COMPONENT}"))
            .bind(COMPONENT, like_pattern(component.as_str()));
    }

    let description = Description::new("Blood availability")
        .blood_group(entities.blood_group)
        .location(entities.location)
        .parenthetical(entities.component.map(|c| c.as_str()))
        .build();

    stmt.finish(TAIL, description, ResultType::BloodAvailability)
}
