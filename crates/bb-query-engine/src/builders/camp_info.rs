//! Donation camps with organizer contact and resolved location.

use bb_protocol::{EntityBag, QueryResult, ResultType};

use super::{Description, Statement};

// Inner joins throughout: a camp without a resolved organizer, centre,
// district or state is excluded.
const BASE: &str = "SELECT
    ca.camp_name,
    ca.location,
    ca.camp_date,
    ca.camp_time,
    ca.status,
    co.organization_name,
    co.contact_person,
    co.phone,
    c.centre_name,
    d.district_name,
    s.state_name
FROM camps ca
JOIN camp_organizers co ON ca.organizer_id = co.organizer_id
JOIN centres c ON ca.centre_id = c.centre_id
JOIN districts d ON ca.district_id = d.district_id
JOIN states s ON ca.state_id = s.state_id";

const TAIL: &str = "
ORDER BY ca.camp_date ASC";

pub fn build(entities: &EntityBag) -> QueryResult {
    let mut stmt = Statement::new(BASE, false);

    if let Some(location) = entities.location {
        stmt.location(&["d.district_name", "ca.location", "s.state_name"], location);
    }
    if let Some(period) = entities.time_period {
        stmt.period("ca.camp_date", period.kind);
    }

    let description = Description::new("Blood donation camps")
        .location(entities.location)
        .parenthetical(entities.time_period.map(|p| p.kind.phrase()))
        .build();

    stmt.finish(TAIL, description, ResultType::CampInfo)
}
