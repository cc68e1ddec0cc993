//! Appointment counts per slot and centre.

use bb_protocol::{EntityBag, QueryResult, ResultType};

use super::{Description, Statement};

const BASE: &str = "SELECT
    a.appointment_date,
    a.appointment_time,
    a.status,
    COUNT(*) AS appointment_count,
    c.centre_name,
    d.district_name
FROM appointments a
JOIN centres c ON a.centre_id = c.centre_code
JOIN districts d ON a.district_id = d.district_id";

const TAIL: &str = "
GROUP BY a.appointment_date, a.appointment_time, a.status, c.centre_name, d.district_name
ORDER BY a.appointment_date, a.appointment_time";

pub fn build(entities: &EntityBag) -> QueryResult {
    let mut stmt = Statement::new(BASE, false);

    if let Some(location) = entities.location {
        stmt.location(&["d.district_name", "c.centre_name"], location);
    }
    if let Some(period) = entities.time_period {
        stmt.period("a.appointment_date", period.kind);
    }

    let description = Description::new("Appointment information")
        .location(entities.location)
        .parenthetical(entities.time_period.map(|p| p.kind.phrase()))
        .build();

    stmt.finish(TAIL, description, ResultType::AppointmentInfo)
}
