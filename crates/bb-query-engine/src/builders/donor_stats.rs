//! Donor counts and average age by group, gender and region.

use bb_protocol::{EntityBag, QueryResult, ResultType};

use super::{Description, Statement};

const BASE: &str = "SELECT
    bg.group_name AS blood_group,
    d.gender,
    COUNT(*) AS donor_count,
    AVG(d.age)::float8 AS avg_age,
    dt.district_name,
    st.state_name
FROM donors d
JOIN blood_groups bg ON d.blood_group_id = bg.id
JOIN districts dt ON d.district_id = dt.district_id
JOIN states st ON d.state_id = st.state_id";

const TAIL: &str = "
GROUP BY bg.group_name, d.gender, dt.district_name, st.state_name
ORDER BY donor_count DESC";

pub fn build(entities: &EntityBag) -> QueryResult {
    let mut stmt = Statement::new(BASE, false);

    if let Some(group) = entities.blood_group {
        stmt.blood_group("bg.group_name", group);
    }
    if let Some(location) = entities.location {
        stmt.location(&["dt.district_name", "st.state_name"], location);
    }

    let description = Description::new("Donor statistics")
        .blood_group(entities.blood_group)
        .location(entities.location)
        .build();

    stmt.finish(TAIL, description, ResultType::DonorStats)
}
