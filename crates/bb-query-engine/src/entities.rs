//! Entity extraction: blood group, location, component and time period.
//!
//! Each slot is scanned independently against its synonym table; the first
//! variant found as a substring sets the slot. Extraction never fails, a slot
//! with no match is simply left empty.

use chrono::{Datelike, Local, NaiveDate};

use bb_protocol::{EntityBag, TimePeriod, TimePeriodKind};

use crate::synonyms::{self, BLOOD_GROUPS, COMPONENTS, GENERIC_BLOOD, LOCATIONS};

/// Time phrases checked in this order; the first one present decides.
const TIME_PHRASES: [(&str, TimePeriodKind); 4] = [
    ("today", TimePeriodKind::Today),
    ("this week", TimePeriodKind::ThisWeek),
    ("this month", TimePeriodKind::ThisMonth),
    ("upcoming", TimePeriodKind::Upcoming),
];

/// Extract entities from normalized text, anchoring time periods to the
/// local calendar date.
pub fn extract(normalized: &str) -> EntityBag {
    extract_on(normalized, Local::now().date_naive())
}

/// Extract entities with an explicit "today" for time-period anchors.
pub fn extract_on(normalized: &str, today: NaiveDate) -> EntityBag {
    EntityBag {
        blood_group: synonyms::first_match(normalized, BLOOD_GROUPS, |_| false),
        location: synonyms::first_match(normalized, LOCATIONS, |_| false),
        component: synonyms::first_match(normalized, COMPONENTS, |v| v == GENERIC_BLOOD),
        time_period: parse_time_period(normalized, today),
    }
}

fn parse_time_period(text: &str, today: NaiveDate) -> Option<TimePeriod> {
    let (_, kind) = TIME_PHRASES
        .iter()
        .find(|(phrase, _)| text.contains(phrase))?;

    let anchor_date = match kind {
        // Start of the month; "this week" deliberately stays on today.
        TimePeriodKind::ThisMonth => today.with_day(1).unwrap_or(today),
        TimePeriodKind::Today | TimePeriodKind::ThisWeek | TimePeriodKind::Upcoming => today,
    };

    Some(TimePeriod {
        kind: *kind,
        anchor_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_protocol::{BloodGroup, Component, Location};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bag(text: &str) -> EntityBag {
        extract_on(text, day(2025, 6, 18))
    }

    // ── Blood group ─────────────────────────────────────────────

    #[test]
    fn every_blood_group_variant_resolves_to_its_group() {
        for (group, variants) in BLOOD_GROUPS {
            for variant in *variants {
                let text = format!("... {variant} ...");
                assert_eq!(bag(&text).blood_group, Some(*group), "variant {variant:?}");
            }
        }
    }

    #[test]
    fn ab_positive_is_not_read_as_b_positive() {
        assert_eq!(
            bag("how many ab+ bloods are available in chennai?").blood_group,
            Some(BloodGroup::AbPositive)
        );
    }

    #[test]
    fn no_blood_group() {
        assert_eq!(bag("how many donors do we have?").blood_group, None);
    }

    // ── Location ────────────────────────────────────────────────

    #[test]
    fn every_location_variant_resolves() {
        for (location, variants) in LOCATIONS {
            for variant in *variants {
                let text = format!("centres near {variant} please");
                assert_eq!(bag(&text).location, Some(*location), "variant {variant:?}");
            }
        }
    }

    #[test]
    fn first_location_in_table_wins() {
        assert_eq!(
            bag("camps in mumbai and chennai").location,
            Some(Location::Chennai)
        );
    }

    // ── Component ───────────────────────────────────────────────

    #[test]
    fn generic_blood_never_sets_component() {
        for text in [
            "blood",
            "how many o+ bloods are available?",
            "show me blood centers in bangalore",
            "blood stock",
        ] {
            assert_eq!(bag(text).component, None, "{text:?}");
        }
    }

    #[test]
    fn specific_components() {
        assert_eq!(bag("plasma stock").component, Some(Component::Plasma));
        assert_eq!(bag("any platelet units").component, Some(Component::Platelets));
        assert_eq!(bag("whole blood units").component, Some(Component::WholeBlood));
        assert_eq!(bag("rbc stock").component, Some(Component::RedBloodCells));
        assert_eq!(
            bag("red blood cells in stock").component,
            Some(Component::RedBloodCells)
        );
        assert_eq!(
            bag("white cells available").component,
            Some(Component::WhiteBloodCells)
        );
    }

    // ── Time period ─────────────────────────────────────────────

    #[test]
    fn today_anchor() {
        let period = bag("appointments today").time_period.unwrap();
        assert_eq!(period.kind, TimePeriodKind::Today);
        assert_eq!(period.anchor_date, day(2025, 6, 18));
    }

    #[test]
    fn this_week_anchors_on_today_not_monday() {
        let period = bag("camps this week").time_period.unwrap();
        assert_eq!(period.kind, TimePeriodKind::ThisWeek);
        assert_eq!(period.anchor_date, day(2025, 6, 18));
    }

    #[test]
    fn this_month_anchors_on_first_day() {
        let period = bag("camps this month").time_period.unwrap();
        assert_eq!(period.kind, TimePeriodKind::ThisMonth);
        assert_eq!(period.anchor_date, day(2025, 6, 1));
    }

    #[test]
    fn upcoming_anchor() {
        let period = bag("upcoming blood camps in mumbai").time_period.unwrap();
        assert_eq!(period.kind, TimePeriodKind::Upcoming);
        assert_eq!(period.anchor_date, day(2025, 6, 18));
    }

    #[test]
    fn time_phrases_checked_in_fixed_order() {
        let period = bag("upcoming camps this month or today").time_period.unwrap();
        assert_eq!(period.kind, TimePeriodKind::Today);
        let period = bag("upcoming camps this month").time_period.unwrap();
        assert_eq!(period.kind, TimePeriodKind::ThisMonth);
    }

    #[test]
    fn no_time_phrase() {
        assert!(bag("camps in delhi").time_period.is_none());
    }

    // ── Slots are independent ───────────────────────────────────

    #[test]
    fn all_slots_filled_independently() {
        let entities = bag("o negative plasma in bengaluru this week");
        assert_eq!(entities.blood_group, Some(BloodGroup::ONegative));
        assert_eq!(entities.location, Some(Location::Bangalore));
        assert_eq!(entities.component, Some(Component::Plasma));
        assert_eq!(
            entities.time_period.map(|p| p.kind),
            Some(TimePeriodKind::ThisWeek)
        );
    }

    #[test]
    fn empty_text_yields_empty_bag() {
        assert!(bag("").is_empty());
        assert!(extract("").is_empty());
    }
}
