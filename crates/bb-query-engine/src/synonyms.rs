//! Static synonym tables mapping canonical values to their textual variants.
//!
//! Tables are ordered slices rather than maps: scan order decides which
//! canonical value wins when several variants appear in one question.

use bb_protocol::{BloodGroup, Component, Location};

/// A canonical value and the variants that select it, in scan order.
pub type SynonymTable<T> = &'static [(T, &'static [&'static str])];

/// The AB groups are scanned first, otherwise "ab+" would be captured by the
/// "b+" variant.
pub static BLOOD_GROUPS: SynonymTable<BloodGroup> = &[
    (
        BloodGroup::AbPositive,
        &["ab+", "ab positive", "ab pos", "type ab+"],
    ),
    (
        BloodGroup::AbNegative,
        &["ab-", "ab negative", "ab neg", "type ab-"],
    ),
    (BloodGroup::APositive, &["a+", "a positive", "a pos", "type a+"]),
    (BloodGroup::ANegative, &["a-", "a negative", "a neg", "type a-"]),
    (BloodGroup::BPositive, &["b+", "b positive", "b pos", "type b+"]),
    (BloodGroup::BNegative, &["b-", "b negative", "b neg", "type b-"]),
    (BloodGroup::OPositive, &["o+", "o positive", "o pos", "type o+"]),
    (BloodGroup::ONegative, &["o-", "o negative", "o neg", "type o-"]),
];

pub static LOCATIONS: SynonymTable<Location> = &[
    (Location::Chennai, &["chennai", "madras"]),
    (Location::Bangalore, &["bangalore", "bengaluru"]),
    (Location::Mumbai, &["mumbai", "bombay"]),
    (Location::Delhi, &["delhi", "new delhi"]),
];

/// Component-agnostic variant that must never fill the component slot.
pub const GENERIC_BLOOD: &str = "blood";

pub static COMPONENTS: SynonymTable<Component> = &[
    (Component::WholeBlood, &["whole blood", "whole", GENERIC_BLOOD]),
    (Component::Plasma, &["plasma"]),
    (Component::Platelets, &["platelets", "platelet"]),
    (
        Component::RedBloodCells,
        &["rbc", "red blood cells", "red cells"],
    ),
    (
        Component::WhiteBloodCells,
        &["wbc", "white blood cells", "white cells"],
    ),
];

/// First canonical value whose variant occurs in `text`, honoring the
/// `skip` predicate for variants that must not match.
pub fn first_match<T: Copy + 'static>(
    text: &str,
    table: SynonymTable<T>,
    skip: impl Fn(&str) -> bool,
) -> Option<T> {
    table.iter().find_map(|(canonical, variants)| {
        variants
            .iter()
            .copied()
            .any(|v| !skip(v) && text.contains(v))
            .then_some(*canonical)
    })
}
