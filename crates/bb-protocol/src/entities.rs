use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ABO/Rh blood group, serialized as its canonical lower-case key ("o+").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "a+")]
    APositive,
    #[serde(rename = "a-")]
    ANegative,
    #[serde(rename = "b+")]
    BPositive,
    #[serde(rename = "b-")]
    BNegative,
    #[serde(rename = "ab+")]
    AbPositive,
    #[serde(rename = "ab-")]
    AbNegative,
    #[serde(rename = "o+")]
    OPositive,
    #[serde(rename = "o-")]
    ONegative,
}

impl BloodGroup {
    /// Canonical key, also the value bound into SQL parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APositive => "a+",
            Self::ANegative => "a-",
            Self::BPositive => "b+",
            Self::BNegative => "b-",
            Self::AbPositive => "ab+",
            Self::AbNegative => "ab-",
            Self::OPositive => "o+",
            Self::ONegative => "o-",
        }
    }

    /// Upper-cased form used in descriptions ("AB+").
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known city/district the extractor can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Chennai,
    Bangalore,
    Mumbai,
    Delhi,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chennai => "chennai",
            Self::Bangalore => "bangalore",
            Self::Mumbai => "mumbai",
            Self::Delhi => "delhi",
        }
    }

    /// Title-cased name used in descriptions ("Bangalore").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Chennai => "Chennai",
            Self::Bangalore => "Bangalore",
            Self::Mumbai => "Mumbai",
            Self::Delhi => "Delhi",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blood component stocked by a centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    #[serde(rename = "whole blood")]
    WholeBlood,
    #[serde(rename = "plasma")]
    Plasma,
    #[serde(rename = "platelets")]
    Platelets,
    #[serde(rename = "red blood cells")]
    RedBloodCells,
    #[serde(rename = "white blood cells")]
    WhiteBloodCells,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WholeBlood => "whole blood",
            Self::Plasma => "plasma",
            Self::Platelets => "platelets",
            Self::RedBloodCells => "red blood cells",
            Self::WhiteBloodCells => "white blood cells",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriodKind {
    Today,
    ThisWeek,
    ThisMonth,
    Upcoming,
}

impl TimePeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
            Self::Upcoming => "upcoming",
        }
    }

    /// Phrase shown in descriptions ("this week").
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this week",
            Self::ThisMonth => "this month",
            Self::Upcoming => "upcoming",
        }
    }
}

/// A time period together with the date it was anchored to at extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub kind: TimePeriodKind,
    pub anchor_date: NaiveDate,
}

/// Structured values pulled out of a question. Every slot is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<TimePeriod>,
}

impl EntityBag {
    pub fn is_empty(&self) -> bool {
        self.blood_group.is_none()
            && self.location.is_none()
            && self.component.is_none()
            && self.time_period.is_none()
    }
}
