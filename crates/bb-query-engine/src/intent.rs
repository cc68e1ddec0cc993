//! Intent classification — ordered regex pattern groups, first match wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use bb_protocol::ResultType;

/// The purpose of a question, as decided by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    BloodAvailability,
    CenterInfo,
    CampInfo,
    DonorStats,
    AppointmentInfo,
    /// Nothing matched. Not an error.
    General,
}

impl Intent {
    /// Classifiable intents in scan order. `General` is the implicit fallback.
    pub const ALL: [Intent; 5] = [
        Intent::BloodAvailability,
        Intent::CenterInfo,
        Intent::CampInfo,
        Intent::DonorStats,
        Intent::AppointmentInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        self.result_type().as_str()
    }

    /// Result tag carried by queries built for this intent.
    pub fn result_type(&self) -> ResultType {
        match self {
            Self::BloodAvailability => ResultType::BloodAvailability,
            Self::CenterInfo => ResultType::CenterInfo,
            Self::CampInfo => ResultType::CampInfo,
            Self::DonorStats => ResultType::DonorStats,
            Self::AppointmentInfo => ResultType::AppointmentInfo,
            Self::General => ResultType::General,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Group order is significant: an utterance matching two groups resolves to
// the earlier one.
static INTENT_PATTERNS: LazyLock<Vec<(Intent, Vec<Regex>)>> = LazyLock::new(|| {
    vec![
        group(
            Intent::BloodAvailability,
            &[
                r"how many.*?blood.*?available",
                r".*?blood.*?stock",
                r"availability.*?blood",
                r"units.*?available",
                r"blood.*?inventory",
            ],
        ),
        group(
            Intent::CenterInfo,
            &[
                r".*?centers?.*?in",
                r"blood banks?.*?in",
                r"centres?.*?location",
                r"where.*?donate",
                r"nearest.*?center",
            ],
        ),
        group(
            Intent::CampInfo,
            &[
                r".*?camps?.*?in",
                r"blood.*?camps?",
                r"donation.*?camps?",
                r"upcoming.*?camps?",
                r"camp.*?schedule",
            ],
        ),
        group(
            Intent::DonorStats,
            &[
                r"how many.*?donors?",
                r"donor.*?count",
                r"total.*?donors?",
                r"registered.*?donors?",
            ],
        ),
        group(
            Intent::AppointmentInfo,
            &[
                r".*?appointments?",
                r"booking.*?available",
                r"schedule.*?donation",
                r"appointment.*?slots",
            ],
        ),
    ]
});

fn group(intent: Intent, patterns: &[&str]) -> (Intent, Vec<Regex>) {
    let compiled = patterns.iter().map(|p| Regex::new(p).unwrap()).collect();
    (intent, compiled)
}

/// Classify already-normalized text. Total: no match yields `Intent::General`.
pub fn classify(normalized: &str) -> Intent {
    INTENT_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(normalized)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}
