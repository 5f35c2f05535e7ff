use serde::{Deserialize, Serialize};

use super::error::ScoringError;

/// One level of the ordinal rating scale.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScaleLevel {
    pub label: String,
    pub value: f64,
}

/// The fixed ordinal scale survey answers are written in.
///
/// Levels are kept in declaration order (best to worst in the default
/// scale); order only matters for display. Values must lie in [0, 100],
/// which `validate_scoring` checks at startup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct RatingScale {
    pub levels: Vec<ScaleLevel>,
}

impl Default for RatingScale {
    fn default() -> Self {
        let levels = [
            ("Excellent", 100.0),
            ("Very good", 87.5),
            ("Satisfactory", 75.0),
            ("Ordinary", 62.5),
            ("Marginal", 50.0),
            ("Deficient", 37.5),
            ("Unsatisfactory", 25.0),
            ("Superficial", 12.5),
            ("No show", 0.0),
        ];
        Self {
            levels: levels
                .into_iter()
                .map(|(label, value)| ScaleLevel {
                    label: label.to_string(),
                    value,
                })
                .collect(),
        }
    }
}

impl RatingScale {
    /// Resolve a raw survey answer to its numeric value.
    ///
    /// The survey form appends a description after a colon
    /// ("Excellent: consistently went above and beyond"); only the part
    /// before the first `:` is matched, and it must match a label exactly.
    pub fn resolve(&self, raw: &str) -> Result<f64, ScoringError> {
        let label = raw.split(':').next().unwrap_or(raw);
        self.levels
            .iter()
            .find(|level| level.label == label)
            .map(|level| level.value)
            .ok_or_else(|| ScoringError::UnknownRatingLabel(raw.to_string()))
    }
}
