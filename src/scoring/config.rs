use serde::{Deserialize, Serialize};

use super::scale::RatingScale;

/// Score synthesized for a missing evaluation of a peer who never submitted
/// anything themselves.
pub const DEFAULT_BAD_SCORE: f64 = 0.0;

/// Score synthesized for a missing evaluation of a peer who did submit,
/// just not for this pair. Distinct from `NON_RESPONDER_SELF_SCORE` even
/// though older policy text put both at 25.
pub const DEFAULT_GOOD_SCORE: f64 = 25.0;

/// Self-evaluation score for a student who never submitted at all.
pub const NON_RESPONDER_SELF_SCORE: f64 = 0.0;

/// Points allocated to the peer-evaluation assignment.
pub const MAX_POINTS: f64 = 3.0;

/// Upper bound on the individual adjustment factor. There is no lower
/// bound; a factor of 0 is valid.
pub const FACTOR_CAP: f64 = 1.05;

/// Scoring policy, passed explicitly into the engine.
///
/// All fields have built-in defaults, so a policy file only needs to name
/// what it changes.
///
/// Example YAML:
/// ```yaml
/// max_points: 4
/// factor_cap: 1.1
/// scale:
///   - { label: "Excellent", value: 100 }
///   - { label: "Adequate", value: 50 }
///   - { label: "No show", value: 0 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// The ordinal label-to-number scale survey answers use.
    #[serde(default)]
    pub scale: RatingScale,

    /// Synthetic score for a missing evaluation of a non-responding peer.
    #[serde(default = "default_bad_score")]
    pub default_bad_score: f64,

    /// Synthetic score for a missing evaluation of a responding peer.
    #[serde(default = "default_good_score")]
    pub default_good_score: f64,

    /// Self-evaluation score assigned to a complete non-responder.
    #[serde(default = "non_responder_self_score")]
    pub non_responder_self_score: f64,

    /// Points the final factor is multiplied by.
    #[serde(default = "max_points")]
    pub max_points: f64,

    /// Cap on individual rating divided by team rating.
    #[serde(default = "factor_cap")]
    pub factor_cap: f64,
}

fn default_bad_score() -> f64 {
    DEFAULT_BAD_SCORE
}

fn default_good_score() -> f64 {
    DEFAULT_GOOD_SCORE
}

fn non_responder_self_score() -> f64 {
    NON_RESPONDER_SELF_SCORE
}

fn max_points() -> f64 {
    MAX_POINTS
}

fn factor_cap() -> f64 {
    FACTOR_CAP
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scale: RatingScale::default(),
            default_bad_score: DEFAULT_BAD_SCORE,
            default_good_score: DEFAULT_GOOD_SCORE,
            non_responder_self_score: NON_RESPONDER_SELF_SCORE,
            max_points: MAX_POINTS,
            factor_cap: FACTOR_CAP,
        }
    }
}
