pub mod config;
pub mod engine;
pub mod error;
pub mod scale;
pub mod validation;

pub use config::*;
pub use engine::{score_groups, GroupBreakdown, ScoreReport};
pub use error::ScoringError;
pub use scale::{RatingScale, ScaleLevel};
pub use validation::validate_scoring;
