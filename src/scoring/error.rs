use thiserror::Error;

/// Conditions the scoring core can fail with.
///
/// Both are fatal under the reference policy: bad labels mean the survey
/// data is untrustworthy, and a degenerate group has no defined team rating.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A raw text rating did not match any label in the rating scale.
    #[error("unknown rating label '{0}'")]
    UnknownRatingLabel(String),

    /// A group produced no usable scores, so the team rating would be a
    /// division by zero.
    #[error("degenerate group [{}]: no usable scores, team rating undefined", members.join(", "))]
    DegenerateGroup { members: Vec<String> },
}
