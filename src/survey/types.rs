use std::collections::{HashMap, HashSet};

/// Directed (rater, ratee) key for one evaluation. A self-evaluation has
/// both components equal.
pub type Pair = (String, String);

/// Everything extracted from the survey export.
///
/// All identifiers are lowercased on ingestion; they are the join key
/// across every structure in the run.
#[derive(Debug, Default)]
pub struct RatingMatrix {
    /// (rater, ratee) -> numeric score. At most one entry per ordered pair.
    pub entries: HashMap<Pair, f64>,

    /// Students who submitted at least one evaluation.
    pub responded: HashSet<String>,

    /// Display names from the survey. Metadata only, never scored.
    pub names: HashMap<String, String>,

    /// Free-text comments from the survey. Metadata only.
    pub comments: HashMap<String, String>,
}
