use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::types::{Pair, RatingMatrix};
use crate::scoring::RatingScale;

/// Placeholder the form puts in unused peer slots.
const NO_NETID_VALUE: &str = "none";

/// One row of the survey export.
///
/// The form has four fixed peer slots; `peer_evals` flattens them into a
/// variable-length list so nothing downstream depends on that shape.
#[derive(Debug, Deserialize)]
pub struct SurveyRow {
    #[serde(rename = "Your NetID")]
    pub netid: String,
    #[serde(rename = "Your Name")]
    pub name: String,
    #[serde(rename = "Rate Yourself")]
    pub self_rating: String,
    #[serde(rename = "Team Member 1: NetID", default)]
    pub peer1_netid: String,
    #[serde(rename = "Team Member 1: Rating", default)]
    pub peer1_rating: String,
    #[serde(rename = "Team Member 2: NetID", default)]
    pub peer2_netid: String,
    #[serde(rename = "Team Member 2: Rating", default)]
    pub peer2_rating: String,
    #[serde(rename = "Team Member 3: NetID", default)]
    pub peer3_netid: String,
    #[serde(rename = "Team Member 3: Rating", default)]
    pub peer3_rating: String,
    #[serde(rename = "Team Member 4: NetID", default)]
    pub peer4_netid: String,
    #[serde(rename = "Team Member 4: Rating", default)]
    pub peer4_rating: String,
    #[serde(rename = "Comments", default)]
    pub comments: String,
}

impl SurveyRow {
    /// Peer (netid, raw rating) pairs actually filled in, skipping empty
    /// and placeholder slots.
    pub fn peer_evals(&self) -> Vec<(&str, &str)> {
        [
            (self.peer1_netid.as_str(), self.peer1_rating.as_str()),
            (self.peer2_netid.as_str(), self.peer2_rating.as_str()),
            (self.peer3_netid.as_str(), self.peer3_rating.as_str()),
            (self.peer4_netid.as_str(), self.peer4_rating.as_str()),
        ]
        .into_iter()
        .filter(|(netid, _)| !netid.is_empty() && *netid != NO_NETID_VALUE)
        .collect()
    }
}

/// Read the survey CSV file and build the rating matrix.
///
/// An answer that does not resolve through the scale aborts the whole run;
/// partial scoring over untrustworthy data is not supported.
pub fn load_matrix(path: &Path, scale: &RatingScale) -> Result<RatingMatrix> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open survey file at {}", path.display()))?;
    read_matrix(reader, scale)
        .with_context(|| format!("Failed to parse survey file at {}", path.display()))
}

/// Build the rating matrix from any CSV source.
pub fn read_matrix<R: Read>(
    mut reader: csv::Reader<R>,
    scale: &RatingScale,
) -> Result<RatingMatrix> {
    let mut matrix = RatingMatrix::default();
    for row in reader.deserialize() {
        let row: SurveyRow = row.context("Failed to parse survey row")?;
        ingest_row(&row, scale, &mut matrix)?;
    }
    Ok(matrix)
}

fn ingest_row(row: &SurveyRow, scale: &RatingScale, matrix: &mut RatingMatrix) -> Result<()> {
    let rater = row.netid.to_lowercase();

    matrix.names.insert(rater.clone(), row.name.clone());
    if !row.comments.is_empty() {
        matrix.comments.insert(rater.clone(), row.comments.clone());
    }

    let self_score = scale.resolve(&row.self_rating)?;
    insert_entry(matrix, (rater.clone(), rater.clone()), self_score);

    for (peer, raw) in row.peer_evals() {
        let score = scale.resolve(raw)?;
        insert_entry(matrix, (rater.clone(), peer.to_lowercase()), score);
    }

    matrix.responded.insert(rater);
    Ok(())
}

fn insert_entry(matrix: &mut RatingMatrix, pair: Pair, score: f64) {
    if let Some(previous) = matrix.entries.insert(pair.clone(), score) {
        // Duplicate ordered pair, e.g. the same peer listed in two slots.
        // The later value wins; advisory only.
        eprintln!(
            "Warning: duplicate evaluation ({}, {}): replacing {} with {}",
            pair.0, pair.1, previous, score
        );
    }
}
