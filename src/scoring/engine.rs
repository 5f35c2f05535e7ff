use std::collections::{BTreeMap, HashMap, HashSet};

use super::config::ScoringConfig;
use super::error::ScoringError;
use crate::survey::{Pair, RatingMatrix};

/// Intermediate values for one group, kept for diagnostic output.
#[derive(Debug, Clone)]
pub struct GroupBreakdown {
    /// Group members, sorted for stable output.
    pub members: Vec<String>,
    /// Mean of the scores credited to each student. One score per
    /// teammate-pair, including self, so every list has `members.len()`
    /// entries.
    pub individual_ratings: BTreeMap<String, f64>,
    /// Mean of every score counted in the group.
    pub team_rating: f64,
    /// Individual rating over team rating, capped.
    pub factors: BTreeMap<String, f64>,
    /// Number of scores pooled for the team rating. Always the square of
    /// the group size.
    pub pooled_len: usize,
}

/// Result of scoring every group.
#[derive(Debug, Clone, Default)]
pub struct ScoreReport {
    /// Identifier -> final teamwork score.
    pub scores: HashMap<String, f64>,
    /// Per-group intermediates, in input order.
    pub groups: Vec<GroupBreakdown>,
    /// Entries never claimed by any group, with their values. Sorted by
    /// pair. These students are not scored.
    pub orphans: Vec<(Pair, f64)>,
    /// Advisory anomalies, such as a self-evaluation discarded because the
    /// student otherwise never responded.
    pub warnings: Vec<String>,
}

/// Score every group against the rating matrix.
///
/// Groups are processed independently; entries are claimed at most once
/// across all of them. The matrix itself is never mutated: "consumed"
/// entries are tracked in a separate claimed set, and whatever is left
/// unclaimed at the end is reported as orphaned rather than scored.
///
/// Groups are trusted to be a non-overlapping partition of the student
/// population; that precondition is not validated here.
pub fn score_groups(
    groups: &[HashSet<String>],
    matrix: &RatingMatrix,
    config: &ScoringConfig,
) -> Result<ScoreReport, ScoringError> {
    let mut claimed: HashSet<Pair> = HashSet::new();
    let mut report = ScoreReport::default();

    for group in groups {
        let breakdown = score_group(group, matrix, config, &mut claimed, &mut report.warnings)?;
        for (student, factor) in &breakdown.factors {
            report
                .scores
                .insert(student.clone(), factor * config.max_points);
        }
        report.groups.push(breakdown);
    }

    report.orphans = matrix
        .entries
        .iter()
        .filter(|(pair, _)| !claimed.contains(*pair))
        .map(|(pair, value)| (pair.clone(), *value))
        .collect();
    report.orphans.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(report)
}

/// Resolve every ordered (student, peer) pair in one group and reduce the
/// collected scores to ratings and factors.
fn score_group(
    group: &HashSet<String>,
    matrix: &RatingMatrix,
    config: &ScoringConfig,
    claimed: &mut HashSet<Pair>,
    warnings: &mut Vec<String>,
) -> Result<GroupBreakdown, ScoringError> {
    let mut members: Vec<String> = group.iter().cloned().collect();
    members.sort();

    let mut student_scores: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut pooled: Vec<f64> = Vec::new();

    for student in &members {
        for peer in &members {
            let pair = (student.clone(), peer.clone());
            let entry = matrix
                .entries
                .get(&pair)
                .filter(|_| !claimed.contains(&pair));

            if student == peer && !matrix.responded.contains(student) {
                // The student submitted nothing at all.
                student_scores
                    .entry(student.clone())
                    .or_default()
                    .push(config.non_responder_self_score);
                pooled.push(config.non_responder_self_score);
                if let Some(value) = entry {
                    // Data anomaly: a self-rating exists for a student the
                    // responded set says never submitted. Claim it unused so
                    // it is not reported as orphaned.
                    warnings.push(format!(
                        "ignoring self-eval of {} for non-responder {}",
                        value, student
                    ));
                    claimed.insert(pair);
                }
            } else if let Some(value) = entry {
                // A reported evaluation, credited to the ratee.
                student_scores.entry(peer.clone()).or_default().push(*value);
                pooled.push(*value);
                claimed.insert(pair);
            } else if !matrix.responded.contains(peer) {
                // Missing pair and the peer never evaluated anyone: no
                // benefit of the doubt.
                student_scores
                    .entry(peer.clone())
                    .or_default()
                    .push(config.default_bad_score);
                pooled.push(config.default_bad_score);
            } else {
                // Missing pair but the peer did respond.
                student_scores
                    .entry(peer.clone())
                    .or_default()
                    .push(config.default_good_score);
                pooled.push(config.default_good_score);
            }
        }
    }

    if pooled.is_empty() {
        return Err(ScoringError::DegenerateGroup { members });
    }
    let team_rating = mean(&pooled);
    if team_rating == 0.0 {
        return Err(ScoringError::DegenerateGroup { members });
    }

    let individual_ratings: BTreeMap<String, f64> = student_scores
        .iter()
        .map(|(student, scores)| (student.clone(), mean(scores)))
        .collect();

    let factors: BTreeMap<String, f64> = individual_ratings
        .iter()
        .map(|(student, rating)| (student.clone(), (rating / team_rating).min(config.factor_cap)))
        .collect();

    Ok(GroupBreakdown {
        members,
        individual_ratings,
        team_rating,
        factors,
        pooled_len: pooled.len(),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
