use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::scoring::{GroupBreakdown, ScoreReport};
use crate::survey::RatingMatrix;

/// Check if stderr is a TTY (diagnostics go there)
pub fn should_use_colors() -> bool {
    std::io::stderr().is_terminal()
}

/// Format a teamwork score with two decimals ("3.15")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Per-group diagnostic block for verbose mode: members, names, comments,
/// and the intermediate ratings and factors.
pub fn format_group_detail(
    breakdown: &GroupBreakdown,
    matrix: &RatingMatrix,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    let header = format!("Group: {}", breakdown.members.join(", "));
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    for member in &breakdown.members {
        match matrix.names.get(member) {
            Some(name) => lines.push(format!("  {} -> {}", member, name)),
            None => lines.push(format!("  {} -> missing name, student didn't submit", member)),
        }
        if let Some(comment) = matrix.comments.get(member) {
            lines.push(format!("  [comments] {}: {}", member, comment));
        }
    }

    lines.push(format!(
        "  Team rating: {:.2} ({} pooled scores)",
        breakdown.team_rating, breakdown.pooled_len
    ));
    for (student, rating) in &breakdown.individual_ratings {
        lines.push(format!(
            "  {}: individual {:.2}, factor {:.3}",
            student, rating, breakdown.factors[student]
        ));
    }

    lines.join("\n")
}

/// Final score table, one line per student, sorted by identifier.
pub fn format_score_table(report: &ScoreReport, matrix: &RatingMatrix, use_colors: bool) -> String {
    if report.scores.is_empty() {
        return "No students scored.".to_string();
    }

    let mut rows: Vec<(&String, f64)> = report
        .scores
        .iter()
        .map(|(student, score)| (student, *score))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    rows.iter()
        .map(|(student, score)| {
            let name = matrix.names.get(*student).map(String::as_str).unwrap_or("-");
            if use_colors {
                format!(
                    "{:<12} {:<24} {}",
                    student.cyan(),
                    name,
                    format_score(*score).bold()
                )
            } else {
                format!("{:<12} {:<24} {}", student, name, format_score(*score))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score_groups, ScoringConfig};
    use std::collections::HashSet;

    fn sample_report() -> (ScoreReport, RatingMatrix) {
        let mut matrix = RatingMatrix::default();
        for (rater, ratee, score) in [
            ("a", "a", 75.0),
            ("a", "b", 75.0),
            ("b", "a", 75.0),
            ("b", "b", 75.0),
        ] {
            matrix
                .entries
                .insert((rater.to_string(), ratee.to_string()), score);
            matrix.responded.insert(rater.to_string());
        }
        matrix.names.insert("a".to_string(), "Alice Ade".to_string());
        matrix
            .comments
            .insert("a".to_string(), "good team".to_string());

        let group: HashSet<String> = ["a".to_string(), "b".to_string()].into();
        let report = score_groups(&[group], &matrix, &ScoringConfig::default()).unwrap();
        (report, matrix)
    }

    #[test]
    fn test_format_score_two_decimals() {
        assert_eq!(format_score(3.0), "3.00");
        assert_eq!(format_score(1.05 * 3.0), "3.15");
        assert_eq!(format_score(0.0), "0.00");
    }

    #[test]
    fn test_group_detail_contents() {
        let (report, matrix) = sample_report();
        let detail = format_group_detail(&report.groups[0], &matrix, false);

        assert!(detail.contains("Group: a, b"));
        assert!(detail.contains("a -> Alice Ade"));
        assert!(detail.contains("b -> missing name"));
        assert!(detail.contains("[comments] a: good team"));
        assert!(detail.contains("Team rating: 75.00 (4 pooled scores)"));
    }

    #[test]
    fn test_score_table_sorted_with_fallback_name() {
        let (report, matrix) = sample_report();
        let table = format_score_table(&report, &matrix, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("a"));
        assert!(lines[0].contains("Alice Ade"));
        assert!(lines[0].contains("3.00"));
        assert!(lines[1].contains("-"));
    }

    #[test]
    fn test_empty_score_table() {
        let report = ScoreReport::default();
        let matrix = RatingMatrix::default();
        assert_eq!(
            format_score_table(&report, &matrix, false),
            "No students scored."
        );
    }
}
