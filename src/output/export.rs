use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;

use super::formatter::format_score;

/// Template columns preserved in the output, in order. The login column is
/// the join key.
const KEPT_COLUMNS: [&str; 5] = ["Student", "ID", "SIS User ID", "SIS Login ID", "Section"];
const LOGIN_COLUMN_INDEX: usize = 3;

/// Merge scores into the Canvas grades-export template and write the upload
/// CSV atomically.
///
/// Left join on the SIS Login ID column: template rows with no score get an
/// empty cell, scored students missing from the template are dropped.
/// Returns the dropped identifiers, sorted.
pub fn export_scores(
    template: &Path,
    output: &Path,
    scores: &HashMap<String, f64>,
    assignment_id: u32,
) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(template)
        .with_context(|| format!("Failed to open grades template at {}", template.display()))?;
    let headers = reader
        .headers()
        .context("Failed to read template header")?
        .clone();

    let mut indices = Vec::with_capacity(KEPT_COLUMNS.len());
    for column in KEPT_COLUMNS {
        let index = headers
            .iter()
            .position(|header| header == column)
            .with_context(|| format!("Template is missing the '{}' column", column))?;
        indices.push(index);
    }
    let login_index = indices[LOGIN_COLUMN_INDEX];

    let mut file = AtomicWriteFile::open(output)
        .with_context(|| format!("Failed to open output file at {}", output.display()))?;
    let mut matched: HashSet<&str> = HashSet::new();
    {
        let mut writer = csv::Writer::from_writer(&mut file);

        let mut header_row: Vec<String> = KEPT_COLUMNS.iter().map(|c| c.to_string()).collect();
        header_row.push(format!("Assignment {} Teamwork", assignment_id));
        writer
            .write_record(&header_row)
            .context("Failed to write output header")?;

        for record in reader.records() {
            let record = record.context("Failed to read template row")?;
            let mut row: Vec<String> = indices
                .iter()
                .map(|&index| record.get(index).unwrap_or("").to_string())
                .collect();

            let login = record.get(login_index).unwrap_or("").to_lowercase();
            match scores.get_key_value(&login) {
                Some((student, score)) => {
                    matched.insert(student.as_str());
                    row.push(format_score(*score));
                }
                None => row.push(String::new()),
            }
            writer
                .write_record(&row)
                .context("Failed to write output row")?;
        }
        writer.flush().context("Failed to flush output")?;
    }
    file.commit().context("Failed to save output file")?;

    let mut dropped: Vec<String> = scores
        .keys()
        .filter(|student| !matched.contains(student.as_str()))
        .cloned()
        .collect();
    dropped.sort();
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TEMPLATE: &str = "\
Student,ID,SIS User ID,SIS Login ID,Section,Old Assignment
\"Ade, Alice\",101,9001,abc1,S1,2.5
\"Bee, Bob\",102,9002,XYZ9,S1,1.0
\"Cee, Carol\",103,9003,car3,S2,3.0
";

    fn scores(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs
            .iter()
            .map(|(student, score)| (student.to_string(), *score))
            .collect()
    }

    #[test]
    fn test_left_join_and_column_filter() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("grades.csv");
        let output = dir.path().join("out.csv");
        fs::write(&template, TEMPLATE).unwrap();

        let dropped = export_scores(
            &template,
            &output,
            &scores(&[("abc1", 3.0), ("xyz9", 3.15)]),
            7,
        )
        .unwrap();

        assert!(dropped.is_empty());
        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines[0],
            "Student,ID,SIS User ID,SIS Login ID,Section,Assignment 7 Teamwork"
        );
        // Extra template column dropped, score joined case-insensitively.
        assert_eq!(lines[1], "\"Ade, Alice\",101,9001,abc1,S1,3.00");
        assert_eq!(lines[2], "\"Bee, Bob\",102,9002,XYZ9,S1,3.15");
        // Unscored student keeps an empty cell.
        assert_eq!(lines[3], "\"Cee, Carol\",103,9003,car3,S2,");
    }

    #[test]
    fn test_scored_student_missing_from_template_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("grades.csv");
        let output = dir.path().join("out.csv");
        fs::write(&template, TEMPLATE).unwrap();

        let dropped = export_scores(
            &template,
            &output,
            &scores(&[("abc1", 3.0), ("ghost", 1.5)]),
            7,
        )
        .unwrap();

        assert_eq!(dropped, vec!["ghost".to_string()]);
        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.contains("ghost"));
    }

    #[test]
    fn test_missing_login_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("grades.csv");
        let output = dir.path().join("out.csv");
        fs::write(&template, "Student,ID\nx,1\n").unwrap();

        let err = export_scores(&template, &output, &scores(&[]), 7).unwrap_err();
        assert!(err.to_string().contains("missing the"));
    }
}
