use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One submission record in the Gradescope assignment metadata export.
/// Field names carry the leading colon the upstream serializer emits.
#[derive(Debug, Deserialize)]
struct Submission {
    #[serde(rename = ":submitters")]
    submitters: Vec<Submitter>,
}

#[derive(Debug, Deserialize)]
struct Submitter {
    #[serde(rename = ":email")]
    email: String,
}

/// Load the group partition from the Gradescope metadata YAML.
///
/// Each submission becomes one group: the set of its submitters' lowercased
/// email local parts. Overlap between groups is a trusted upstream
/// precondition and is not validated here.
pub fn load_groups(path: &Path) -> Result<Vec<HashSet<String>>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata file at {}", path.display()))?;
    parse_groups(&content)
        .with_context(|| format!("Failed to parse metadata: invalid YAML in {}", path.display()))
}

/// Parse the metadata YAML document into group sets.
pub fn parse_groups(content: &str) -> Result<Vec<HashSet<String>>> {
    let metadata: HashMap<String, Submission> = serde_saphyr::from_str(content)?;
    Ok(metadata
        .into_values()
        .map(|submission| {
            submission
                .submitters
                .into_iter()
                .map(|submitter| login_from_email(&submitter.email))
                .collect()
        })
        .collect())
}

/// "ABC123@university.edu" -> "abc123"
fn login_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups() {
        let yaml = r#"
submission_1111:
  :submitters:
    - :email: Alice1@university.edu
      :name: Alice Ade
    - :email: bob2@university.edu
      :name: Bob Bee
submission_2222:
  :submitters:
    - :email: carol3@university.edu
"#;
        let mut groups = parse_groups(yaml).unwrap();
        groups.sort_by_key(|group| group.len());

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0],
            HashSet::from(["carol3".to_string()])
        );
        assert_eq!(
            groups[1],
            HashSet::from(["alice1".to_string(), "bob2".to_string()])
        );
    }

    #[test]
    fn test_login_from_email() {
        assert_eq!(login_from_email("ABC123@university.edu"), "abc123");
        assert_eq!(login_from_email("plainlogin"), "plainlogin");
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(parse_groups("submission_1111:\n  - not: [valid").is_err());
    }
}
