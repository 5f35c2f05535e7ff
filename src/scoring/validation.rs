use super::config::ScoringConfig;

/// Validate the scoring policy at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.scale.levels.is_empty() {
        errors.push("scale: must have at least one level".to_string());
    }
    for (i, level) in config.scale.levels.iter().enumerate() {
        if level.label.is_empty() {
            errors.push(format!("scale[{}].label: must not be empty", i));
        }
        if !(0.0..=100.0).contains(&level.value) {
            errors.push(format!(
                "scale[{}].value: {} is outside [0, 100]",
                i, level.value
            ));
        }
        if config.scale.levels[..i]
            .iter()
            .any(|other| other.label == level.label)
        {
            errors.push(format!("scale[{}].label: duplicate '{}'", i, level.label));
        }
    }

    for (name, value) in [
        ("default_bad_score", config.default_bad_score),
        ("default_good_score", config.default_good_score),
        ("non_responder_self_score", config.non_responder_self_score),
    ] {
        if !(0.0..=100.0).contains(&value) {
            errors.push(format!("{}: {} is outside [0, 100]", name, value));
        }
    }

    if config.max_points <= 0.0 {
        errors.push("max_points: must be positive".to_string());
    }
    if config.factor_cap < 0.0 {
        errors.push("factor_cap: must be non-negative".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
