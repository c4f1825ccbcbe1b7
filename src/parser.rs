use crate::error::{EstimatorError, EstimatorResult};
use crate::types::EstimateInput;
use std::collections::HashSet;
use std::path::Path;

/// Parse an estimate input YAML file
pub fn parse_estimate(path: &Path) -> EstimatorResult<EstimateInput> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        EstimatorError::Parse(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    parse_estimate_str(&content)
}

/// Parse estimate input from a YAML string
pub fn parse_estimate_str(content: &str) -> EstimatorResult<EstimateInput> {
    let input: EstimateInput = serde_yaml::from_str(content)?;
    validate_input(&input)?;
    Ok(input)
}

/// Check the invariants a parsed input must hold before it is costed.
///
/// Missing roster fields are not an error here; they are handled by the
/// calculator's zero-cost fallback. Roster values that are present must be
/// finite.
pub fn validate_input(input: &EstimateInput) -> EstimatorResult<()> {
    if input.module.trim().is_empty() {
        return Err(EstimatorError::Validation(
            "Module name must not be empty".to_string(),
        ));
    }
    if input.module.chars().any(char::is_control) {
        return Err(EstimatorError::Validation(
            "Module name must not contain control characters".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for task in &input.tasks {
        if !seen.insert(task.label.as_str()) {
            return Err(EstimatorError::Validation(format!(
                "Duplicate task label '{}' in module '{}'",
                task.label, input.module
            )));
        }
        if !task.quantity.is_finite() || !task.rate.is_finite() {
            return Err(EstimatorError::Validation(format!(
                "Task '{}' must have a finite quantity and rate",
                task.label
            )));
        }
    }

    for (index, row) in input.resources.iter().enumerate() {
        if [row.count, row.hours, row.rate]
            .iter()
            .flatten()
            .any(|v| !v.is_finite())
        {
            return Err(EstimatorError::Validation(format!(
                "Resource '{}' (row {}) must have finite count, hours and rate",
                row.role.as_deref().unwrap_or(""),
                index + 1
            )));
        }
    }

    let adj = &input.adjustments;
    let finite_override = adj.override_scaling_factor.map_or(true, f64::is_finite);
    if !adj.platform_multiplier.is_finite() || !adj.profit_margin.is_finite() || !finite_override
    {
        return Err(EstimatorError::Validation(
            "Adjustments must be finite numbers".to_string(),
        ));
    }

    Ok(())
}
