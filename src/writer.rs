use crate::error::EstimatorResult;
use crate::types::EstimateInput;
use std::fs;
use std::path::Path;

/// Serialize an estimate input to YAML
pub fn to_yaml_string(input: &EstimateInput) -> EstimatorResult<String> {
    Ok(serde_yaml::to_string(input)?)
}

/// Write an estimate input file, replacing any existing file
pub fn write_estimate(path: &Path, input: &EstimateInput) -> EstimatorResult<()> {
    let content = to_yaml_string(input)?;
    fs::write(path, content)?;
    Ok(())
}
