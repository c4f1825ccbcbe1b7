//! Error handling tests

use unified_estimator::error::{EstimatorError, EstimatorResult};

#[test]
fn test_validation_display() {
    let err = EstimatorError::Validation("Missing resource fields: rate".to_string());
    assert_eq!(err.to_string(), "Validation error: Missing resource fields: rate");
}

#[test]
fn test_domain_display() {
    let err = EstimatorError::Domain("negative radicand".to_string());
    assert_eq!(err.to_string(), "Domain error: negative radicand");
}

#[test]
fn test_io_from() {
    fn open() -> EstimatorResult<String> {
        Ok(std::fs::read_to_string("definitely/not/here.yaml")?)
    }
    assert!(matches!(open(), Err(EstimatorError::Io(_))));
}

#[test]
fn test_yaml_from() {
    fn parse() -> EstimatorResult<serde_yaml::Value> {
        Ok(serde_yaml::from_str("key: [unclosed")?)
    }
    let err = parse().unwrap_err();
    assert!(err.to_string().starts_with("YAML parsing error"));
}
