//! Unified Estimator - implementation cost estimates with Excel export
//!
//! An estimate is built from three inputs:
//!
//! - task entries (quantity × rate) whose costs multiply into a revised data
//!   point, normalised against a baseline into a scaling factor;
//! - a resource roster (count × hours × hourly rate) summed into a base cost;
//! - negotiation adjustments (platform multiplier, profit margin and an
//!   optional scaling factor override).
//!
//! # Example
//!
//! ```no_run
//! use unified_estimator::catalog::EstimationModule;
//! use unified_estimator::core::estimate;
//! use unified_estimator::excel::EstimateExporter;
//! use std::path::Path;
//!
//! let input = EstimationModule::RuleImplementation.template();
//! let report = estimate(&input)?;
//! println!("Final estimate: {:.2}", report.result.final_estimate);
//!
//! EstimateExporter::new(report).export(Path::new("Rule_Implementation_Estimate.xlsx"))?;
//! # Ok::<(), unified_estimator::error::EstimatorError>(())
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{EstimatorError, EstimatorResult};
pub use types::{
    Adjustments, CostedResource, CostedTask, EstimateInput, EstimateReport, EstimationResult,
    Location, ProjectDetails, ResourceEntry, ResourceRow, TaskEntry,
};
