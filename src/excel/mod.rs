//! Excel import/export for estimates
//!
//! - Export: estimate report → single-sheet .xlsx
//! - Import: exported .xlsx → estimate input (YAML-ready)

mod exporter;
mod importer;

pub use exporter::EstimateExporter;
pub use importer::EstimateImporter;
