//! Excel importer implementation - estimate .xlsx → estimate input

use super::exporter::{
    ADJUSTED_COST, COMPANY_PROFIT, PLATFORM_COST, PROJECT_NAME, RESOURCE_HEADER, SCALING_FACTOR,
    SELECTED_MODULE, SUB_STORY, TASK_HEADER, TASK_NAME, USER_STORY, USE_OVERRIDE,
};
use crate::error::{EstimatorError, EstimatorResult};
use crate::types::{Adjustments, EstimateInput, ResourceRow, TaskEntry};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;
use tracing::debug;

const SHEET_SUFFIX: &str = " Estimate";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Header,
    Tasks,
    Resources,
    Other,
}

/// Reads a workbook written by [`super::EstimateExporter`] back into an
/// editable estimate input
pub struct EstimateImporter {
    path: std::path::PathBuf,
}

impl EstimateImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the estimate sheet
    pub fn import(&self) -> EstimatorResult<EstimateInput> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| EstimatorError::Import(format!("Failed to open Excel file: {}", e)))?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_name = sheet_names
            .iter()
            .find(|name| name.ends_with(SHEET_SUFFIX))
            .or_else(|| sheet_names.first())
            .cloned()
            .ok_or_else(|| EstimatorError::Import("Workbook has no worksheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            EstimatorError::Import(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        let fallback_module = sheet_name
            .strip_suffix(SHEET_SUFFIX)
            .unwrap_or(&sheet_name)
            .to_string();
        read_estimate(&range, fallback_module)
    }
}

fn read_estimate(range: &Range<Data>, fallback_module: String) -> EstimatorResult<EstimateInput> {
    let (end_row, _) = range
        .end()
        .ok_or_else(|| EstimatorError::Import("Estimate sheet is empty".to_string()))?;

    let mut input = EstimateInput::new(fallback_module);
    let mut section = Section::Header;
    let mut platform_cost = None;
    let mut profit = None;
    let mut adjusted_cost = None;
    let mut scaling_factor = None;

    for row in 0..=end_row {
        let label = text(range, row, 0);
        let second = text(range, row, 1);

        if label.is_empty() && row_is_blank(range, row) {
            section = Section::Other;
            continue;
        }
        if label == TASK_HEADER[0] && second == TASK_HEADER[1] {
            section = Section::Tasks;
            continue;
        }
        if label == RESOURCE_HEADER[0] && second == RESOURCE_HEADER[1] {
            section = Section::Resources;
            continue;
        }

        match section {
            Section::Header => {
                let project = &mut input.project;
                match label.as_str() {
                    PROJECT_NAME => project.project_name = second,
                    USER_STORY => project.user_story = second,
                    SUB_STORY => project.sub_story = second,
                    TASK_NAME => project.task_name = second,
                    SELECTED_MODULE if !second.is_empty() => input.module = second,
                    USE_OVERRIDE => project.use_override = boolean(range, row, 1).unwrap_or(true),
                    _ => {}
                }
            }
            Section::Tasks => {
                let quantity = number(range, row, 1).ok_or_else(|| {
                    EstimatorError::Import(format!(
                        "Task '{}' has no quantity (row {})",
                        label,
                        row + 1
                    ))
                })?;
                let rate = number(range, row, 2).ok_or_else(|| {
                    EstimatorError::Import(format!(
                        "Task '{}' has no rate (row {})",
                        label,
                        row + 1
                    ))
                })?;
                input.tasks.push(TaskEntry::new(label, quantity, rate));
            }
            Section::Resources => {
                let location = text(range, row, 4);
                input.resources.push(ResourceRow {
                    role: Some(label).filter(|s| !s.is_empty()),
                    count: number(range, row, 1),
                    hours: number(range, row, 2),
                    rate: number(range, row, 3),
                    location: location.parse().ok(),
                });
            }
            Section::Other => match label.as_str() {
                SCALING_FACTOR => scaling_factor = number(range, row, 1),
                ADJUSTED_COST => adjusted_cost = number(range, row, 1),
                PLATFORM_COST => platform_cost = number(range, row, 1),
                COMPANY_PROFIT => profit = number(range, row, 1),
                _ => {}
            },
        }
    }

    let defaults = Adjustments::default();
    let ratio = |part: Option<f64>, default: f64| match (part, adjusted_cost) {
        (Some(p), Some(adj)) if adj != 0.0 => p / adj,
        _ => default,
    };
    input.adjustments = Adjustments {
        platform_multiplier: ratio(platform_cost, defaults.platform_multiplier),
        profit_margin: ratio(profit, defaults.profit_margin),
        override_scaling_factor: scaling_factor,
    };

    debug!(
        module = %input.module,
        tasks = input.tasks.len(),
        resources = input.resources.len(),
        "estimate workbook imported"
    );
    Ok(input)
}

fn cell(range: &Range<Data>, row: u32, col: u32) -> Option<&Data> {
    range.get_value((row, col))
}

fn text(range: &Range<Data>, row: u32, col: u32) -> String {
    match cell(range, row, col) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn number(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match cell(range, row, col)? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn boolean(range: &Range<Data>, row: u32, col: u32) -> Option<bool> {
    match cell(range, row, col)? {
        Data::Bool(b) => Some(*b),
        Data::String(s) => s.trim().to_lowercase().parse().ok(),
        _ => None,
    }
}

fn row_is_blank(range: &Range<Data>, row: u32) -> bool {
    (0..RESOURCE_HEADER.len() as u32)
        .all(|col| matches!(cell(range, row, col), None | Some(Data::Empty)))
}
