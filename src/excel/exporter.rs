//! Excel exporter implementation - estimate report → .xlsx

use crate::error::{EstimatorError, EstimatorResult};
use crate::types::{CostedResource, CostedTask, EstimateReport};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Excel's worksheet name limit
const MAX_SHEET_NAME_LEN: usize = 31;

pub(crate) const TASK_HEADER: [&str; 4] = ["Task", "Quantity", "Rate", "Cost"];
pub(crate) const RESOURCE_HEADER: [&str; 6] =
    ["Role", "Count", "Hours", "Rate", "Location", "Cost"];

pub(crate) const PROJECT_NAME: &str = "Project Name";
pub(crate) const USER_STORY: &str = "User Story";
pub(crate) const SUB_STORY: &str = "Sub Story";
pub(crate) const TASK_NAME: &str = "Task Name";
pub(crate) const SELECTED_MODULE: &str = "Selected Module";
pub(crate) const USE_OVERRIDE: &str = "Use Override Mode";

pub(crate) const REVISED_DATA_POINTS: &str = "Revised Data Points";
pub(crate) const SCALING_FACTOR: &str = "Scaling Factor";
pub(crate) const BASE_COST: &str = "Base Cost";
pub(crate) const ADJUSTED_COST: &str = "Adjusted Cost";
pub(crate) const PLATFORM_COST: &str = "Platform Cost";
pub(crate) const COMPANY_PROFIT: &str = "Company Profit";
pub(crate) const FINAL_ESTIMATE: &str = "Final Estimate";

/// Writes a single-sheet estimate workbook.
///
/// Row layout, top to bottom: project metadata, blank, task header and
/// rows, blank, cost metrics, blank, resource header and rows.
pub struct EstimateExporter {
    report: EstimateReport,
}

impl EstimateExporter {
    pub fn new(report: EstimateReport) -> Self {
        Self { report }
    }

    /// Export the estimate to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> EstimatorResult<()> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save(output_path)
            .map_err(|e| EstimatorError::Export(format!("Failed to save Excel file: {}", e)))?;
        Ok(())
    }

    /// Export the estimate to an in-memory .xlsx buffer
    pub fn export_to_buffer(&self) -> EstimatorResult<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save_to_buffer()
            .map_err(|e| EstimatorError::Export(format!("Failed to build Excel file: {}", e)))
    }

    fn build_workbook(&self) -> EstimatorResult<Workbook> {
        let sheet_name = self.report.sheet_name();
        if sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(EstimatorError::Export(format!(
                "Worksheet name '{}' exceeds {} characters; use a shorter module name",
                sheet_name, MAX_SHEET_NAME_LEN
            )));
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name)
            .map_err(|e| EstimatorError::Export(format!("Failed to set worksheet name: {}", e)))?;

        worksheet.set_column_width(0, 32).ok();
        for col in 1..6 {
            worksheet.set_column_width(col, 14).ok();
        }

        let header_format = Format::new().set_bold();

        let mut row = self.write_metadata(worksheet)?;
        row += 1;
        row = self.write_tasks(worksheet, row, &header_format)?;
        row += 1;
        row = self.write_metrics(worksheet, row)?;
        row += 1;
        self.write_resources(worksheet, row, &header_format)?;

        Ok(workbook)
    }

    /// Metadata rows starting at row 0; returns the next free row
    fn write_metadata(&self, worksheet: &mut Worksheet) -> EstimatorResult<u32> {
        let project = &self.report.project;
        let text_rows = [
            (PROJECT_NAME, project.project_name.as_str()),
            (USER_STORY, project.user_story.as_str()),
            (SUB_STORY, project.sub_story.as_str()),
            (TASK_NAME, project.task_name.as_str()),
            (SELECTED_MODULE, self.report.module.as_str()),
        ];

        let mut row = 0u32;
        for (label, value) in text_rows {
            write_str(worksheet, row, 0, label)?;
            if !value.is_empty() {
                write_str(worksheet, row, 1, value)?;
            }
            row += 1;
        }

        write_str(worksheet, row, 0, USE_OVERRIDE)?;
        worksheet
            .write_boolean(row, 1, project.use_override)
            .map_err(|e| EstimatorError::Export(format!("Failed to write boolean: {}", e)))?;

        Ok(row + 1)
    }

    fn write_tasks(
        &self,
        worksheet: &mut Worksheet,
        start: u32,
        header: &Format,
    ) -> EstimatorResult<u32> {
        write_header(worksheet, start, &TASK_HEADER, header)?;

        let mut row = start + 1;
        for CostedTask {
            label,
            quantity,
            rate,
            cost,
        } in &self.report.tasks
        {
            write_str(worksheet, row, 0, label)?;
            write_num(worksheet, row, 1, *quantity)?;
            write_num(worksheet, row, 2, *rate)?;
            write_num(worksheet, row, 3, *cost)?;
            row += 1;
        }
        Ok(row)
    }

    fn write_metrics(&self, worksheet: &mut Worksheet, start: u32) -> EstimatorResult<u32> {
        let result = &self.report.result;
        let metrics = [
            (REVISED_DATA_POINTS, result.revised_data_point),
            (SCALING_FACTOR, result.scaling_factor),
            (BASE_COST, result.base_cost),
            (ADJUSTED_COST, result.adjusted_cost),
            (PLATFORM_COST, result.platform_cost),
            (COMPANY_PROFIT, result.profit),
            (FINAL_ESTIMATE, result.final_estimate),
        ];

        let mut row = start;
        for (label, value) in metrics {
            write_str(worksheet, row, 0, label)?;
            write_num(worksheet, row, 1, value)?;
            row += 1;
        }
        Ok(row)
    }

    fn write_resources(
        &self,
        worksheet: &mut Worksheet,
        start: u32,
        header: &Format,
    ) -> EstimatorResult<u32> {
        write_header(worksheet, start, &RESOURCE_HEADER, header)?;

        let mut row = start + 1;
        for CostedResource { row: resource, cost } in &self.report.resources {
            if let Some(role) = resource.role.as_deref() {
                write_str(worksheet, row, 0, role)?;
            }
            for (col, value) in [(1, resource.count), (2, resource.hours), (3, resource.rate)] {
                if let Some(v) = value {
                    write_num(worksheet, row, col, v)?;
                }
            }
            if let Some(location) = resource.location {
                write_str(worksheet, row, 4, location.as_str())?;
            }
            write_num(worksheet, row, 5, *cost)?;
            row += 1;
        }
        Ok(row)
    }
}

fn write_header(
    worksheet: &mut Worksheet,
    row: u32,
    labels: &[&str],
    format: &Format,
) -> EstimatorResult<()> {
    for (col, label) in labels.iter().enumerate() {
        worksheet
            .write_string_with_format(row, col as u16, *label, format)
            .map_err(|e| EstimatorError::Export(format!("Failed to write header: {}", e)))?;
    }
    Ok(())
}

fn write_str(worksheet: &mut Worksheet, row: u32, col: u16, value: &str) -> EstimatorResult<()> {
    worksheet
        .write_string(row, col, value)
        .map_err(|e| EstimatorError::Export(format!("Failed to write text: {}", e)))?;
    Ok(())
}

fn write_num(worksheet: &mut Worksheet, row: u32, col: u16, value: f64) -> EstimatorResult<()> {
    worksheet
        .write_number(row, col, value)
        .map_err(|e| EstimatorError::Export(format!("Failed to write number: {}", e)))?;
    Ok(())
}
