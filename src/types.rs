use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Task Entries
//==============================================================================

/// One labeled (quantity, rate) pair feeding the multiplicative aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub label: String,
    pub quantity: f64,
    pub rate: f64,
}

impl TaskEntry {
    pub fn new(label: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            label: label.into(),
            quantity,
            rate,
        }
    }

    pub fn cost(&self) -> f64 {
        self.quantity * self.rate
    }
}

/// A task entry with its computed cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostedTask {
    pub label: String,
    pub quantity: f64,
    pub rate: f64,
    pub cost: f64,
}

impl From<&TaskEntry> for CostedTask {
    fn from(entry: &TaskEntry) -> Self {
        Self {
            label: entry.label.clone(),
            quantity: entry.quantity,
            rate: entry.rate,
            cost: entry.cost(),
        }
    }
}

//==============================================================================
// Resource Entries
//==============================================================================

/// Where a resource is staffed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Location {
    #[default]
    Onsite,
    Offshore,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Onsite => "Onsite",
            Location::Offshore => "Offshore",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "onsite" | "on-site" => Ok(Location::Onsite),
            "offshore" => Ok(Location::Offshore),
            other => Err(format!(
                "Unknown location '{}'. Expected Onsite or Offshore",
                other
            )),
        }
    }
}

/// A fully specified staffing line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub role: String,
    pub count: f64,
    pub hours: f64,
    pub hourly_rate: f64,
    pub location: Location,
}

impl ResourceEntry {
    pub fn new(
        role: impl Into<String>,
        count: f64,
        hours: f64,
        hourly_rate: f64,
        location: Location,
    ) -> Self {
        Self {
            role: role.into(),
            count,
            hours,
            hourly_rate,
            location,
        }
    }

    pub fn cost(&self) -> f64 {
        self.count * self.hours * self.hourly_rate
    }
}

/// A roster line as edited by a user: any field may be absent.
///
/// Count, hours and rate are required for costing. Role and location are
/// carried through to the export as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(alias = "hourly_rate", skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl ResourceRow {
    /// Names of the required costing fields absent from this row
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.count.is_none() {
            missing.push("count");
        }
        if self.hours.is_none() {
            missing.push("hours");
        }
        if self.rate.is_none() {
            missing.push("rate");
        }
        missing
    }

    /// Convert to a strict entry, or return the missing field names
    pub fn to_entry(&self) -> Result<ResourceEntry, Vec<&'static str>> {
        match (self.count, self.hours, self.rate) {
            (Some(count), Some(hours), Some(rate)) => Ok(ResourceEntry {
                role: self.role.clone().unwrap_or_default(),
                count,
                hours,
                hourly_rate: rate,
                location: self.location.unwrap_or_default(),
            }),
            _ => Err(self.missing_fields()),
        }
    }
}

impl From<ResourceEntry> for ResourceRow {
    fn from(entry: ResourceEntry) -> Self {
        Self {
            role: Some(entry.role),
            count: Some(entry.count),
            hours: Some(entry.hours),
            rate: Some(entry.hourly_rate),
            location: Some(entry.location),
        }
    }
}

/// A roster line with its computed cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostedResource {
    #[serde(flatten)]
    pub row: ResourceRow,
    pub cost: f64,
}

//==============================================================================
// Estimation Result
//==============================================================================

/// The full cost cascade for one estimate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimationResult {
    pub revised_data_point: f64,
    /// The factor actually applied to the base cost (override when given)
    pub scaling_factor: f64,
    pub base_cost: f64,
    pub adjusted_cost: f64,
    pub platform_cost: f64,
    pub profit: f64,
    pub final_estimate: f64,
}

//==============================================================================
// Estimate Input / Report
//==============================================================================

/// Negotiation adjustments applied on top of the base cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub platform_multiplier: f64,
    pub profit_margin: f64,
    /// Replaces the computed scaling factor when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_scaling_factor: Option<f64>,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            platform_multiplier: 0.6,
            profit_margin: 0.5,
            override_scaling_factor: None,
        }
    }
}

/// Descriptive project metadata carried into the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDetails {
    pub project_name: String,
    pub user_story: String,
    pub sub_story: String,
    pub task_name: String,
    pub use_override: bool,
}

impl Default for ProjectDetails {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            user_story: String::new(),
            sub_story: String::new(),
            task_name: String::new(),
            use_override: true,
        }
    }
}

/// Everything needed to compute one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub module: String,
    #[serde(default)]
    pub project: ProjectDetails,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
    #[serde(default)]
    pub resources: Vec<ResourceRow>,
    #[serde(default)]
    pub adjustments: Adjustments,
}

impl EstimateInput {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            project: ProjectDetails::default(),
            tasks: Vec::new(),
            resources: Vec::new(),
            adjustments: Adjustments::default(),
        }
    }
}

/// A computed estimate, ready for display or export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub module: String,
    pub project: ProjectDetails,
    pub tasks: Vec<CostedTask>,
    pub resources: Vec<CostedResource>,
    pub result: EstimationResult,
    /// Non-fatal problems, e.g. the zero-cost roster fallback
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EstimateReport {
    /// Worksheet name used by the Excel export
    pub fn sheet_name(&self) -> String {
        format!("{} Estimate", self.module)
    }

    /// Default workbook file name, e.g. `Rule_Implementation_Estimate.xlsx`
    pub fn default_file_name(&self) -> String {
        default_file_name(&self.module)
    }
}

/// Default workbook file name for a module.
///
/// Whitespace, quotes, path separators and control characters become `_`.
pub fn default_file_name(module: &str) -> String {
    let stem: String = module
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_Estimate.xlsx", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_cost() {
        let task = TaskEntry::new("A. Rating Rules", 10.0, 0.1);
        assert!((task.cost() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_location_parse() {
        assert_eq!("offshore".parse::<Location>().unwrap(), Location::Offshore);
        assert_eq!(" Onsite ".parse::<Location>().unwrap(), Location::Onsite);
        assert!("moon".parse::<Location>().is_err());
    }

    #[test]
    fn test_resource_row_missing_fields() {
        let row = ResourceRow {
            role: Some("QA".to_string()),
            count: Some(2.0),
            ..Default::default()
        };
        assert_eq!(row.missing_fields(), vec!["hours", "rate"]);
        assert_eq!(row.to_entry().unwrap_err(), vec!["hours", "rate"]);
    }

    #[test]
    fn test_resource_row_to_entry_defaults() {
        let row = ResourceRow {
            count: Some(1.0),
            hours: Some(8.0),
            rate: Some(10.0),
            ..Default::default()
        };
        let entry = row.to_entry().unwrap();
        assert_eq!(entry.role, "");
        assert_eq!(entry.location, Location::Onsite);
        assert_eq!(entry.cost(), 80.0);
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            default_file_name("Rule Implementation"),
            "Rule_Implementation_Estimate.xlsx"
        );
        assert_eq!(default_file_name("Rule \"Q\"/v2"), "Rule__Q__v2_Estimate.xlsx");
    }

    #[test]
    fn test_adjustments_default() {
        let adj = Adjustments::default();
        assert_eq!(adj.platform_multiplier, 0.6);
        assert_eq!(adj.profit_margin, 0.5);
        assert!(adj.override_scaling_factor.is_none());
    }
}
