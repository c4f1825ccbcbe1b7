//! Built-in estimation modules and the default resource roster

use crate::error::{EstimatorError, EstimatorResult};
use crate::types::{EstimateInput, Location, ResourceEntry, ResourceRow, TaskEntry};
use std::fmt;
use std::str::FromStr;

/// The estimation templates shipped with the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationModule {
    RuleImplementation,
    UiImplementation,
    RatingImplementation,
    FormImplementation,
    DataTransformation,
}

type TaskDefinition = (&'static str, f64, f64);

const RULE_TASKS: &[TaskDefinition] = &[
    ("A. Rating Rules", 10.0, 0.1),
    ("B. Impacted Tables", 20.0, 0.1),
    ("C. Impacted Fields", 200.0, 0.1),
    ("D. Pages Impacted", 10.0, 0.1),
    ("E. Forms Impacted", 10.0, 0.1),
    ("F. PLSQL Lines", 50.0, 0.1),
    ("H. Programming Lines", 50.0, 0.1),
    ("I. Line of Business Adjustment", 1.0, 1.0),
    ("J. Complexity Factor", 1.0, 1.02),
];

const UI_TASKS: &[TaskDefinition] = &[
    ("A. Page Rules", 100.0, 0.01),
    ("B. Impacted Pages", 200.0, 0.02),
    ("C. Impacted Tables", 20.0, 0.05),
    ("D. Impacted Fields", 200.0, 0.01),
    ("E. Page Impacted", 10.0, 0.1),
    ("F. Forms Impacted", 10.0, 0.1),
    ("H. PLSQL Lines", 50.0, 0.1),
    ("I. Programming Lines", 50.0, 0.1),
    ("J. Line of Business Adjustment", 1.0, 2.0),
    ("K. Complexity Factor", 1.0, 1.02),
];

const RATING_TASKS: &[TaskDefinition] = &[
    ("A. Number of Rules", 10.0, 2.0),
    ("B. Rating Elements", 1.0, 1.0),
    ("C. Impacted Tables", 20.0, 1.0),
    ("D. Impacted Fields", 200.0, 1.0),
    ("E. Pages Impacted", 10.0, 1.0),
    ("G. Forms Impacted", 10.0, 0.1),
    ("H. PLSQL Lines", 50.0, 0.1),
    ("I. Programming Lines", 50.0, 0.1),
    ("J. Line of Business Adjustment", 2.0, 1.0),
    ("K. Complexity Factor", 1.0, 1.02),
];

const FORM_TASKS: &[TaskDefinition] = &[
    ("A. Number of Forms", 10.0, 2.0),
    ("B. Form Elements", 1.0, 1.0),
    ("C. Impacted Tables", 20.0, 1.0),
    ("D. Impacted Fields", 200.0, 1.0),
    ("E. Pages Impacted", 10.0, 1.0),
    ("G. Forms Impacted", 10.0, 0.1),
    ("H. PLSQL Lines", 50.0, 0.1),
    ("I. Programming Lines", 50.0, 0.1),
    ("J. Line of Business Adjustment", 2.0, 1.0),
    ("K. Complexity Factor", 1.0, 1.02),
];

const DATA_TRANSFORMATION_TASKS: &[TaskDefinition] = &[
    ("A. Number of Fields", 500.0, 10.0),
    ("B. Number of Policies", 90000.0, 100000.0),
    ("C. Transactions per Policy", 1.0, 1.0),
    ("D. Line of Business Adjustment", 1.0, 1.0),
    ("E. Complexity Factor", 1.0, 1.0),
];

impl EstimationModule {
    pub fn all() -> &'static [EstimationModule] {
        &[
            EstimationModule::RuleImplementation,
            EstimationModule::UiImplementation,
            EstimationModule::RatingImplementation,
            EstimationModule::FormImplementation,
            EstimationModule::DataTransformation,
        ]
    }

    /// Display name, also used for the worksheet and file name
    pub fn name(&self) -> &'static str {
        match self {
            EstimationModule::RuleImplementation => "Rule Implementation",
            EstimationModule::UiImplementation => "UI Implementation",
            EstimationModule::RatingImplementation => "Rating Implementation",
            EstimationModule::FormImplementation => "Form Implementation",
            EstimationModule::DataTransformation => "Data Transformation",
        }
    }

    /// Look up a module by display name or its kebab/snake form
    /// (`rule-implementation`, `rule_implementation`), ignoring case
    pub fn from_name(name: &str) -> EstimatorResult<Self> {
        let wanted = normalize(name);
        Self::all()
            .iter()
            .copied()
            .find(|m| normalize(m.name()) == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(|m| m.name()).collect();
                EstimatorError::Validation(format!(
                    "Unknown module '{}'. Available: {}",
                    name,
                    known.join(", ")
                ))
            })
    }

    fn definitions(&self) -> &'static [TaskDefinition] {
        match self {
            EstimationModule::RuleImplementation => RULE_TASKS,
            EstimationModule::UiImplementation => UI_TASKS,
            EstimationModule::RatingImplementation => RATING_TASKS,
            EstimationModule::FormImplementation => FORM_TASKS,
            EstimationModule::DataTransformation => DATA_TRANSFORMATION_TASKS,
        }
    }

    /// Task entries pre-filled with the module's default quantity and rate
    pub fn default_tasks(&self) -> Vec<TaskEntry> {
        self.definitions()
            .iter()
            .map(|(label, quantity, rate)| TaskEntry::new(*label, *quantity, *rate))
            .collect()
    }

    /// A ready-to-edit estimate input for this module
    pub fn template(&self) -> EstimateInput {
        let mut input = EstimateInput::new(self.name());
        input.tasks = self.default_tasks();
        input.resources = default_resources()
            .into_iter()
            .map(ResourceRow::from)
            .collect();
        input
    }
}

impl fmt::Display for EstimationModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EstimationModule {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// The staffing roster every template starts from
pub fn default_resources() -> Vec<ResourceEntry> {
    vec![
        ResourceEntry::new("Business Analyst", 1.0, 480.0, 32.18, Location::Offshore),
        ResourceEntry::new("Architect", 1.0, 480.0, 126.56, Location::Onsite),
        ResourceEntry::new("Sr. Engineer", 1.0, 480.0, 121.64, Location::Onsite),
        ResourceEntry::new("Sr. Engineer", 2.0, 480.0, 38.11, Location::Offshore),
        ResourceEntry::new("QA", 2.0, 480.0, 21.17, Location::Offshore),
        ResourceEntry::new("Delivery Manager", 1.0, 240.0, 124.64, Location::Onsite),
    ]
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', '_'], " ")
}
