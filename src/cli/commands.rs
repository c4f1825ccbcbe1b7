use crate::catalog::EstimationModule;
use crate::core::estimate;
use crate::error::{EstimatorError, EstimatorResult};
use crate::excel::{EstimateExporter, EstimateImporter};
use crate::parser;
use crate::types::{default_file_name, Adjustments, EstimateReport};
use crate::writer;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Command-line replacements for the input file's adjustments
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdjustmentOverrides {
    pub platform_multiplier: Option<f64>,
    pub profit_margin: Option<f64>,
    pub scaling_factor: Option<f64>,
}

impl AdjustmentOverrides {
    pub fn apply(&self, adjustments: &mut Adjustments) {
        if let Some(p) = self.platform_multiplier {
            adjustments.platform_multiplier = p;
        }
        if let Some(p) = self.profit_margin {
            adjustments.profit_margin = p;
        }
        if let Some(s) = self.scaling_factor {
            adjustments.override_scaling_factor = Some(s);
        }
    }
}

/// Format a number with thousands separators and fixed decimals
pub fn format_amount(n: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if n < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn money(n: f64) -> String {
    format!("${}", format_amount(n, 2))
}

fn load_report(file: &Path, overrides: &AdjustmentOverrides) -> EstimatorResult<EstimateReport> {
    let mut input = parser::parse_estimate(file)?;
    overrides.apply(&mut input.adjustments);
    parser::validate_input(&input)?;
    estimate(&input)
}

/// Execute the modules command
pub fn modules() -> EstimatorResult<()> {
    println!("{}", "🧩 Estimation Modules".bold().green());
    for module in EstimationModule::all() {
        println!(
            "   {} ({} tasks)",
            module.name().bright_blue().bold(),
            module.default_tasks().len()
        );
    }
    Ok(())
}

/// Execute the init command - write a template input file
pub fn init(output: PathBuf, module: String, force: bool) -> EstimatorResult<()> {
    let module = EstimationModule::from_name(&module)?;

    if output.exists() && !force {
        return Err(EstimatorError::Validation(format!(
            "'{}' already exists (use --force to overwrite)",
            output.display()
        )));
    }

    writer::write_estimate(&output, &module.template())?;

    println!("{}", "🧮 Estimator - Template Created".bold().green());
    println!("   Module: {}", module.name().bright_blue().bold());
    println!("   File:   {}", output.display());
    Ok(())
}

/// Execute the calculate command
pub fn calculate(
    file: PathBuf,
    overrides: AdjustmentOverrides,
    verbose: bool,
) -> EstimatorResult<()> {
    println!("{}", "🧮 Estimator - Calculating estimate".bold().green());
    println!("   File: {}\n", file.display());

    if verbose {
        println!("{}", "📖 Parsing estimate file...".cyan());
    }

    let report = load_report(&file, &overrides)?;
    print_report(&report, verbose);
    Ok(())
}

/// Print the task table, metrics and cost breakdown of a report
pub fn print_report(report: &EstimateReport, verbose: bool) {
    println!("   Module: {}", report.module.bright_blue().bold());
    if !report.project.project_name.is_empty() {
        println!("   Project: {}", report.project.project_name);
    }
    println!();

    println!("{}", "📐 Task Inputs (Quantity × Rate)".bold().cyan());
    for task in &report.tasks {
        println!(
            "   {:<34} {:>12} × {:<10} = {}",
            task.label,
            format_amount(task.quantity, 2),
            format_amount(task.rate, 4),
            format!("${}", format_amount(task.cost, 4)).bold()
        );
    }
    println!();

    let result = &report.result;
    println!("{}", "📈 Calculated Metrics".bold().cyan());
    println!(
        "   Revised Data Points:     {}",
        format_amount(result.revised_data_point, 4)
    );
    println!("   Scaling Factor:          {:.4}", result.scaling_factor);
    println!();

    if verbose {
        println!("{}", "✏️  Resource Allocation".bold().cyan());
        for resource in &report.resources {
            let row = &resource.row;
            println!(
                "   {:<20} {:>5} × {:>7} h @ {:>8} {:<9} = {}",
                row.role.as_deref().unwrap_or("-"),
                row.count.map_or("-".to_string(), |v| v.to_string()),
                row.hours.map_or("-".to_string(), |v| v.to_string()),
                row.rate.map_or("-".to_string(), |v| format_amount(v, 2)),
                row.location.map_or("-", |l| l.as_str()),
                money(resource.cost)
            );
        }
        println!();
    }

    for warning in &report.warnings {
        println!("{} {}", "❌".red(), warning.red());
    }

    println!("{}", "📊 Cost Breakdown".bold().cyan());
    println!("   Base Cost:                    {}", money(result.base_cost));
    println!(
        "   Adjusted Cost (× {:.4}):     {}",
        result.scaling_factor,
        money(result.adjusted_cost)
    );
    println!(
        "   Platform Adjustment:          {}",
        money(result.platform_cost)
    );
    println!("   Company Profit:               {}", money(result.profit));
    println!(
        "\n{} {}",
        "✅ Final Estimate:".bold().green(),
        money(result.final_estimate).bold()
    );
}

/// Execute the export command
pub fn export(
    input: PathBuf,
    output: Option<PathBuf>,
    overrides: AdjustmentOverrides,
    verbose: bool,
) -> EstimatorResult<()> {
    println!("{}", "🧮 Estimator - Excel Export".bold().green());
    println!("   Input:  {}", input.display());

    if verbose {
        println!("{}", "📖 Parsing estimate file...".cyan());
    }
    let report = load_report(&input, &overrides)?;

    let output = output.unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(default_file_name(&report.module))
    });
    println!("   Output: {}\n", output.display());

    if verbose {
        println!(
            "   {} tasks, {} resources",
            report.tasks.len(),
            report.resources.len()
        );
        println!("{}", "📊 Exporting to Excel...".cyan());
    }
    for warning in &report.warnings {
        println!("{} {}", "❌".red(), warning.red());
    }

    let final_estimate = report.result.final_estimate;
    let sheet = report.sheet_name();
    EstimateExporter::new(report).export(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Sheet: {}", sheet);
    println!("   Final Estimate: {}", money(final_estimate).bold());
    println!("   Excel file: {}\n", output.display());
    Ok(())
}

/// Execute the import command
pub fn import(input: PathBuf, output: PathBuf, verbose: bool) -> EstimatorResult<()> {
    println!("{}", "🧮 Estimator - Excel Import".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }

    let estimate_input = EstimateImporter::new(&input).import()?;
    parser::validate_input(&estimate_input)?;

    if verbose {
        println!("   Module: {}", estimate_input.module.bright_blue());
        println!(
            "   {} tasks, {} resources\n",
            estimate_input.tasks.len(),
            estimate_input.resources.len()
        );
        println!("{}", "💾 Writing YAML file...".cyan());
    }

    writer::write_estimate(&output, &estimate_input)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   YAML file: {}\n", output.display());
    Ok(())
}

/// Execute the watch command
pub fn watch(file: PathBuf, verbose: bool) -> EstimatorResult<()> {
    println!("{}", "👁️  Estimator - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(EstimatorError::Validation(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize()?;
    let parent_dir = canonical_path.parent().ok_or_else(|| {
        EstimatorError::Validation("Cannot determine parent directory".to_string())
    })?;

    let (tx, rx) = channel();

    // Editors write in several steps; debounce so one save means one run
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| EstimatorError::Validation(format!("Failed to create file watcher: {}", e)))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| EstimatorError::Validation(format!("Failed to watch directory: {}", e)))?;

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&file, verbose);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    event.kind == DebouncedEventKind::Any
                        && event.path.file_name() == canonical_path.file_name()
                });

                if relevant {
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        chrono::Local::now().format("%H:%M:%S").to_string().cyan()
                    );
                    run_watch_action(&file, verbose);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn run_watch_action(file: &Path, verbose: bool) {
    match load_report(file, &AdjustmentOverrides::default()) {
        Ok(report) => print_report(&report, verbose),
        Err(e) => println!("{} {}", "❌ Calculation failed:".bold().red(), e),
    }
}
