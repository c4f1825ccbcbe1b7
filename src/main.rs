use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use unified_estimator::cli::{self, AdjustmentOverrides};
use unified_estimator::error::EstimatorResult;

#[derive(Parser)]
#[command(name = "estimator")]
#[command(about = "Implementation cost estimator with Excel export")]
#[command(long_about = "Estimator - task-driven implementation cost estimates

Each estimate combines a module's task inputs (quantity × rate) into a
scaling factor, applies it to the cost of the resource roster, and adds
platform and profit markups.

COMMANDS:
  modules    - List the built-in estimation modules
  init       - Write a template estimate file for a module
  calculate  - Show the cost breakdown of an estimate file
  export     - Write the estimate to Excel (.xlsx)
  import     - Read an exported workbook back into an estimate file
  watch      - Recalculate whenever the estimate file is saved

EXAMPLES:
  estimator init rule.yaml --module \"Rule Implementation\"
  estimator calculate rule.yaml --scaling 1.25
  estimator export rule.yaml Rule_Implementation_Estimate.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Adjustment flags shared by calculate and export
#[derive(Args, Debug, Clone, Copy)]
struct AdjustmentArgs {
    /// Platform adjustment multiplier (e.g. 0.6)
    #[arg(long)]
    platform: Option<f64>,

    /// Company profit margin (e.g. 0.5)
    #[arg(long)]
    profit: Option<f64>,

    /// Override the computed scaling factor
    #[arg(long)]
    scaling: Option<f64>,
}

impl From<AdjustmentArgs> for AdjustmentOverrides {
    fn from(args: AdjustmentArgs) -> Self {
        Self {
            platform_multiplier: args.platform,
            profit_margin: args.profit,
            scaling_factor: args.scaling,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in estimation modules
    Modules,

    /// Write a template estimate file pre-filled with a module's defaults
    Init {
        /// Output YAML file
        output: PathBuf,

        /// Module name (e.g. "Rule Implementation" or rule-implementation)
        #[arg(short, long, default_value = "Rule Implementation")]
        module: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the cost breakdown of an estimate file
    Calculate {
        /// Path to estimate YAML file
        file: PathBuf,

        #[command(flatten)]
        adjustments: AdjustmentArgs,

        /// Show the resource roster too
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Export an estimate to Excel .xlsx format.

The workbook has a single sheet named \"<module> Estimate\" with, in order:
project details, task table, calculated metrics and resource table.

When no output path is given the file is written next to the input as
<Module_Name>_Estimate.xlsx.")]
    /// Export an estimate to Excel .xlsx
    Export {
        /// Path to estimate YAML file
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        output: Option<PathBuf>,

        #[command(flatten)]
        adjustments: AdjustmentArgs,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Import an exported estimate workbook into a YAML estimate file
    Import {
        /// Path to Excel file (.xlsx)
        input: PathBuf,

        /// Output YAML file path
        output: PathBuf,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Recalculate whenever the estimate file changes
    Watch {
        /// Path to estimate YAML file
        file: PathBuf,

        /// Show the resource roster too
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> EstimatorResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Modules => cli::modules(),

        Commands::Init {
            output,
            module,
            force,
        } => cli::init(output, module, force),

        Commands::Calculate {
            file,
            adjustments,
            verbose,
        } => cli::calculate(file, adjustments.into(), verbose),

        Commands::Export {
            input,
            output,
            adjustments,
            verbose,
        } => cli::export(input, output, adjustments.into(), verbose),

        Commands::Import {
            input,
            output,
            verbose,
        } => cli::import(input, output, verbose),

        Commands::Watch { file, verbose } => cli::watch(file, verbose),
    }
}
