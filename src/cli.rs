//! The command line interface for the program.
use crate::log;
use crate::model::Model;
use crate::optimisation::{SolveOutcome, build_problem};
use crate::output::{create_output_directory, get_output_dir, write_inventory_levels_to_csv};
use crate::settings::Settings;
use ::log::info;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// The command line interface for the program.
#[derive(Parser)]
#[command(version, about, arg_required_else_help = true)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Formulate and solve an inventory model.
    Run {
        /// Path to the model directory.
        model_dir: PathBuf,
        /// Directory for output files.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Load and formulate a model without solving it.
    Validate {
        /// Path to the model directory.
        model_dir: PathBuf,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run {
                model_dir,
                output_dir,
            } => handle_run_command(&model_dir, output_dir.as_deref()),
            Self::Validate { model_dir } => handle_validate_command(&model_dir),
        }
    }
}

/// Parse CLI arguments and start the program
pub fn run_cli() -> Result<()> {
    Cli::parse().command.execute()
}

/// Handle the `run` command.
pub fn handle_run_command(model_dir: &Path, output_dir: Option<&Path>) -> Result<()> {
    let settings = Settings::from_path(model_dir)?;
    log::init(settings.log_level.as_deref()).context("Failed to initialise logging.")?;

    let model = Model::from_path(model_dir).context("Failed to load model.")?;
    info!(
        "Loaded model with {} products, {} locations and {} time periods",
        model.indices.products.len(),
        model.indices.locations.len(),
        model.indices.periods.len()
    );

    let problem = build_problem(&model)?;
    info!(
        "Formulated problem with {} variables and {} constraints",
        problem.num_variables(),
        problem.num_constraints()
    );

    let solution = match problem.solve(settings.solver_time_limit)? {
        SolveOutcome::Optimal(solution) => solution,
        SolveOutcome::Infeasible => bail!("Model is infeasible"),
        SolveOutcome::Unbounded => bail!("Model is unbounded"),
        SolveOutcome::TimedOut => bail!("Solver timed out"),
    };
    info!("Optimal objective value: {}", solution.objective_value());

    // Write results to the user-supplied output directory, if any, else a
    // directory named after the model
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = output_dir {
        p
    } else {
        pathbuf = get_output_dir(model_dir)?;
        &pathbuf
    };
    create_output_directory(output_path).context("Failed to create output directory.")?;
    write_inventory_levels_to_csv(output_path, &solution)?;
    info!("Inventory levels written to {}", output_path.display());

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(model_dir: &Path) -> Result<()> {
    let settings = Settings::from_path(model_dir)?;
    log::init(settings.log_level.as_deref()).context("Failed to initialise logging.")?;

    let model = Model::from_path(model_dir).context("Failed to load model.")?;
    let problem = build_problem(&model)?;
    info!(
        "Model is valid ({} variables, {} constraints)",
        problem.num_variables(),
        problem.num_constraints()
    );

    Ok(())
}
