//! The module responsible for writing output data to disk.
use crate::demand::{PeriodID, ProductID};
use crate::location::LocationID;
use crate::optimisation::Solution;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "invplan_results";

/// The output file name for inventory levels
const INVENTORY_LEVELS_FILE_NAME: &str = "inventory_levels.csv";

/// Get the default output directory for the model at the specified path
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Canonicalise in case the user has specified "."
    let model_dir = model_dir
        .canonicalize()
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create the output directory for the model, if it does not already exist
pub fn create_output_directory(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        // already exists
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    Ok(())
}

/// Represents a single inventory level in the output CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct InventoryRow {
    product_id: ProductID,
    location_id: LocationID,
    time_period: PeriodID,
    level: f64,
}

/// Write the optimal inventory levels to a CSV file.
///
/// Rows are written in the order the variables were created, so output is
/// stable for a given input.
///
/// # Arguments
///
/// * `output_path` - The directory to write the file to
/// * `solution` - The optimal solution
pub fn write_inventory_levels_to_csv(output_path: &Path, solution: &Solution) -> Result<()> {
    let file_path = output_path.join(INVENTORY_LEVELS_FILE_NAME);
    let mut writer = csv::Writer::from_path(&file_path)
        .with_context(|| format!("Could not create {}", file_path.to_string_lossy()))?;

    for (product_id, location_id, period, level) in solution.iter_levels() {
        writer.serialize(InventoryRow {
            product_id: product_id.clone(),
            location_id: location_id.clone(),
            time_period: period.clone(),
            level,
        })?;
    }
    writer.flush()?;

    Ok(())
}
