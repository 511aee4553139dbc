//! Common routines for handling input data.
use anyhow::{Context, Result, ensure};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::path::Path;

/// Read a series of records from a CSV file into a `Vec`.
///
/// Every row must deserialise successfully; a missing or malformed field aborts
/// the whole load rather than skipping the offending row.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(file_path).with_context(|| input_err_msg(file_path))?;

    let mut vec = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.with_context(|| input_err_msg(file_path))?;
        vec.push(record);
    }

    ensure!(
        !vec.is_empty(),
        "{}: CSV file cannot be empty",
        file_path.to_string_lossy()
    );

    Ok(vec)
}

/// Format a standard error message for a problem with an input file
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().to_string_lossy())
}

/// Read an f64, checking that it is finite and non-negative
pub fn deserialise_nonnegative<'de, D>(deserialiser: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = Deserialize::deserialize(deserialiser)?;
    if !value.is_finite() || value < 0.0 {
        Err(serde::de::Error::custom(
            "Value must be finite and non-negative",
        ))?;
    }

    Ok(value)
}
