//! Code for loading program settings.
use crate::input::input_err_msg;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Program settings, read from an optional TOML file in the model directory
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    /// The program log level
    pub log_level: Option<String>,
    /// Maximum time in seconds the solver may run before giving up
    pub solver_time_limit: Option<f64>,
}

impl Settings {
    /// Read the settings file from the model directory.
    ///
    /// If the file is not present, default values for settings will be used.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model input files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<Settings> {
        let file_path = model_dir.as_ref().join(SETTINGS_FILE_NAME);
        if !file_path.is_file() {
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(&file_path).with_context(|| input_err_msg(&file_path))?;
        toml::from_str(&contents).with_context(|| input_err_msg(&file_path))
    }
}
