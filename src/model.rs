//! Code for inventory models.
//!
//! A model bundles the aggregated demand table, the index sets derived from it
//! and the per-location parameters; together these are the input to problem
//! formulation.
use crate::demand::{DemandMap, read_demand};
use crate::index::IndexSets;
use crate::location::{LocationParameterMap, read_location_parameters};
use anyhow::Result;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Errors that can occur while assembling an inventory model.
///
/// These are formulation-stage errors: they abort model construction before any
/// solve attempt is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A location observed in the orders has no parameter entry
    MissingLocationParameter(String),
    /// One of the derived index sets is empty, making the model degenerate
    EmptyIndexSet(&'static str),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MissingLocationParameter(location_id) => {
                write!(f, "No parameters for location {location_id}")
            }
            ModelError::EmptyIndexSet(dimension) => {
                write!(f, "Index set for {dimension} is empty")
            }
        }
    }
}

impl Error for ModelError {}

/// Model definition
#[derive(Debug)]
pub struct Model {
    /// Aggregated demand per (product, period, location) triple
    pub demand: DemandMap,
    /// Index sets derived from the demand data
    pub indices: IndexSets,
    /// Per-location holding cost and capacity
    pub location_parameters: LocationParameterMap,
}

impl Model {
    /// Read a model from the specified directory.
    ///
    /// The directory must contain an orders file and a locations file. Fails if
    /// either file is malformed or if any observed location has no parameter
    /// entry.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model input files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
        let model_dir = model_dir.as_ref();
        let demand = read_demand(model_dir)?;
        let indices = IndexSets::from_demand(&demand);
        let location_parameters = read_location_parameters(model_dir)?;
        check_location_coverage(&indices, &location_parameters)?;

        Ok(Model {
            demand,
            indices,
            location_parameters,
        })
    }
}

/// Check that every location observed in the orders has a parameter entry
pub fn check_location_coverage(
    indices: &IndexSets,
    location_parameters: &LocationParameterMap,
) -> Result<(), ModelError> {
    for location_id in &indices.locations {
        if !location_parameters.contains_key(location_id) {
            return Err(ModelError::MissingLocationParameter(
                location_id.to_string(),
            ));
        }
    }

    Ok(())
}
