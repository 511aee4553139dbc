//! Code for reading per-location parameters from CSV files.
use crate::id::define_id_type;
use crate::input::{deserialise_nonnegative, input_err_msg, read_csv};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

const LOCATIONS_FILE_NAME: &str = "locations.csv";

define_id_type!(LocationID);

/// Static parameters for a single location
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LocationParameters {
    /// The location these parameters apply to
    pub location_id: LocationID,
    /// The cost of holding one unit of inventory at this location for one period
    #[serde(deserialize_with = "deserialise_nonnegative")]
    pub holding_cost: f64,
    /// The maximum combined inventory this location can hold in any period
    #[serde(deserialize_with = "deserialise_nonnegative")]
    pub holding_capacity: f64,
}

/// A map of [`LocationParameters`] keyed by location ID
pub type LocationParameterMap = IndexMap<LocationID, LocationParameters>;

/// Read location parameters from an iterator, checking for duplicates
fn read_location_parameters_from_iter<I>(iter: I) -> Result<LocationParameterMap>
where
    I: IntoIterator<Item = LocationParameters>,
{
    let mut params = LocationParameterMap::new();
    for entry in iter {
        let location_id = entry.location_id.clone();
        ensure!(
            params.insert(location_id.clone(), entry).is_none(),
            "Duplicate parameter entry for location {location_id}"
        );
    }

    Ok(params)
}

/// Read the locations file.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model input files
///
/// # Returns
///
/// The parameters for every listed location, keyed by location ID.
pub fn read_location_parameters(model_dir: &Path) -> Result<LocationParameterMap> {
    let file_path = model_dir.join(LOCATIONS_FILE_NAME);
    let entries: Vec<LocationParameters> = read_csv(&file_path)?;
    read_location_parameters_from_iter(entries).with_context(|| input_err_msg(&file_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    fn create_locations_file(dir_path: &Path) {
        let file_path = dir_path.join(LOCATIONS_FILE_NAME);
        let mut file = File::create(file_path).unwrap();
        writeln!(
            file,
            "location_id,holding_cost,holding_capacity
L1,2,100
L2,1.5,250"
        )
        .unwrap();
    }

    #[test]
    fn test_read_location_parameters() {
        let dir = tempdir().unwrap();
        create_locations_file(dir.path());
        let params = read_location_parameters(dir.path()).unwrap();
        assert_eq!(
            params,
            LocationParameterMap::from_iter([
                (
                    "L1".into(),
                    LocationParameters {
                        location_id: "L1".into(),
                        holding_cost: 2.0,
                        holding_capacity: 100.0,
                    }
                ),
                (
                    "L2".into(),
                    LocationParameters {
                        location_id: "L2".into(),
                        holding_cost: 1.5,
                        holding_capacity: 250.0,
                    }
                ),
            ])
        );
    }

    #[test]
    fn test_read_location_parameters_from_iter_duplicate() {
        let entry = LocationParameters {
            location_id: "L1".into(),
            holding_cost: 2.0,
            holding_capacity: 100.0,
        };
        let result = read_location_parameters_from_iter([entry.clone(), entry]);
        assert_error!(result, "Duplicate parameter entry for location L1");
    }

    #[test]
    fn test_read_location_parameters_rejects_negative_cost() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(LOCATIONS_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(
                file,
                "location_id,holding_cost,holding_capacity
L1,-2,100"
            )
            .unwrap();
        }

        assert!(read_location_parameters(dir.path()).is_err());
    }
}
