//! Fixtures for tests
use crate::demand::DemandMap;
use crate::index::IndexSets;
use crate::location::{LocationParameterMap, LocationParameters};
use crate::model::Model;
use rstest::fixture;
use std::iter;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Aggregated demand for two products over two periods at one location.
///
/// T2 appears only via a zero-quantity entry for P1; P2 has no recorded demand
/// at T2 at all.
#[fixture]
pub fn demand() -> DemandMap {
    [
        (("P1".into(), "T1".into(), "L1".into()), 30.0),
        (("P2".into(), "T1".into(), "L1".into()), 20.0),
        (("P1".into(), "T2".into(), "L1".into()), 0.0),
    ]
    .into_iter()
    .collect()
}

#[fixture]
pub fn location_parameters() -> LocationParameterMap {
    iter::once((
        "L1".into(),
        LocationParameters {
            location_id: "L1".into(),
            holding_cost: 2.0,
            holding_capacity: 100.0,
        },
    ))
    .collect()
}

#[fixture]
pub fn model(demand: DemandMap, location_parameters: LocationParameterMap) -> Model {
    let indices = IndexSets::from_demand(&demand);
    Model {
        demand,
        indices,
        location_parameters,
    }
}
