//! Code for reading and aggregating raw order data.
//!
//! Orders are grouped by (product, time period, location) and their quantities
//! summed. A triple absent from the aggregated table means "no recorded
//! demand", not a demand of zero; constraint construction relies on this
//! distinction.
use crate::id::define_id_type;
use crate::input::{deserialise_nonnegative, read_csv};
use crate::location::LocationID;
use anyhow::Result;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

const ORDERS_FILE_NAME: &str = "orders.csv";

define_id_type!(ProductID);
define_id_type!(PeriodID);

/// A single order record in the raw input data
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OrderRecord {
    /// The product (group) the order is for
    pub product_id: ProductID,
    /// The time period the order falls in
    pub time_period: PeriodID,
    /// The location fulfilling the order
    pub location_id: LocationID,
    /// The ordered quantity. Must be non-negative.
    #[serde(deserialize_with = "deserialise_nonnegative")]
    pub quantity: f64,
}

/// Total demand per (product, period, location) triple.
///
/// Entries appear in order of first occurrence in the input data, which keeps
/// variable and constraint enumeration reproducible across runs.
pub type DemandMap = IndexMap<(ProductID, PeriodID, LocationID), f64>;

/// Aggregate order records by summing quantities over each distinct triple
pub fn aggregate_orders<I>(iter: I) -> DemandMap
where
    I: IntoIterator<Item = OrderRecord>,
{
    let mut demand = DemandMap::new();
    for record in iter {
        *demand
            .entry((record.product_id, record.time_period, record.location_id))
            .or_insert(0.0) += record.quantity;
    }

    demand
}

/// Read the orders file and aggregate it into a [`DemandMap`].
///
/// # Arguments
///
/// * `model_dir` - Folder containing model input files
pub fn read_demand(model_dir: &Path) -> Result<DemandMap> {
    let file_path = model_dir.join(ORDERS_FILE_NAME);
    let records: Vec<OrderRecord> = read_csv(&file_path)?;
    let demand = aggregate_orders(records);
    debug!(
        "Aggregated demand over {} distinct (product, period, location) triples",
        demand.len()
    );

    Ok(demand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn key(product_id: &str, time_period: &str, location_id: &str) -> (ProductID, PeriodID, LocationID) {
        (product_id.into(), time_period.into(), location_id.into())
    }

    fn order(product_id: &str, time_period: &str, location_id: &str, quantity: f64) -> OrderRecord {
        OrderRecord {
            product_id: product_id.into(),
            time_period: time_period.into(),
            location_id: location_id.into(),
            quantity,
        }
    }

    #[test]
    fn test_aggregate_orders_sums_quantities() {
        let demand = aggregate_orders([
            order("P1", "T1", "L1", 10.0),
            order("P1", "T1", "L1", 20.0),
            order("P2", "T1", "L1", 5.0),
        ]);

        assert_eq!(demand.len(), 2);
        assert_eq!(demand[&key("P1", "T1", "L1")], 30.0);
        assert_eq!(demand[&key("P2", "T1", "L1")], 5.0);
    }

    #[test]
    fn test_aggregate_orders_preserves_first_occurrence_order() {
        let demand = aggregate_orders([
            order("P2", "T1", "L1", 1.0),
            order("P1", "T2", "L2", 2.0),
            order("P2", "T1", "L1", 3.0),
        ]);

        let keys: Vec<_> = demand.keys().cloned().collect();
        assert_eq!(keys, vec![key("P2", "T1", "L1"), key("P1", "T2", "L2")]);
    }

    #[test]
    fn test_aggregate_orders_keeps_zero_quantity_triples() {
        // A zero-quantity order is still an observed triple, unlike an absent one
        let demand = aggregate_orders([order("P1", "T1", "L1", 0.0)]);
        assert_eq!(demand.len(), 1);
        assert_eq!(demand[&key("P1", "T1", "L1")], 0.0);
    }

    #[test]
    fn test_read_demand() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(ORDERS_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(
                file,
                "product_id,time_period,location_id,quantity
P1,T1,L1,30
P2,T1,L1,15
P2,T1,L1,5"
            )
            .unwrap();
        }

        let demand = read_demand(dir.path()).unwrap();
        assert_eq!(demand.len(), 2);
        assert_eq!(demand[&key("P1", "T1", "L1")], 30.0);
        assert_eq!(demand[&key("P2", "T1", "L1")], 20.0);
    }

    #[test]
    fn test_read_demand_rejects_negative_quantity() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(ORDERS_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(
                file,
                "product_id,time_period,location_id,quantity
P1,T1,L1,-30"
            )
            .unwrap();
        }

        assert!(read_demand(dir.path()).is_err());
    }

    #[test]
    fn test_read_demand_rejects_missing_field() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(ORDERS_FILE_NAME);
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(
                file,
                "product_id,time_period,location_id
P1,T1,L1"
            )
            .unwrap();
        }

        assert!(read_demand(dir.path()).is_err());
    }
}
