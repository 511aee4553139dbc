//! Code for deriving index sets from aggregated demand.
use crate::demand::{DemandMap, PeriodID, ProductID};
use crate::location::LocationID;
use indexmap::IndexSet;

/// The distinct products, time periods and locations observed in the demand data.
///
/// Each set preserves the order of first occurrence in the aggregated demand
/// table, so variable and constraint enumeration is stable for a given input.
/// The sets are always derived from the data, never configured.
#[derive(Debug, Default, PartialEq)]
pub struct IndexSets {
    /// The distinct product IDs
    pub products: IndexSet<ProductID>,
    /// The distinct time period IDs
    pub periods: IndexSet<PeriodID>,
    /// The distinct location IDs
    pub locations: IndexSet<LocationID>,
}

impl IndexSets {
    /// Derive the index sets by projecting each dimension of the demand table
    pub fn from_demand(demand: &DemandMap) -> Self {
        let mut index_sets = Self::default();
        for (product_id, period, location_id) in demand.keys() {
            index_sets.products.insert(product_id.clone());
            index_sets.periods.insert(period.clone());
            index_sets.locations.insert(location_id.clone());
        }

        index_sets
    }
}
