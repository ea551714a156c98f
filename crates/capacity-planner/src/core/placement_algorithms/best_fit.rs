//! Best Fit strategy.

use crate::core::common::{Demand, FitVerdict};
use crate::core::placement_algorithm::PlacementAlgorithm;
use crate::core::resource_pool::ResourcePoolState;

/// Uses the most loaded suitable cluster, i.e. the one with the least total
/// remaining capacity. Packs existing clusters tight before touching empty
/// ones.
#[derive(Clone)]
pub struct BestFit;

impl BestFit {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for BestFit {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementAlgorithm for BestFit {
    fn select_cluster(&self, demand: &Demand, order: &[String], pool: &ResourcePoolState) -> Option<String> {
        let mut result: Option<String> = None;
        let mut min_available_total = f64::MAX;

        for id in order {
            if pool.can_allocate(demand, id) == FitVerdict::Success {
                let available_total = pool.get_available_total(id);
                if available_total < min_available_total {
                    min_available_total = available_total;
                    result = Some(id.clone());
                }
            }
        }
        result
    }
}
