//! First Fit strategy.

use crate::core::common::{Demand, FitVerdict};
use crate::core::placement_algorithm::PlacementAlgorithm;
use crate::core::resource_pool::ResourcePoolState;

/// Uses the first cluster in preference order with enough remaining
/// capacity. Together with the packer's largest-item-first ordering this is
/// the classic first-fit-decreasing heuristic and the default strategy.
#[derive(Clone)]
pub struct FirstFit;

impl FirstFit {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for FirstFit {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementAlgorithm for FirstFit {
    fn select_cluster(&self, demand: &Demand, order: &[String], pool: &ResourcePoolState) -> Option<String> {
        order
            .iter()
            .find(|id| pool.can_allocate(demand, id) == FitVerdict::Success)
            .cloned()
    }
}
