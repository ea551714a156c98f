//! Cluster selection strategies used by the bin packer.

use dyn_clone::{clone_trait_object, DynClone};

use crate::core::common::Demand;
use crate::core::config::parse_config_value;
use crate::core::error::ValidationError;
use crate::core::placement_algorithms::best_fit::BestFit;
use crate::core::placement_algorithms::first_fit::FirstFit;
use crate::core::placement_algorithms::threshold_fit::ThresholdFit;
use crate::core::resource_pool::ResourcePoolState;

/// Trait for implementation of cluster selection strategies.
///
/// A strategy is a function of one item's demand and the current remaining
/// capacity state, which returns the id of the cluster selected for the item
/// or `None` if no cluster is suitable. `order` lists cluster ids in the
/// packer's preference order (largest effective capacity first); strategies
/// must iterate it, not the pool, so selection stays deterministic.
pub trait PlacementAlgorithm: DynClone + Send {
    fn select_cluster(&self, demand: &Demand, order: &[String], pool: &ResourcePoolState) -> Option<String>;
}

clone_trait_object!(PlacementAlgorithm);

/// Resolves a placement algorithm from its config string, e.g. `FirstFit`
/// or `ThresholdFit[threshold=0.9]`.
pub fn placement_algorithm_resolver(config_str: &str) -> Result<Box<dyn PlacementAlgorithm>, ValidationError> {
    let (name, options) = parse_config_value(config_str);
    match name.as_str() {
        "FirstFit" => Ok(Box::new(FirstFit::new())),
        "BestFit" => Ok(Box::new(BestFit::new())),
        "ThresholdFit" => Ok(Box::new(ThresholdFit::from_options(&options.unwrap_or_default())?)),
        _ => Err(ValidationError::InvalidConfig {
            reason: format!("unknown placement algorithm: {}", config_str),
        }),
    }
}
