//! Threshold-bounded Best Fit strategy.

use crate::core::common::{Demand, FitVerdict};
use crate::core::config::parse_options;
use crate::core::error::ValidationError;
use crate::core::placement_algorithm::PlacementAlgorithm;
use crate::core::resource_pool::ResourcePoolState;

/// Uses the most loaded (by post-placement CPU load) suitable cluster whose
/// load after placement stays below the threshold in every dimension.
///
/// Leaves operational headroom on each cluster at the cost of placing fewer
/// items than plain Best Fit would.
#[derive(Clone)]
pub struct ThresholdFit {
    threshold: f64,
}

impl ThresholdFit {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Creates the strategy from an options string, e.g. `threshold=0.9`.
    pub fn from_options(options_str: &str) -> Result<Self, ValidationError> {
        let options = parse_options(options_str);
        let threshold = options
            .get("threshold")
            .ok_or_else(|| ValidationError::InvalidConfig {
                reason: "ThresholdFit requires a threshold option".to_string(),
            })?
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidConfig {
                reason: format!("ThresholdFit threshold must be a number, got {:?}", options.get("threshold")),
            })?;
        if !threshold.is_finite() || threshold <= 0. || threshold > 1. {
            return Err(ValidationError::InvalidConfig {
                reason: format!("ThresholdFit threshold must be in (0, 1], got {}", threshold),
            });
        }
        Ok(Self::new(threshold))
    }

    fn load_after(total: f64, available: f64, demand: f64) -> f64 {
        if total == 0. {
            return 0.;
        }
        (total - available + demand) / total
    }
}

impl PlacementAlgorithm for ThresholdFit {
    fn select_cluster(&self, demand: &Demand, order: &[String], pool: &ResourcePoolState) -> Option<String> {
        let mut result: Option<String> = None;
        let mut best_cpu_load = 0.;

        for id in order {
            if pool.can_allocate(demand, id) != FitVerdict::Success {
                continue;
            }
            let cpu_load = Self::load_after(pool.get_total_cpu(id), pool.get_available_cpu(id), demand.cpu_cores);
            let memory_load =
                Self::load_after(pool.get_total_memory(id), pool.get_available_memory(id), demand.memory_gb);
            let storage_load =
                Self::load_after(pool.get_total_storage(id), pool.get_available_storage(id), demand.storage_gb);

            if cpu_load <= self.threshold && memory_load <= self.threshold && storage_load <= self.threshold {
                if result.is_none() || cpu_load > best_cpu_load {
                    best_cpu_load = cpu_load;
                    result = Some(id.clone());
                }
            }
        }
        result
    }
}
