//! Representation of a source virtual machine to be placed.

use serde::{Deserialize, Serialize};

use crate::core::common::Demand;

/// Represents one source VM with its resource demand.
///
/// Items are immutable inputs for the duration of a planning run; the engine
/// never mutates them and tracks all bookkeeping in its own working state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkloadItem {
    pub id: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
    pub storage_gb: f64,
    #[serde(default)]
    pub display_name: String,
}

impl WorkloadItem {
    /// Creates a workload item with the specified demand.
    pub fn new(id: &str, cpu_cores: u32, memory_gb: f64, storage_gb: f64, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            cpu_cores,
            memory_gb,
            storage_gb,
            display_name: display_name.to_string(),
        }
    }

    /// Returns the demand vector used for fit checks.
    pub fn demand(&self) -> Demand {
        Demand {
            cpu_cores: self.cpu_cores as f64,
            memory_gb: self.memory_gb,
            storage_gb: self.storage_gb,
        }
    }

    /// Returns the sort weight used to order items during packing.
    ///
    /// CPU-heavy and memory-heavy items get placed first; storage rarely
    /// decides placement and does not contribute to the weight.
    pub fn demand_weight(&self, cpu_weight: f64, memory_weight: f64) -> f64 {
        self.cpu_cores as f64 * cpu_weight + self.memory_gb * memory_weight
    }
}
