//! Remaining-capacity state tracked during packing.

use std::collections::BTreeMap;

use crate::core::capacity::EffectiveCapacity;
use crate::core::common::{Demand, FitVerdict};

/// Stores the effective capacity of one cluster and the portion of it still
/// available for placement.
#[derive(Clone, Debug)]
pub struct ClusterState {
    pub cpu_total: f64,
    pub memory_total: f64,
    pub storage_total: f64,

    pub cpu_available: f64,
    pub memory_available: f64,
    pub storage_available: f64,
}

impl ClusterState {
    /// Creates cluster state with the whole effective capacity available.
    pub fn new(capacity: EffectiveCapacity) -> Self {
        Self {
            cpu_total: capacity.cpu_cores,
            memory_total: capacity.memory_gb,
            storage_total: capacity.storage_gb,
            cpu_available: capacity.cpu_cores,
            memory_available: capacity.memory_gb,
            storage_available: capacity.storage_gb,
        }
    }
}

/// Tracks remaining cluster capacities for one planning run.
///
/// The candidate clusters themselves are immutable inputs; all bookkeeping
/// during packing happens here. The state is local to one `plan` invocation,
/// so concurrent planning runs never share it.
#[derive(Clone, Debug, Default)]
pub struct ResourcePoolState {
    clusters: BTreeMap<String, ClusterState>,
}

impl ResourcePoolState {
    /// Creates empty resource pool state.
    pub fn new() -> Self {
        Self {
            clusters: BTreeMap::new(),
        }
    }

    /// Adds a cluster with the specified effective capacity.
    pub fn add_cluster(&mut self, id: &str, capacity: EffectiveCapacity) {
        self.clusters.insert(id.to_string(), ClusterState::new(capacity));
    }

    /// Returns the number of clusters.
    pub fn get_cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Checks whether the specified demand currently fits the remaining
    /// capacity of the specified cluster. Dimensions are checked in order
    /// CPU, memory, storage and the first failing one decides the verdict.
    pub fn can_allocate(&self, demand: &Demand, cluster_id: &str) -> FitVerdict {
        match self.clusters.get(cluster_id) {
            None => FitVerdict::ClusterNotFound,
            Some(state) => {
                if state.cpu_available < demand.cpu_cores {
                    FitVerdict::NotEnoughCpu
                } else if state.memory_available < demand.memory_gb {
                    FitVerdict::NotEnoughMemory
                } else if state.storage_available < demand.storage_gb {
                    FitVerdict::NotEnoughStorage
                } else {
                    FitVerdict::Success
                }
            }
        }
    }

    /// Subtracts the specified demand from the cluster's remaining capacity.
    /// Must only be called after a successful fit check.
    pub fn allocate(&mut self, demand: &Demand, cluster_id: &str) {
        if let Some(state) = self.clusters.get_mut(cluster_id) {
            state.cpu_available = (state.cpu_available - demand.cpu_cores).max(0.);
            state.memory_available = (state.memory_available - demand.memory_gb).max(0.);
            state.storage_available = (state.storage_available - demand.storage_gb).max(0.);
        }
    }

    /// Returns the summed demand not covered by the cluster's remaining
    /// capacity. Zero means the demand fits.
    pub fn total_shortfall(&self, demand: &Demand, cluster_id: &str) -> f64 {
        let state = &self.clusters[cluster_id];
        (demand.cpu_cores - state.cpu_available).max(0.)
            + (demand.memory_gb - state.memory_available).max(0.)
            + (demand.storage_gb - state.storage_available).max(0.)
    }

    /// Returns the effective CPU capacity of the specified cluster.
    pub fn get_total_cpu(&self, cluster_id: &str) -> f64 {
        self.clusters[cluster_id].cpu_total
    }

    /// Returns the effective memory capacity of the specified cluster.
    pub fn get_total_memory(&self, cluster_id: &str) -> f64 {
        self.clusters[cluster_id].memory_total
    }

    /// Returns the effective storage capacity of the specified cluster.
    pub fn get_total_storage(&self, cluster_id: &str) -> f64 {
        self.clusters[cluster_id].storage_total
    }

    /// Returns the remaining CPU capacity of the specified cluster.
    pub fn get_available_cpu(&self, cluster_id: &str) -> f64 {
        self.clusters[cluster_id].cpu_available
    }

    /// Returns the remaining memory capacity of the specified cluster.
    pub fn get_available_memory(&self, cluster_id: &str) -> f64 {
        self.clusters[cluster_id].memory_available
    }

    /// Returns the remaining storage capacity of the specified cluster.
    pub fn get_available_storage(&self, cluster_id: &str) -> f64 {
        self.clusters[cluster_id].storage_available
    }

    /// Returns the summed remaining capacity across all dimensions.
    pub fn get_available_total(&self, cluster_id: &str) -> f64 {
        let state = &self.clusters[cluster_id];
        state.cpu_available + state.memory_available + state.storage_available
    }

    /// Returns the CPU capacity of the specified cluster consumed by
    /// placed items.
    pub fn get_allocated_cpu(&self, cluster_id: &str) -> f64 {
        let state = &self.clusters[cluster_id];
        state.cpu_total - state.cpu_available
    }

    /// Returns the memory capacity of the specified cluster consumed by
    /// placed items.
    pub fn get_allocated_memory(&self, cluster_id: &str) -> f64 {
        let state = &self.clusters[cluster_id];
        state.memory_total - state.memory_available
    }

    /// Returns the storage capacity of the specified cluster consumed by
    /// placed items.
    pub fn get_allocated_storage(&self, cluster_id: &str) -> f64 {
        let state = &self.clusters[cluster_id];
        state.storage_total - state.storage_available
    }
}
