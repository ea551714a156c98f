//! Effective cluster capacity after HA reservation and overcommit.

use serde::Serialize;

use crate::core::cluster::ClusterCandidate;

/// Usable capacity of one cluster in all three dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EffectiveCapacity {
    pub cpu_cores: f64,
    pub memory_gb: f64,
    pub storage_gb: f64,
}

impl EffectiveCapacity {
    /// Computes the effective capacity of a cluster given its usable
    /// fraction after HA reservation.
    pub fn of_cluster(cluster: &ClusterCandidate, ha_fraction: f64) -> Self {
        Self {
            cpu_cores: effective_cpu(cluster, ha_fraction),
            memory_gb: effective_memory(cluster, ha_fraction),
            storage_gb: effective_storage(cluster, ha_fraction),
        }
    }

    /// Returns the summed capacity across dimensions, used to order clusters
    /// by headroom.
    pub fn total(&self) -> f64 {
        self.cpu_cores + self.memory_gb + self.storage_gb
    }
}

/// Raw CPU capacity scaled by the overcommit ratio and the usable HA fraction.
pub fn effective_cpu(cluster: &ClusterCandidate, ha_fraction: f64) -> f64 {
    cluster.raw_cpu_cores() as f64 * cluster.cpu_overcommit_ratio * ha_fraction
}

/// Raw memory capacity scaled by the overcommit ratio and the usable HA fraction.
pub fn effective_memory(cluster: &ClusterCandidate, ha_fraction: f64) -> f64 {
    cluster.raw_memory_gb() * cluster.memory_overcommit_ratio * ha_fraction
}

/// Storage is never overcommitted; only the HA fraction applies.
pub fn effective_storage(cluster: &ClusterCandidate, ha_fraction: f64) -> f64 {
    cluster.storage_gb_total * ha_fraction
}
