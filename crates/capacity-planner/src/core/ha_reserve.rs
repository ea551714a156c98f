//! Usable-capacity fraction after high-availability node reservation.

use thiserror::Error;

use crate::core::cluster::HaPolicy;

/// Cluster configuration that cannot satisfy its declared HA policy.
///
/// Recovered per cluster: the planner excludes the cluster from packing and
/// reports it in the `invalid_clusters` list instead of silently treating it
/// as having zero capacity.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{policy} policy reserves {reserved} of {node_count} nodes, leaving no usable capacity")]
pub struct HaPolicyError {
    pub node_count: u32,
    pub policy: HaPolicy,
    pub reserved: u32,
}

/// Returns the fraction of raw capacity that remains usable after reserving
/// nodes for failover. The fraction is always in (0, 1].
pub fn ha_reserve_fraction(node_count: u32, policy: HaPolicy) -> Result<f64, HaPolicyError> {
    let reserved = policy.reserved_nodes();
    if node_count <= reserved {
        return Err(HaPolicyError {
            node_count,
            policy,
            reserved,
        });
    }
    Ok((node_count - reserved) as f64 / node_count as f64)
}
