//! Conversion of raw cluster definitions into the packer's working state.

use log::warn;

use crate::core::capacity::EffectiveCapacity;
use crate::core::cluster::ClusterCandidate;
use crate::core::ha_reserve::ha_reserve_fraction;
use crate::core::report::InvalidCluster;
use crate::core::resource_pool::ResourcePoolState;

/// Effective capacities of the clusters that passed HA validation, plus the
/// rejected ones.
pub struct NormalizedPool {
    /// Remaining-capacity state seeded with the full effective capacities.
    pub pool: ResourcePoolState,
    /// Effective capacity per valid cluster, in input order.
    pub capacities: Vec<(String, EffectiveCapacity)>,
    /// Clusters whose node count cannot satisfy their HA policy.
    pub invalid_clusters: Vec<InvalidCluster>,
}

/// Validates each cluster's HA policy and registers the effective capacity
/// of the valid ones into a fresh resource pool. The candidates themselves
/// are left untouched.
pub fn normalize(clusters: &[ClusterCandidate]) -> NormalizedPool {
    let mut pool = ResourcePoolState::new();
    let mut capacities = Vec::new();
    let mut invalid_clusters = Vec::new();

    for cluster in clusters {
        match ha_reserve_fraction(cluster.node_count, cluster.ha_policy) {
            Ok(fraction) => {
                let capacity = EffectiveCapacity::of_cluster(cluster, fraction);
                pool.add_cluster(&cluster.id, capacity);
                capacities.push((cluster.id.clone(), capacity));
            }
            Err(e) => {
                warn!("cluster {} excluded from packing: {}", cluster.id, e);
                invalid_clusters.push(InvalidCluster {
                    cluster_id: cluster.id.clone(),
                    node_count: cluster.node_count,
                    ha_policy: cluster.ha_policy,
                    reason: e.to_string(),
                });
            }
        }
    }

    NormalizedPool {
        pool,
        capacities,
        invalid_clusters,
    }
}
