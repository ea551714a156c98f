//! Largest-demand-first packing of workload items into clusters.

use std::cmp::Ordering;

use log::debug;

use crate::core::common::{Demand, FitVerdict, UnplacedReason};
use crate::core::config::PlannerConfig;
use crate::core::placement_algorithm::PlacementAlgorithm;
use crate::core::report::{PlacementAssignment, UnplacedItem};
use crate::core::resource_pool::ResourcePoolState;
use crate::core::workload::WorkloadItem;

/// Result of one packing pass: resolved assignments and items that fit
/// nowhere, both in processing order.
#[derive(Clone, Debug, Default)]
pub struct PackingOutcome {
    pub assignments: Vec<PlacementAssignment>,
    pub unplaced: Vec<UnplacedItem>,
}

/// Assigns each workload item to at most one cluster.
///
/// Items are processed in descending demand-weight order and clusters are
/// offered in descending effective-capacity order, so the hardest items get
/// first pick of the roomiest clusters. Bin packing is NP-hard; this is a
/// heuristic that trades optimality for determinism and explainability,
/// which is what a plan reviewed by a human needs.
pub struct BinPacker {
    cpu_weight: f64,
    memory_weight: f64,
}

impl BinPacker {
    /// Creates a packer with sort weights taken from the planner config.
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            cpu_weight: config.cpu_weight,
            memory_weight: config.memory_weight,
        }
    }

    /// Packs `items` into the clusters registered in `pool`, consulting
    /// `algorithm` for each placement. `order` must list cluster ids in
    /// descending effective-capacity order (ties by id); it doubles as the
    /// preference order for spillover detection.
    pub fn pack(
        &self,
        items: &[WorkloadItem],
        order: &[String],
        pool: &mut ResourcePoolState,
        algorithm: &dyn PlacementAlgorithm,
    ) -> PackingOutcome {
        let mut outcome = PackingOutcome::default();

        let mut sorted: Vec<&WorkloadItem> = items.iter().collect();
        sorted.sort_by(|a, b| {
            let weight_a = a.demand_weight(self.cpu_weight, self.memory_weight);
            let weight_b = b.demand_weight(self.cpu_weight, self.memory_weight);
            weight_b
                .partial_cmp(&weight_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        for item in sorted {
            if order.is_empty() {
                outcome.unplaced.push(UnplacedItem {
                    workload_item_id: item.id.clone(),
                    reason: UnplacedReason::NoClustersProvided,
                });
                continue;
            }

            let demand = item.demand();
            match algorithm.select_cluster(&demand, order, pool) {
                Some(cluster_id) => {
                    pool.allocate(&demand, &cluster_id);
                    let is_spillover = cluster_id != order[0];
                    debug!(
                        "placed item {} on cluster {}{}",
                        item.id,
                        cluster_id,
                        if is_spillover { " (spillover)" } else { "" }
                    );
                    outcome.assignments.push(PlacementAssignment {
                        workload_item_id: item.id.clone(),
                        cluster_id,
                        is_spillover,
                    });
                }
                None => {
                    let reason = unplaced_reason(&demand, order, pool);
                    debug!("no cluster fits item {}: {:?}", item.id, reason);
                    outcome.unplaced.push(UnplacedItem {
                        workload_item_id: item.id.clone(),
                        reason,
                    });
                }
            }
        }
        outcome
    }
}

/// Explains a failed placement: picks the cluster with the least total
/// shortfall (ties broken by preference order) and reports its first failing
/// dimension, checked in order CPU, memory, storage.
fn unplaced_reason(demand: &Demand, order: &[String], pool: &ResourcePoolState) -> UnplacedReason {
    let mut best_id: Option<&String> = None;
    let mut least_shortfall = f64::MAX;
    for id in order {
        let shortfall = pool.total_shortfall(demand, id);
        if shortfall < least_shortfall {
            least_shortfall = shortfall;
            best_id = Some(id);
        }
    }

    match best_id {
        None => UnplacedReason::NoClustersProvided,
        Some(id) => match pool.can_allocate(demand, id) {
            FitVerdict::NotEnoughCpu => UnplacedReason::InsufficientCpu,
            FitVerdict::NotEnoughMemory => UnplacedReason::InsufficientMemory,
            FitVerdict::NotEnoughStorage => UnplacedReason::InsufficientStorage,
            // The strategy declined a cluster the plain fit check accepts
            // (e.g. a utilization threshold); report the tightest dimension.
            FitVerdict::Success | FitVerdict::ClusterNotFound => tightest_dimension(demand, id, pool),
        },
    }
}

/// Returns the dimension with the highest post-placement load ratio on the
/// specified cluster, ties resolved in CPU, memory, storage order.
fn tightest_dimension(demand: &Demand, cluster_id: &str, pool: &ResourcePoolState) -> UnplacedReason {
    let ratio = |total: f64, available: f64, needed: f64| -> f64 {
        if total == 0. {
            if needed > 0. {
                return f64::MAX;
            }
            return 0.;
        }
        (total - available + needed) / total
    };

    let cpu = ratio(pool.get_total_cpu(cluster_id), pool.get_available_cpu(cluster_id), demand.cpu_cores);
    let memory = ratio(
        pool.get_total_memory(cluster_id),
        pool.get_available_memory(cluster_id),
        demand.memory_gb,
    );
    let storage = ratio(
        pool.get_total_storage(cluster_id),
        pool.get_available_storage(cluster_id),
        demand.storage_gb,
    );

    if cpu >= memory && cpu >= storage {
        UnplacedReason::InsufficientCpu
    } else if memory >= storage {
        UnplacedReason::InsufficientMemory
    } else {
        UnplacedReason::InsufficientStorage
    }
}
