//! Planning orchestrator.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use log::info;

use crate::core::bin_packer::BinPacker;
use crate::core::bottleneck;
use crate::core::capacity::EffectiveCapacity;
use crate::core::cluster::ClusterCandidate;
use crate::core::config::PlannerConfig;
use crate::core::error::ValidationError;
use crate::core::overcommit;
use crate::core::placement_algorithm::{placement_algorithm_resolver, PlacementAlgorithm};
use crate::core::report::CapacityPlanReport;
use crate::core::workload::WorkloadItem;

/// Runs the full planning pipeline: input validation, HA validation,
/// overcommit normalization, packing, bottleneck detection and report
/// assembly.
///
/// A planner holds only configuration. `plan` is a pure function of its
/// inputs with no shared mutable state, so a single planner can serve
/// concurrent planning requests from multiple threads without locking.
pub struct CapacityPlanner {
    config: PlannerConfig,
    algorithm: Box<dyn PlacementAlgorithm>,
}

impl CapacityPlanner {
    /// Creates a planner with the specified config; the placement algorithm
    /// is resolved from the config's algorithm string.
    pub fn new(config: PlannerConfig) -> Result<Self, ValidationError> {
        let algorithm = placement_algorithm_resolver(&config.algorithm)?;
        Ok(Self { config, algorithm })
    }

    /// Creates a planner with an explicitly constructed placement algorithm.
    pub fn with_algorithm(config: PlannerConfig, algorithm: Box<dyn PlacementAlgorithm>) -> Self {
        Self { config, algorithm }
    }

    /// Returns the planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans the placement of `workload` onto `clusters`.
    ///
    /// Returns an error only for malformed numeric input. Every planning
    /// outcome, including unplaced items, excluded clusters and bottleneck
    /// flags, is data inside the report.
    pub fn plan(
        &self,
        workload: &[WorkloadItem],
        clusters: &[ClusterCandidate],
    ) -> Result<CapacityPlanReport, ValidationError> {
        validate_workload(workload)?;
        validate_clusters(clusters)?;

        let normalized = overcommit::normalize(clusters);
        let order = preference_order(&normalized.capacities);

        let mut pool = normalized.pool;
        let packer = BinPacker::new(&self.config);
        let outcome = packer.pack(workload, &order, &mut pool, self.algorithm.as_ref());

        let cluster_utilizations = bottleneck::detect(&order, &pool, &self.config);
        let is_sufficient = outcome.unplaced.is_empty() && !bottleneck::has_critical(&cluster_utilizations);

        info!(
            "planned {} items over {} clusters: {} placed, {} unplaced, {} clusters excluded",
            workload.len(),
            pool.get_cluster_count(),
            outcome.assignments.len(),
            outcome.unplaced.len(),
            normalized.invalid_clusters.len()
        );

        Ok(CapacityPlanReport {
            assignments: outcome.assignments,
            unplaced: outcome.unplaced,
            invalid_clusters: normalized.invalid_clusters,
            cluster_utilizations,
            is_sufficient,
        })
    }
}

/// Cluster ids in descending effective-capacity order, ties by id.
fn preference_order(capacities: &[(String, EffectiveCapacity)]) -> Vec<String> {
    let mut entries: Vec<&(String, EffectiveCapacity)> = capacities.iter().collect();
    entries.sort_by(|a, b| {
        b.1.total()
            .partial_cmp(&a.1.total())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.into_iter().map(|(id, _)| id.clone()).collect()
}

fn validate_workload(items: &[WorkloadItem]) -> Result<(), ValidationError> {
    for item in items {
        for (field, value) in [("memory_gb", item.memory_gb), ("storage_gb", item.storage_gb)] {
            if !value.is_finite() || value < 0. {
                return Err(ValidationError::InvalidDemand {
                    id: item.id.clone(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}

fn validate_clusters(clusters: &[ClusterCandidate]) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for cluster in clusters {
        if !seen.insert(cluster.id.as_str()) {
            return Err(ValidationError::DuplicateClusterId {
                id: cluster.id.clone(),
            });
        }
        if cluster.node_count == 0 {
            return Err(ValidationError::ZeroNodeCount {
                id: cluster.id.clone(),
            });
        }
        for (field, value) in [
            ("memory_gb_per_node", cluster.memory_gb_per_node),
            ("storage_gb_total", cluster.storage_gb_total),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(ValidationError::InvalidCapacity {
                    id: cluster.id.clone(),
                    field,
                    value,
                });
            }
        }
        for (field, value) in [
            ("cpu_overcommit_ratio", cluster.cpu_overcommit_ratio),
            ("memory_overcommit_ratio", cluster.memory_overcommit_ratio),
        ] {
            if !value.is_finite() || value < 1. {
                return Err(ValidationError::InvalidOvercommitRatio {
                    id: cluster.id.clone(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}
