//! Post-placement utilization analysis.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::common::ResourceKind;
use crate::core::config::PlannerConfig;
use crate::core::report::{ClusterUtilization, ResourceBottleneck};
use crate::core::resource_pool::ResourcePoolState;

/// Severity of a utilization level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Computes a utilization percentage, clamped to [0, 200] so that
/// over-allocation stays visible instead of wrapping into nonsense. A
/// zero-capacity dimension counts as fully utilized once anything consumes
/// it.
pub fn utilization_pct(used: f64, total: f64) -> f64 {
    if total == 0. {
        return if used == 0. { 0. } else { 100. };
    }
    (used / total * 100.).clamp(0., 200.)
}

/// Classifies a utilization percentage against the configured thresholds.
pub fn classify(pct: f64, config: &PlannerConfig) -> Severity {
    if pct >= config.critical_utilization_pct {
        Severity::Critical
    } else if pct >= config.warning_utilization_pct {
        Severity::Warning
    } else {
        Severity::Info
    }
}

/// Computes per-cluster utilization from the post-packing pool state and
/// flags dimensions at warning or critical levels. Clusters appear in the
/// same preference order the packer used.
pub fn detect(order: &[String], pool: &ResourcePoolState, config: &PlannerConfig) -> IndexMap<String, ClusterUtilization> {
    let mut result = IndexMap::new();
    for id in order {
        let cpu_pct = utilization_pct(pool.get_allocated_cpu(id), pool.get_total_cpu(id));
        let memory_pct = utilization_pct(pool.get_allocated_memory(id), pool.get_total_memory(id));
        let storage_pct = utilization_pct(pool.get_allocated_storage(id), pool.get_total_storage(id));

        let mut bottlenecks = Vec::new();
        for (resource, pct) in [
            (ResourceKind::Cpu, cpu_pct),
            (ResourceKind::Memory, memory_pct),
            (ResourceKind::Storage, storage_pct),
        ] {
            let severity = classify(pct, config);
            if severity != Severity::Info {
                bottlenecks.push(ResourceBottleneck { resource, severity });
            }
        }

        result.insert(
            id.clone(),
            ClusterUtilization {
                cluster_id: id.clone(),
                cpu_utilization_pct: cpu_pct,
                memory_utilization_pct: memory_pct,
                storage_utilization_pct: storage_pct,
                bottlenecks,
            },
        );
    }
    result
}

/// Returns true if any cluster has a critical bottleneck.
pub fn has_critical(utilizations: &IndexMap<String, ClusterUtilization>) -> bool {
    utilizations
        .values()
        .any(|u| u.bottlenecks.iter().any(|b| b.severity == Severity::Critical))
}
