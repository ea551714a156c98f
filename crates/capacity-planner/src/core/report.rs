//! Planning report returned to the caller.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::bottleneck::Severity;
use crate::core::cluster::HaPolicy;
use crate::core::common::{ResourceKind, UnplacedReason};

/// One resolved VM-to-cluster mapping.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacementAssignment {
    pub workload_item_id: String,
    pub cluster_id: String,
    /// True if the item did not fit its first-choice cluster and was placed
    /// on a fallback.
    pub is_spillover: bool,
}

/// A workload item that fit nowhere.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnplacedItem {
    pub workload_item_id: String,
    pub reason: UnplacedReason,
}

/// A cluster excluded from packing because its node count cannot satisfy its
/// HA policy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvalidCluster {
    pub cluster_id: String,
    pub node_count: u32,
    pub ha_policy: HaPolicy,
    pub reason: String,
}

/// A resource dimension whose post-placement utilization crossed a risk
/// threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceBottleneck {
    pub resource: ResourceKind,
    pub severity: Severity,
}

/// Post-placement utilization of one cluster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterUtilization {
    pub cluster_id: String,
    pub cpu_utilization_pct: f64,
    pub memory_utilization_pct: f64,
    pub storage_utilization_pct: f64,
    /// Dimensions at warning or critical utilization, in CPU, memory,
    /// storage order.
    pub bottlenecks: Vec<ResourceBottleneck>,
}

/// Final output of one planning run.
///
/// Every input item is accounted for exactly once, either in `assignments`
/// or in `unplaced`. The report is assembled once and read-only thereafter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CapacityPlanReport {
    /// Resolved placements in processing order.
    pub assignments: Vec<PlacementAssignment>,
    /// Items that fit nowhere, in processing order.
    pub unplaced: Vec<UnplacedItem>,
    /// Clusters excluded from packing due to HA policy violations.
    pub invalid_clusters: Vec<InvalidCluster>,
    /// Utilization per cluster, keyed by cluster id in preference order.
    pub cluster_utilizations: IndexMap<String, ClusterUtilization>,
    /// True iff everything was placed and no cluster has a critical
    /// bottleneck.
    pub is_sufficient: bool,
}
