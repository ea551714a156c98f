//! Representation of a candidate destination cluster.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// High-availability reservation policy of a cluster.
///
/// The policy defines how many nodes are held back so that the cluster can
/// still run all workloads after that many node failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaPolicy {
    N0,
    N1,
    N2,
}

impl HaPolicy {
    /// Returns the number of nodes reserved for failover.
    pub fn reserved_nodes(&self) -> u32 {
        match self {
            HaPolicy::N0 => 0,
            HaPolicy::N1 => 1,
            HaPolicy::N2 => 2,
        }
    }
}

impl Display for HaPolicy {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            HaPolicy::N0 => write!(f, "n0"),
            HaPolicy::N1 => write!(f, "n1"),
            HaPolicy::N2 => write!(f, "n2"),
        }
    }
}

fn default_overcommit_ratio() -> f64 {
    1.0
}

/// Represents one destination cluster considered during placement.
///
/// Candidates are immutable inputs; remaining capacity during packing is
/// tracked in a separate working structure, never here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterCandidate {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub node_count: u32,
    pub cpu_cores_per_node: u32,
    pub memory_gb_per_node: f64,
    pub storage_gb_total: f64,
    pub ha_policy: HaPolicy,
    #[serde(default = "default_overcommit_ratio")]
    pub cpu_overcommit_ratio: f64,
    #[serde(default = "default_overcommit_ratio")]
    pub memory_overcommit_ratio: f64,
}

impl ClusterCandidate {
    /// Returns the total physical CPU cores across all nodes.
    pub fn raw_cpu_cores(&self) -> u32 {
        self.node_count * self.cpu_cores_per_node
    }

    /// Returns the total physical memory across all nodes.
    pub fn raw_memory_gb(&self) -> f64 {
        self.node_count as f64 * self.memory_gb_per_node
    }
}
