use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Resource dimensions considered during placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Cpu,
    Memory,
    Storage,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ResourceKind::Cpu => write!(f, "cpu"),
            ResourceKind::Memory => write!(f, "memory"),
            ResourceKind::Storage => write!(f, "storage"),
        }
    }
}

/// Resource demand of a single workload item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Demand {
    pub cpu_cores: f64,
    pub memory_gb: f64,
    pub storage_gb: f64,
}

/// Verdict of a fit check against the remaining capacity of one cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitVerdict {
    NotEnoughCpu,
    NotEnoughMemory,
    NotEnoughStorage,
    Success,
    ClusterNotFound,
}

/// Reason why a workload item could not be placed anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    InsufficientCpu,
    InsufficientMemory,
    InsufficientStorage,
    NoClustersProvided,
}
