//! YAML scenario files describing a complete planning run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::cluster::{ClusterCandidate, HaPolicy};
use crate::core::config::{PlannerConfig, PlannerConfigRaw};
use crate::core::error::ValidationError;
use crate::core::workload::WorkloadItem;
use crate::extensions::csv_inventory::{read_inventory, InventoryError};

/// Failure while loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("can't read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("can't parse YAML from file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("can't write JSON to file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} entry {index}: exactly one of id (count = 1) or id_prefix (count > 1) must be set")]
    BadEntryId { entity: &'static str, index: usize },
}

/// Holds configuration of a single cluster or a set of identical clusters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Cluster id.
    /// Should be set if count = 1.
    pub id: Option<String>,
    /// Cluster id prefix.
    /// Full id is produced by appending the instance number to the prefix.
    /// Should be set if count > 1.
    pub id_prefix: Option<String>,
    pub display_name: Option<String>,
    pub node_count: u32,
    pub cpu_cores_per_node: u32,
    pub memory_gb_per_node: f64,
    pub storage_gb_total: f64,
    pub ha_policy: HaPolicy,
    pub cpu_overcommit_ratio: Option<f64>,
    pub memory_overcommit_ratio: Option<f64>,
    /// Number of such clusters.
    pub count: Option<u32>,
}

/// Holds configuration of a single workload item or a set of identical items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Item id.
    /// Should be set if count = 1.
    pub id: Option<String>,
    /// Item id prefix.
    /// Full id is produced by appending the instance number to the prefix.
    /// Should be set if count > 1.
    pub id_prefix: Option<String>,
    pub display_name: Option<String>,
    pub cpu_cores: u32,
    pub memory_gb: f64,
    pub storage_gb: f64,
    /// Number of such items.
    pub count: Option<u32>,
}

/// Raw scenario as read from a YAML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRaw {
    /// Planner configuration overrides.
    pub planner: Option<PlannerConfigRaw>,
    /// Candidate destination clusters.
    pub clusters: Option<Vec<ClusterConfig>>,
    /// Inline workload definition.
    pub workload: Option<Vec<WorkloadConfig>>,
    /// Path to a CSV inventory export, relative to the scenario file.
    /// Appended to the inline workload if both are present.
    pub workload_csv: Option<String>,
}

/// A fully resolved planning scenario: planner configuration, candidate
/// clusters and the workload to place.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub config: PlannerConfig,
    pub clusters: Vec<ClusterCandidate>,
    pub workload: Vec<WorkloadItem>,
}

impl Scenario {
    /// Loads a scenario from a YAML file, expanding `count` entries and
    /// reading the referenced inventory CSV if present.
    pub fn from_file(file_name: &str) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(file_name).map_err(|e| ScenarioError::Io {
            path: file_name.to_string(),
            source: e,
        })?;
        let raw: ScenarioRaw = serde_yaml::from_str(&text).map_err(|e| ScenarioError::Yaml {
            path: file_name.to_string(),
            source: e,
        })?;
        Self::from_raw(raw, Path::new(file_name).parent())
    }

    /// Resolves a raw scenario. `base_dir` anchors relative CSV paths.
    pub fn from_raw(raw: ScenarioRaw, base_dir: Option<&Path>) -> Result<Self, ScenarioError> {
        let config = PlannerConfig::from_raw(raw.planner.unwrap_or_default())?;

        let mut clusters = Vec::new();
        for (index, entry) in raw.clusters.unwrap_or_default().iter().enumerate() {
            for id in expand_ids("cluster", index, &entry.id, &entry.id_prefix, entry.count)? {
                clusters.push(ClusterCandidate {
                    id,
                    display_name: entry.display_name.clone().unwrap_or_default(),
                    node_count: entry.node_count,
                    cpu_cores_per_node: entry.cpu_cores_per_node,
                    memory_gb_per_node: entry.memory_gb_per_node,
                    storage_gb_total: entry.storage_gb_total,
                    ha_policy: entry.ha_policy,
                    cpu_overcommit_ratio: entry.cpu_overcommit_ratio.unwrap_or(1.),
                    memory_overcommit_ratio: entry.memory_overcommit_ratio.unwrap_or(1.),
                });
            }
        }

        let mut workload = Vec::new();
        for (index, entry) in raw.workload.unwrap_or_default().iter().enumerate() {
            for id in expand_ids("workload", index, &entry.id, &entry.id_prefix, entry.count)? {
                workload.push(WorkloadItem {
                    id,
                    cpu_cores: entry.cpu_cores,
                    memory_gb: entry.memory_gb,
                    storage_gb: entry.storage_gb,
                    display_name: entry.display_name.clone().unwrap_or_default(),
                });
            }
        }

        if let Some(csv_path) = raw.workload_csv {
            let resolved = match base_dir {
                Some(dir) => dir.join(&csv_path).to_string_lossy().into_owned(),
                None => csv_path,
            };
            workload.extend(read_inventory(&resolved)?);
        }

        Ok(Self {
            config,
            clusters,
            workload,
        })
    }
}

/// Expands one config entry into its instance ids: the plain id for a single
/// instance, or `prefix1..prefixN` when count is set.
fn expand_ids(
    entity: &'static str,
    index: usize,
    id: &Option<String>,
    id_prefix: &Option<String>,
    count: Option<u32>,
) -> Result<Vec<String>, ScenarioError> {
    let count = count.unwrap_or(1);
    match (id, id_prefix) {
        (Some(id), None) if count == 1 => Ok(vec![id.clone()]),
        (None, Some(prefix)) => Ok((1..=count).map(|i| format!("{}{}", prefix, i)).collect()),
        _ => Err(ScenarioError::BadEntryId { entity, index }),
    }
}
