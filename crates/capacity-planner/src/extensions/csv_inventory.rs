//! Reader for VM inventory exports in CSV format.

use std::fs::File;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::workload::WorkloadItem;

/// Failure while reading an inventory file.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("can't read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("can't parse CSV record in file {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Represents one row of the inventory export.
#[derive(Serialize, Deserialize, Debug)]
struct InventoryRecord {
    id: String,
    #[serde(default)]
    display_name: String,
    cpu_cores: u32,
    memory_gb: f64,
    storage_gb: f64,
}

/// Reads a VM inventory export with columns
/// `id,display_name,cpu_cores,memory_gb,storage_gb` into workload items.
///
/// The numeric values are passed through as-is; range checks happen inside
/// the planner so that programmatically built and file-loaded workloads get
/// identical validation.
pub fn read_inventory(file_name: &str) -> Result<Vec<WorkloadItem>, InventoryError> {
    let file = File::open(file_name).map_err(|e| InventoryError::Io {
        path: file_name.to_string(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut items = Vec::new();
    for record in reader.deserialize() {
        let record: InventoryRecord = record.map_err(|e| InventoryError::Csv {
            path: file_name.to_string(),
            source: e,
        })?;
        items.push(WorkloadItem {
            id: record.id,
            cpu_cores: record.cpu_cores,
            memory_gb: record.memory_gb,
            storage_gb: record.storage_gb,
            display_name: record.display_name,
        });
    }

    info!("Read {} VM records from {}", items.len(), file_name);
    Ok(items)
}
