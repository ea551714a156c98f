//! Input adapters and batch tooling around the core engine.

pub mod batch;
pub mod csv_inventory;
pub mod scenario;
