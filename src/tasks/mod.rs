//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Snapshot: Writes the full product list to the snapshot file at a fixed interval

mod snapshot;

pub use snapshot::{save_snapshot, spawn_snapshot_task};
