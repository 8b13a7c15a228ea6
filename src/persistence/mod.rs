//! Persistence Module
//!
//! Seeds the store at startup and drains it to disk on shutdown.

mod snapshot;

pub use snapshot::SnapshotFile;
