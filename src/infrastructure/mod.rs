//! Infrastructure layer: storage, provider strategies, and the snapshot
//! exporter.

pub mod persistence;
pub mod providers;
pub mod snapshot;
