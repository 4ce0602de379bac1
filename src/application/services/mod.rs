//! Application services orchestrating domain operations.

pub mod lookup_service;

pub use lookup_service::{CacheOutcome, LookupService};
