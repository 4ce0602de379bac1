//! Core domain entities representing the geocoding data model.
//!
//! Entities are plain data: a resolution outcome is either a [`GeocodeHit`]
//! with coordinates or a [`MissType`] classification, and nothing here talks
//! to storage or providers.

pub mod geocode_result;

pub use geocode_result::{GeocodeHit, GeocodeResult, MissType};
