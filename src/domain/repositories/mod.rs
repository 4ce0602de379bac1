//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; concrete implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod geocode_repository;

pub use geocode_repository::GeocodeRepository;

#[cfg(test)]
pub use geocode_repository::MockGeocodeRepository;
