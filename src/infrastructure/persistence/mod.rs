//! Concrete storage implementations.

pub mod sqlite_geocode_repository;

pub use sqlite_geocode_repository::SqliteGeocodeRepository;
