//! Concrete geocoding provider strategies.
//!
//! Each strategy owns the mapping from its backend's status vocabulary into
//! the closed [`crate::domain::entities::MissType`] set.

pub mod google;
pub mod nominatim;

pub use google::GoogleProvider;
pub use nominatim::NominatimProvider;
