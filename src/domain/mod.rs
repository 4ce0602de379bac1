//! Domain layer: the geocoding data model and its two seams.
//!
//! - [`entities`] - result model ([`entities::GeocodeResult`] and friends)
//! - [`repositories`] - the cache store contract
//! - [`provider`] - the pluggable provider capability
//!
//! The domain layer has no dependency on infrastructure or transport; the
//! cache-aside control flow lives in
//! [`crate::application::services::LookupService`].

pub mod entities;
pub mod provider;
pub mod repositories;
