//! # Geocoding Cache
//!
//! A persistent cache-aside service in front of rate-limited, paid geocoding
//! providers, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - result model, store contract, provider capability
//! - **Application Layer** ([`application`]) - the cache-aside lookup protocol
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite store, provider strategies, snapshot exporter
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Behavior
//!
//! Every distinct raw address string is resolved through a provider at most
//! once. Both successful resolutions and classified failures are recorded
//! durably, so repeated lookups never re-bill the provider, and a provider's
//! inability to geocode an address is remembered instead of retried. Provider
//! transport failures are *not* recorded; the address stays unresolved.
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://geocoding_cache.sqlite3"
//! export GOOGLE_API_KEY="..."
//!
//! # Start the service
//! cargo run
//!
//! # Ask for coordinates
//! curl 'http://localhost:3000/?address=123%20Main%20St'
//!
//! # One-shot store snapshot (also runs periodically with SNAPSHOT_DIR set)
//! cargo run -- snapshot
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`]; see [`config`]
//! for the full list.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CacheOutcome, LookupService};
    pub use crate::domain::entities::{GeocodeHit, GeocodeResult, MissType};
    pub use crate::domain::provider::{GeocodeProvider, ProviderError};
    pub use crate::domain::repositories::GeocodeRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
