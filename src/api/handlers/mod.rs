//! HTTP request handlers.

pub mod geocode;
pub mod health;

pub use geocode::geocode_handler;
pub use health::health_handler;
