//! Request and response DTOs for the HTTP surface.

pub mod geocode;
pub mod health;
