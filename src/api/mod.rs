//! API layer: handlers, DTOs, and middleware for the HTTP surface.

pub mod dto;
pub mod handlers;
pub mod middleware;
