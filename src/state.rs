//! Shared application state injected into handlers.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::LookupService;

/// State shared across all request handlers.
///
/// The pool is kept alongside the service for the health check; lookups go
/// through [`LookupService`] only.
#[derive(Clone)]
pub struct AppState {
    pub lookup_service: Arc<LookupService>,
    pub pool: SqlitePool,
}
