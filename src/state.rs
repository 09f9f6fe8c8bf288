//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::store::Store;

/// State extracted by handlers with `State<AppState>`.
///
/// The store is injected at construction so the same router can run over
/// PostgreSQL in production and an in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
