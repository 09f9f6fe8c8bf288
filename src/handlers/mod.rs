//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Decodes path parameters and the JSON body
//! 2. Calls the store
//! 3. Maps a missing row to the matching not-found error
//! 4. Returns the JSON payload

use crate::error::AppError;

/// Company endpoints
pub mod companies;
/// Service health endpoint
pub mod health;
/// Invoice endpoints
pub mod invoices;

/// Fallback for requests that match no route.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
