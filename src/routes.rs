//! HTTP routing.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Build the application router over the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Company routes
        .route(
            "/companies",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/companies/{code}",
            get(handlers::companies::get_company)
                .put(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        // Invoice routes
        .route(
            "/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(handlers::invoices::get_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
