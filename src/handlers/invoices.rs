//! Invoice HTTP handlers.
//!
//! This module implements the invoice endpoints:
//! - GET /invoices - List invoices
//! - GET /invoices/{id} - Get an invoice with its company
//! - POST /invoices - Create an invoice
//! - PUT /invoices/{id} - Update amount and paid status
//! - DELETE /invoices/{id} - Delete an invoice

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    error::AppError,
    models::{
        DeletedResponse, InvoiceResponse, InvoicesResponse,
        invoice::{CreateInvoiceRequest, Invoice, InvoiceDetail, UpdateInvoiceRequest},
    },
    state::AppState,
};

/// List all invoices ordered by id.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "invoices": [
///     { "id": 1, "comp_code": "acme-corp" },
///     { "id": 2, "comp_code": "globex" }
///   ]
/// }
/// ```
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<InvoicesResponse>, AppError> {
    let invoices = state.store.list_invoices().await?;

    Ok(Json(InvoicesResponse { invoices }))
}

/// Get an invoice with the billed company embedded.
///
/// # Response
///
/// - **Success (200 OK)**:
///   `{"invoice": {id, amt, paid, add_date, paid_date, company: {code, name, description}}}`
/// - **Error (400)**: Id is not an integer
/// - **Error (404)**: No invoice with this id
pub async fn get_invoice(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<InvoiceResponse<InvoiceDetail>>, AppError> {
    let id = invoice_id(id?)?;

    let invoice = state
        .store
        .get_invoice(id)
        .await?
        .ok_or(AppError::InvoiceNotFound(id.into()))?;

    Ok(Json(InvoiceResponse { invoice }))
}

/// Create an unpaid invoice for an existing company.
///
/// # Request Body
///
/// ```json
/// {
///   "comp_code": "acme-corp",
///   "amt": 100.0
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"invoice": {id, comp_code, amt, paid, add_date, paid_date}}`
/// - **Error (400)**: Missing field or malformed body
/// - **Error (404)**: `comp_code` names no company
pub async fn create_invoice(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> Result<Json<InvoiceResponse<Invoice>>, AppError> {
    let Json(request) = payload?;
    let new_invoice = request.into_new_invoice()?;
    let comp_code = new_invoice.comp_code.clone();

    let invoice = state
        .store
        .create_invoice(new_invoice)
        .await?
        .ok_or(AppError::CompanyNotFound(comp_code))?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");

    Ok(Json(InvoiceResponse { invoice }))
}

/// Update the amount and paid status of an invoice.
///
/// # Request Body
///
/// ```json
/// {
///   "amt": 250.0,
///   "paid": true
/// }
/// ```
///
/// # Paid Date
///
/// - Becoming paid stamps `paid_date` with the current time
/// - Becoming unpaid clears `paid_date`
/// - Otherwise `paid_date` is left alone
///
/// # Response
///
/// - **Success (200 OK)**: `{"invoice": {id, comp_code, amt, paid, add_date, paid_date}}`
/// - **Error (400)**: Missing amount or malformed body
/// - **Error (404)**: No invoice with this id
pub async fn update_invoice(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateInvoiceRequest>, JsonRejection>,
) -> Result<Json<InvoiceResponse<Invoice>>, AppError> {
    let id = invoice_id(id?)?;
    let Json(request) = payload?;
    let changes = request.into_changes()?;

    let invoice = state
        .store
        .update_invoice(id, changes)
        .await?
        .ok_or(AppError::InvoiceNotFound(id.into()))?;
    tracing::info!(id, paid = invoice.paid, "invoice updated");

    Ok(Json(InvoiceResponse { invoice }))
}

/// Delete an invoice.
///
/// # Response
///
/// - **Success (200 OK)**: `{"status": "deleted"}`
/// - **Error (404)**: No invoice with this id
pub async fn delete_invoice(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id = invoice_id(id?)?;

    if !state.store.delete_invoice(id).await? {
        return Err(AppError::InvoiceNotFound(id.into()));
    }
    tracing::info!(id, "invoice deleted");

    Ok(Json(DeletedResponse::new()))
}

/// Narrow a path id to the column type. Ids no invoice can have are
/// reported as missing, not as malformed.
fn invoice_id(Path(id): Path<i64>) -> Result<i32, AppError> {
    i32::try_from(id).map_err(|_| AppError::InvoiceNotFound(id))
}
