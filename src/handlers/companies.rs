//! Company HTTP handlers.
//!
//! This module implements the company endpoints:
//! - GET /companies - List companies
//! - GET /companies/{code} - Get a company with its invoice ids
//! - POST /companies - Create a company
//! - PUT /companies/{code} - Update a company
//! - DELETE /companies/{code} - Delete a company

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    error::AppError,
    models::{
        CompaniesResponse, CompanyResponse, DeletedResponse,
        company::{Company, CompanyDetail, CompanyRequest},
    },
    state::AppState,
};

/// List all companies ordered by name.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "companies": [
///     { "code": "acme-corp", "name": "Acme Corp" },
///     { "code": "globex", "name": "Globex" }
///   ]
/// }
/// ```
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<CompaniesResponse>, AppError> {
    let companies = state.store.list_companies().await?;

    Ok(Json(CompaniesResponse { companies }))
}

/// Get a company and the ids of its invoices.
///
/// # Response
///
/// - **Success (200 OK)**: `{"company": {code, name, description, invoices}}`
/// - **Error (404)**: No company with this code
pub async fn get_company(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
) -> Result<Json<CompanyResponse<CompanyDetail>>, AppError> {
    let Path(code) = code?;

    let company = state
        .store
        .get_company(&code)
        .await?
        .ok_or(AppError::CompanyNotFound(code))?;

    Ok(Json(CompanyResponse { company }))
}

/// Create a company.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Acme Corp",
///   "description": "Maker of anvils"
/// }
/// ```
///
/// The code is derived from the name after the body has been validated, so
/// the example above creates `acme-corp`.
///
/// # Response
///
/// - **Success (201 Created)**: `{"company": {code, name, description}}`
/// - **Error (400)**: Missing name or malformed body
/// - **Error (409)**: Code or name already taken
pub async fn create_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyResponse<Company>>), AppError> {
    let Json(request) = payload?;
    let company = request.into_new_company()?;

    let company = state.store.create_company(company).await?;
    tracing::info!(code = %company.code, "company created");

    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// Update the name and description of a company. The code never changes.
///
/// # Response
///
/// - **Success (200 OK)**: `{"company": {code, name, description}}`
/// - **Error (400)**: Missing name or malformed body
/// - **Error (404)**: No company with this code
pub async fn update_company(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> Result<Json<CompanyResponse<Company>>, AppError> {
    let Path(code) = code?;
    let Json(request) = payload?;
    let changes = request.into_changes()?;

    let company = state
        .store
        .update_company(&code, changes)
        .await?
        .ok_or(AppError::CompanyNotFound(code))?;
    tracing::info!(code = %company.code, "company updated");

    Ok(Json(CompanyResponse { company }))
}

/// Delete a company. Its invoices are removed by the database cascade.
///
/// # Response
///
/// - **Success (200 OK)**: `{"status": "deleted"}`
/// - **Error (404)**: No company with this code
pub async fn delete_company(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedResponse>, AppError> {
    let Path(code) = code?;

    if !state.store.delete_company(&code).await? {
        return Err(AppError::CompanyNotFound(code));
    }
    tracing::info!(%code, "company deleted");

    Ok(Json(DeletedResponse::new()))
}
