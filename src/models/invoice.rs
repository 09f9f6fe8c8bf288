//! Invoice data models and API request/response types.
//!
//! This module defines:
//! - `Invoice`: Database entity representing an invoice
//! - `InvoiceSummary` / `InvoiceDetail`: list and read projections
//! - Request types for creating and updating invoices
//! - `next_paid_date`: the paid-date transition rule

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::company::Company};

/// Represents an invoice record from the database.
///
/// # Database Table
///
/// Maps to the `invoices` table. Each invoice belongs to exactly one company
/// through `comp_code`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Invoice {
    /// Server-generated identifier
    pub id: i32,

    /// Code of the billed company
    pub comp_code: String,

    /// Invoiced amount
    pub amt: f64,

    /// Whether the invoice has been paid
    pub paid: bool,

    /// When the invoice was created
    pub add_date: DateTime<Utc>,

    /// When the invoice entered the paid state
    ///
    /// NULL while unpaid.
    pub paid_date: Option<DateTime<Utc>>,
}

/// Projection returned by `GET /invoices`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// Invoice with its company embedded in place of `comp_code`.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 7,
///   "amt": 100.0,
///   "paid": false,
///   "add_date": "2025-12-20T10:00:00Z",
///   "paid_date": null,
///   "company": {
///     "code": "acme-corp",
///     "name": "Acme Corp",
///     "description": "Maker of anvils"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub company: Company,
}

/// Flat row produced by joining `invoices` with `companies`.
#[derive(Debug, sqlx::FromRow)]
pub struct InvoiceCompanyRow {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<InvoiceCompanyRow> for InvoiceDetail {
    fn from(row: InvoiceCompanyRow) -> Self {
        Self {
            id: row.id,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
            company: Company {
                code: row.code,
                name: row.name,
                description: row.description,
            },
        }
    }
}

/// Request body for `POST /invoices`.
///
/// # JSON Example
///
/// ```json
/// {
///   "comp_code": "acme-corp",
///   "amt": 100.0
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: Option<String>,
    pub amt: Option<f64>,
}

impl CreateInvoiceRequest {
    pub fn into_new_invoice(self) -> Result<NewInvoice, AppError> {
        let comp_code = self
            .comp_code
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| AppError::InvalidRequest("comp_code is required".to_string()))?;
        let amt = required_amt(self.amt)?;

        Ok(NewInvoice { comp_code, amt })
    }
}

/// Request body for `PUT /invoices/{id}`.
///
/// # JSON Example
///
/// ```json
/// {
///   "amt": 250.0,
///   "paid": true
/// }
/// ```
///
/// `paid` may be omitted, in which case the stored value is kept.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: Option<f64>,

    #[serde(default)]
    pub paid: Option<bool>,
}

impl UpdateInvoiceRequest {
    pub fn into_changes(self) -> Result<InvoiceChanges, AppError> {
        Ok(InvoiceChanges {
            amt: required_amt(self.amt)?,
            paid: self.paid,
        })
    }
}

fn required_amt(amt: Option<f64>) -> Result<f64, AppError> {
    amt.filter(|amt| amt.is_finite())
        .ok_or_else(|| AppError::InvalidRequest("amt is required".to_string()))
}

/// Fields needed to insert an invoice. Everything else is server-assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

/// Fields an update may change.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub amt: f64,

    /// New paid flag, or `None` to keep the current one
    pub paid: Option<bool>,
}

/// Compute the paid date after an update.
///
/// | current `paid_date` | new `paid` | result    |
/// |---------------------|------------|-----------|
/// | NULL                | true       | `now`     |
/// | any                 | false      | NULL      |
/// | set                 | true       | unchanged |
pub fn next_paid_date(
    current: Option<DateTime<Utc>>,
    paid: bool,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (current, paid) {
        (None, true) => Some(now),
        (_, false) => None,
        (Some(stamp), true) => Some(stamp),
    }
}
