//! Data models representing database entities and API payloads.
//!
//! Responses wrap each payload in a single named key, e.g.
//! `{"company": {...}}` or `{"invoices": [...]}`.

use serde::Serialize;

/// Company model and request types
pub mod company;
/// Invoice model, request types and paid-date rule
pub mod invoice;

#[derive(Debug, Serialize)]
pub struct CompanyResponse<T> {
    pub company: T,
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<company::CompanySummary>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse<T> {
    pub invoice: T,
}

#[derive(Debug, Serialize)]
pub struct InvoicesResponse {
    pub invoices: Vec<invoice::InvoiceSummary>,
}

/// Acknowledgement returned by delete endpoints: `{"status": "deleted"}`.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub status: &'static str,
}

impl DeletedResponse {
    pub fn new() -> Self {
        Self { status: "deleted" }
    }
}

impl Default for DeletedResponse {
    fn default() -> Self {
        Self::new()
    }
}
