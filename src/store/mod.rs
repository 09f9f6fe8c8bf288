//! Persistence layer.
//!
//! Handlers talk to storage only through the [`Store`] trait. The production
//! implementation is [`postgres::PgStore`]; tests run the same handlers
//! against [`memory::MemoryStore`].
//!
//! Lookups that can miss return `Option` (or `bool` for deletes) and leave it
//! to the caller to pick the not-found error, which names the key the client
//! asked for.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        company::{Company, CompanyChanges, CompanyDetail, CompanySummary},
        invoice::{Invoice, InvoiceChanges, InvoiceDetail, InvoiceSummary, NewInvoice},
    },
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Query executor for companies and invoices.
#[async_trait]
pub trait Store: Send + Sync {
    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// All companies, ordered by name.
    async fn list_companies(&self) -> Result<Vec<CompanySummary>, AppError>;

    /// A company and the ids of its invoices, or `None` if the code is unknown.
    async fn get_company(&self, code: &str) -> Result<Option<CompanyDetail>, AppError>;

    /// Insert a company. Duplicate codes or names fail with `Conflict`.
    async fn create_company(&self, company: Company) -> Result<Company, AppError>;

    /// Replace the mutable fields of a company.
    async fn update_company(
        &self,
        code: &str,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, AppError>;

    /// Delete a company, returning whether a row was removed.
    async fn delete_company(&self, code: &str) -> Result<bool, AppError>;

    /// All invoices, ordered by id.
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, AppError>;

    /// An invoice joined with its company.
    async fn get_invoice(&self, id: i32) -> Result<Option<InvoiceDetail>, AppError>;

    /// Insert an invoice, or return `None` when `comp_code` names no company.
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Option<Invoice>, AppError>;

    /// Apply an update, moving `paid_date` according to
    /// [`next_paid_date`](crate::models::invoice::next_paid_date).
    async fn update_invoice(
        &self,
        id: i32,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, AppError>;

    /// Delete an invoice, returning whether a row was removed.
    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError>;
}

/// Message used for unique violations on company writes.
pub(crate) fn duplicate_company(name: &str) -> String {
    format!("Company '{name}' conflicts with an existing company")
}
