//! In-memory store used to exercise the HTTP layer in tests.
//!
//! Mirrors the PostgreSQL schema: unique company codes and names, serial
//! invoice ids, cascading company deletes.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        company::{Company, CompanyChanges, CompanyDetail, CompanySummary},
        invoice::{
            Invoice, InvoiceChanges, InvoiceDetail, InvoiceSummary, NewInvoice, next_paid_date,
        },
    },
    store::{Store, duplicate_company},
};

#[derive(Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    last_invoice_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummary>, AppError> {
        let tables = self.tables.read().await;

        let mut companies: Vec<CompanySummary> = tables
            .companies
            .values()
            .map(|c| CompanySummary {
                code: c.code.clone(),
                name: c.name.clone(),
            })
            .collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(companies)
    }

    async fn get_company(&self, code: &str) -> Result<Option<CompanyDetail>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables.companies.get(code).map(|company| {
            let invoices = tables
                .invoices
                .values()
                .filter(|inv| inv.comp_code == code)
                .map(|inv| inv.id)
                .collect();
            CompanyDetail::new(company.clone(), invoices)
        }))
    }

    async fn create_company(&self, company: Company) -> Result<Company, AppError> {
        let mut tables = self.tables.write().await;

        let taken = tables.companies.contains_key(&company.code)
            || tables.companies.values().any(|c| c.name == company.name);
        if taken {
            return Err(AppError::Conflict(duplicate_company(&company.name)));
        }

        tables
            .companies
            .insert(company.code.clone(), company.clone());

        Ok(company)
    }

    async fn update_company(
        &self,
        code: &str,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.companies.contains_key(code) {
            return Ok(None);
        }
        if tables
            .companies
            .values()
            .any(|c| c.code != code && c.name == changes.name)
        {
            return Err(AppError::Conflict(duplicate_company(&changes.name)));
        }

        Ok(tables.companies.get_mut(code).map(|company| {
            company.name = changes.name;
            company.description = changes.description;
            company.clone()
        }))
    }

    async fn delete_company(&self, code: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        if tables.companies.remove(code).is_none() {
            return Ok(false);
        }
        tables.invoices.retain(|_, inv| inv.comp_code != code);

        Ok(true)
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .invoices
            .values()
            .map(|inv| InvoiceSummary {
                id: inv.id,
                comp_code: inv.comp_code.clone(),
            })
            .collect())
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<InvoiceDetail>, AppError> {
        let tables = self.tables.read().await;

        let detail = tables.invoices.get(&id).and_then(|inv| {
            tables
                .companies
                .get(&inv.comp_code)
                .map(|company| InvoiceDetail {
                    id: inv.id,
                    amt: inv.amt,
                    paid: inv.paid,
                    add_date: inv.add_date,
                    paid_date: inv.paid_date,
                    company: company.clone(),
                })
        });

        Ok(detail)
    }

    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Option<Invoice>, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.companies.contains_key(&invoice.comp_code) {
            return Ok(None);
        }

        tables.last_invoice_id += 1;
        let created = Invoice {
            id: tables.last_invoice_id,
            comp_code: invoice.comp_code,
            amt: invoice.amt,
            paid: false,
            add_date: Utc::now(),
            paid_date: None,
        };
        tables.invoices.insert(created.id, created.clone());

        Ok(Some(created))
    }

    async fn update_invoice(
        &self,
        id: i32,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, AppError> {
        let mut tables = self.tables.write().await;

        Ok(tables.invoices.get_mut(&id).map(|inv| {
            let paid = changes.paid.unwrap_or(inv.paid);
            inv.paid_date = next_paid_date(inv.paid_date, paid, Utc::now());
            inv.paid = paid;
            inv.amt = changes.amt;
            inv.clone()
        }))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        Ok(tables.invoices.remove(&id).is_some())
    }
}
