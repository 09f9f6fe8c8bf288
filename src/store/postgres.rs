//! PostgreSQL store backed by a sqlx connection pool.
//!
//! Reads that need more than one statement run in a repeatable-read
//! transaction. The read-then-write of an invoice update locks the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Postgres, Transaction};

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        company::{Company, CompanyChanges, CompanyDetail, CompanySummary},
        invoice::{
            Invoice, InvoiceChanges, InvoiceCompanyRow, InvoiceDetail, InvoiceSummary, NewInvoice,
            next_paid_date,
        },
    },
    store::{Store, duplicate_company},
};

/// [`Store`] implementation over a PostgreSQL pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Open a transaction whose statements all read from one snapshot.
async fn begin_snapshot(pool: &DbPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // READ COMMITTED, the default, takes a new snapshot per statement
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

async fn invoice_ids(conn: &mut PgConnection, code: &str) -> Result<Vec<i32>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id")
        .bind(code)
        .fetch_all(conn)
        .await
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummary>, AppError> {
        let companies = sqlx::query_as::<_, CompanySummary>(
            "SELECT code, name FROM companies ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    async fn get_company(&self, code: &str) -> Result<Option<CompanyDetail>, AppError> {
        let mut tx = begin_snapshot(&self.pool).await?;

        let Some(company) = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let invoices = invoice_ids(&mut *tx, code).await?;

        tx.commit().await?;

        Ok(Some(CompanyDetail::new(company, invoices)))
    }

    async fn create_company(&self, company: Company) -> Result<Company, AppError> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
            "#,
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| AppError::from_write(err, || duplicate_company(&company.name)))
    }

    async fn update_company(
        &self,
        code: &str,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $1, description = $2
            WHERE code = $3
            RETURNING code, name, description
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| AppError::from_write(err, || duplicate_company(&changes.name)))
    }

    async fn delete_company(&self, code: &str) -> Result<bool, AppError> {
        let deleted = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, AppError> {
        let invoices =
            sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(invoices)
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<InvoiceDetail>, AppError> {
        let row = sqlx::query_as::<_, InvoiceCompanyRow>(
            r#"
            SELECT i.id, i.amt, i.paid, i.add_date, i.paid_date,
                   c.code, c.name, c.description
            FROM invoices AS i
            INNER JOIN companies AS c ON i.comp_code = c.code
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Option<Invoice>, AppError> {
        // Selecting from companies makes a missing company yield no row
        // instead of a foreign key violation
        let created = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (comp_code, amt)
            SELECT code, $2 FROM companies WHERE code = $1
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(&invoice.comp_code)
        .bind(invoice.amt)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_invoice(
        &self,
        id: i32,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so the paid-date decision holds until commit
        let current: Option<(bool, Option<DateTime<Utc>>)> =
            sqlx::query_as("SELECT paid, paid_date FROM invoices WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((current_paid, current_paid_date)) = current else {
            tx.rollback().await?;
            return Ok(None);
        };

        let paid = changes.paid.unwrap_or(current_paid);
        let paid_date = next_paid_date(current_paid_date, paid, Utc::now());

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET amt = $1, paid = $2, paid_date = $3
            WHERE id = $4
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(changes.amt)
        .bind(paid)
        .bind(paid_date)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(invoice))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError> {
        let deleted = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}
