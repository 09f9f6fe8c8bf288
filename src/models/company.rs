//! Company data models and API request/response types.
//!
//! This module defines:
//! - `Company`: Database entity representing a company
//! - `CompanySummary` / `CompanyDetail`: list and read projections
//! - `CompanyRequest`: Request body for creating and updating companies

use serde::{Deserialize, Serialize};

use crate::{error::AppError, slug::slugify};

/// Represents a company record from the database.
///
/// # Database Table
///
/// Maps to the `companies` table. The `code` primary key is derived from the
/// name at creation time and never changes afterwards.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Company {
    /// URL-safe identifier, e.g. `acme-corp`
    pub code: String,

    /// Display name, unique across companies
    pub name: String,

    /// Free text description
    pub description: Option<String>,
}

/// Projection returned by `GET /companies`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

/// Company with the ids of every invoice billed to it.
///
/// # JSON Example
///
/// ```json
/// {
///   "code": "acme-corp",
///   "name": "Acme Corp",
///   "description": "Maker of anvils",
///   "invoices": [1, 4, 7]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,

    /// Invoice ids, ascending
    pub invoices: Vec<i32>,
}

impl CompanyDetail {
    pub fn new(company: Company, invoices: Vec<i32>) -> Self {
        Self {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices,
        }
    }
}

/// Request body for `POST /companies` and `PUT /companies/{code}`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Acme Corp",
///   "description": "Maker of anvils"
/// }
/// ```
///
/// # Validation
///
/// - `name`: Required, must contain at least one non-blank character
/// - `description`: Optional
#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl CompanyRequest {
    /// Check the request fields and return the editable company fields.
    pub fn into_changes(self) -> Result<CompanyChanges, AppError> {
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::InvalidRequest("name is required".to_string()))?;

        Ok(CompanyChanges {
            name,
            description: self.description,
        })
    }

    /// Check the request fields, then derive the company code from the name.
    pub fn into_new_company(self) -> Result<Company, AppError> {
        let changes = self.into_changes()?;

        let code = slugify(&changes.name);
        if code.is_empty() {
            return Err(AppError::InvalidRequest(format!(
                "name '{}' does not contain any ASCII letters or digits",
                changes.name
            )));
        }

        Ok(Company {
            code,
            name: changes.name,
            description: changes.description,
        })
    }
}

/// Mutable company fields. The code is not part of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyChanges {
    pub name: String,
    pub description: Option<String>,
}
