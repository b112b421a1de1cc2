//! Catalog domain model.
//!
//! # Responsibility
//! - Mirror one `catalog_` row in memory.
//! - Provide field validation for write paths above the repository.
//!
//! # Invariants
//! - `id == 0` means the record has not been persisted yet.
//! - Once assigned by the store, `id` never changes for the same row.
//! - `price` and `vat` are opaque integers; no unit or scale is implied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned primary key of a catalog row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CatalogId = i64;

/// Identifier carried by records that were never persisted.
pub const UNSAVED_ID: CatalogId = 0;

/// Field-level rule violated by a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogValidationError {
    #[error("catalog name must not be blank")]
    BlankName,
    #[error("catalog description must not be blank")]
    BlankDescription,
}

/// In-memory record for one catalog row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Primary key; `UNSAVED_ID` until the first insert.
    #[serde(default)]
    pub id: CatalogId,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub vat: i32,
}

impl Catalog {
    /// Creates an unsaved catalog record.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: i32,
        vat: i32,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description: description.into(),
            price,
            vat,
        }
    }

    /// Returns whether the store has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }

    /// Checks required text fields.
    ///
    /// # Errors
    /// - `BlankName` when `name` is empty after trimming.
    /// - `BlankDescription` when `description` is empty after trimming.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        if self.name.trim().is_empty() {
            return Err(CatalogValidationError::BlankName);
        }
        if self.description.trim().is_empty() {
            return Err(CatalogValidationError::BlankDescription);
        }
        Ok(())
    }
}

/// Id/label pair used to populate selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub code: CatalogId,
    pub name: String,
}
