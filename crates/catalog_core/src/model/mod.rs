//! Domain model for catalog records.
//!
//! # Responsibility
//! - Define the in-memory shape of one persisted catalog row.
//! - Define projection shapes used by selection widgets.
//!
//! # Invariants
//! - A catalog is identified solely by its store-assigned `CatalogId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod catalog;
