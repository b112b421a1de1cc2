//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the catalog data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories do not validate entities; callers do.
//! - Missing rows are reported as `None` or silent no-ops, never as errors.

pub mod catalog_repo;
