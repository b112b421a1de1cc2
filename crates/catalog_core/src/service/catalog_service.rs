//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide create/update/remove/find entry points for catalog callers.
//! - Validate records before they reach the repository.
//!
//! # Invariants
//! - The service is built with an explicit repository; there is no
//!   process-wide instance.
//! - Write paths call `Catalog::validate()` before any SQL runs.
//! - Missing ids on update/remove stay silent, matching repository behavior.

use crate::model::catalog::{Catalog, CatalogId, CatalogValidationError, ReferenceItem};
use crate::repo::catalog_repo::{CatalogRepository, RepoError};
use log::{info, warn};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure surfaced by catalog use cases.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] CatalogValidationError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Use-case service wrapper for catalog CRUD operations.
#[derive(Debug)]
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new catalog.
    ///
    /// Returns the record with its store-assigned id.
    pub fn create(&self, mut catalog: Catalog) -> ServiceResult<Catalog> {
        validate_for_write("catalog_create", &catalog)?;
        self.repo.insert(&mut catalog)?;
        info!(
            "event=catalog_create module=service status=ok id_catalog={}",
            catalog.id
        );
        Ok(catalog)
    }

    /// Validates and overwrites an existing catalog row.
    ///
    /// An id that matches no row is a silent no-op.
    pub fn update(&self, catalog: Catalog) -> ServiceResult<Catalog> {
        validate_for_write("catalog_update", &catalog)?;
        self.repo.store(&catalog)?;
        info!(
            "event=catalog_update module=service status=ok id_catalog={}",
            catalog.id
        );
        Ok(catalog)
    }

    /// Removes one catalog by id.
    pub fn remove(&self, id: CatalogId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=catalog_remove module=service status=ok id_catalog={id}");
        Ok(())
    }

    /// Gets one catalog by id.
    pub fn find_by_primary_key(&self, id: CatalogId) -> ServiceResult<Option<Catalog>> {
        Ok(self.repo.load(id)?)
    }

    /// Lists every catalog.
    pub fn catalogs_list(&self) -> ServiceResult<Vec<Catalog>> {
        Ok(self.repo.list_all()?)
    }

    /// Lists every catalog id.
    pub fn id_catalogs_list(&self) -> ServiceResult<Vec<CatalogId>> {
        Ok(self.repo.list_all_ids()?)
    }

    /// Lists `(id, name)` pairs for selection widgets.
    pub fn catalogs_reference_list(&self) -> ServiceResult<Vec<ReferenceItem>> {
        Ok(self.repo.list_reference_items()?)
    }
}

fn validate_for_write(event: &str, catalog: &Catalog) -> Result<(), CatalogValidationError> {
    catalog.validate().inspect_err(|err| {
        warn!(
            "event={event} module=service status=rejected id_catalog={} reason={err}",
            catalog.id
        );
    })
}
