//! Catalog repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and projection queries over the `catalog_` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every statement binds values by name, never by position.
//! - Each call prepares, runs and finalizes its statements before returning.
//! - List queries carry no `ORDER BY`; callers must not rely on row order.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::catalog::{Catalog, CatalogId, ReferenceItem};
use log::debug;
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use thiserror::Error;

const CATALOG_TABLE: &str = "catalog_";
const CATALOG_COLUMNS: [&str; 5] = ["id_catalog", "name", "description", "price", "vat"];

const SQL_SELECT: &str = "SELECT id_catalog, name, description, price, vat
     FROM catalog_
     WHERE id_catalog = :id_catalog;";
const SQL_INSERT: &str = "INSERT INTO catalog_ (name, description, price, vat)
     VALUES (:name, :description, :price, :vat);";
const SQL_DELETE: &str = "DELETE FROM catalog_ WHERE id_catalog = :id_catalog;";
const SQL_UPDATE: &str = "UPDATE catalog_
     SET
        id_catalog = :id_catalog,
        name = :name,
        description = :description,
        price = :price,
        vat = :vat
     WHERE id_catalog = :id_catalog;";
const SQL_SELECT_ALL: &str = "SELECT id_catalog, name, description, price, vat FROM catalog_;";
const SQL_SELECT_ALL_ID: &str = "SELECT id_catalog FROM catalog_;";
const SQL_SELECT_ALL_REFERENCE: &str = "SELECT id_catalog, name FROM catalog_;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(
        "connection schema version {actual_version} does not match expected {expected_version}"
    )]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog persistence.
pub trait CatalogRepository {
    /// Inserts a new row and writes the generated key back onto `catalog`.
    fn insert(&self, catalog: &mut Catalog) -> RepoResult<CatalogId>;
    /// Loads one row by primary key; `None` when no row matches.
    fn load(&self, id: CatalogId) -> RepoResult<Option<Catalog>>;
    /// Overwrites every column of the row keyed by `catalog.id`.
    ///
    /// Matching zero rows is not an error.
    fn store(&self, catalog: &Catalog) -> RepoResult<()>;
    /// Hard-deletes one row; matching zero rows is not an error.
    fn delete(&self, id: CatalogId) -> RepoResult<()>;
    /// Loads every row in store order.
    fn list_all(&self) -> RepoResult<Vec<Catalog>>;
    /// Loads every primary key in store order.
    fn list_all_ids(&self) -> RepoResult<Vec<CatalogId>>;
    /// Loads every `(id, name)` pair in store order.
    fn list_reference_items(&self) -> RepoResult<Vec<ReferenceItem>>;
}

impl<R: CatalogRepository + ?Sized> CatalogRepository for &R {
    fn insert(&self, catalog: &mut Catalog) -> RepoResult<CatalogId> {
        (**self).insert(catalog)
    }

    fn load(&self, id: CatalogId) -> RepoResult<Option<Catalog>> {
        (**self).load(id)
    }

    fn store(&self, catalog: &Catalog) -> RepoResult<()> {
        (**self).store(catalog)
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        (**self).delete(id)
    }

    fn list_all(&self) -> RepoResult<Vec<Catalog>> {
        (**self).list_all()
    }

    fn list_all_ids(&self) -> RepoResult<Vec<CatalogId>> {
        (**self).list_all_ids()
    }

    fn list_reference_items(&self) -> RepoResult<Vec<ReferenceItem>> {
        (**self).list_reference_items()
    }
}

/// SQLite-backed catalog repository.
#[derive(Debug)]
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Creates repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is not the
    ///   latest migration version.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the `catalog_` layout.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn insert(&self, catalog: &mut Catalog) -> RepoResult<CatalogId> {
        self.conn.execute(
            SQL_INSERT,
            named_params! {
                ":name": catalog.name.as_str(),
                ":description": catalog.description.as_str(),
                ":price": catalog.price,
                ":vat": catalog.vat,
            },
        )?;

        catalog.id = self.conn.last_insert_rowid();
        debug!(
            "event=catalog_insert module=repo status=ok id_catalog={}",
            catalog.id
        );
        Ok(catalog.id)
    }

    fn load(&self, id: CatalogId) -> RepoResult<Option<Catalog>> {
        let catalog = self
            .conn
            .query_row(SQL_SELECT, named_params! { ":id_catalog": id }, parse_catalog_row)
            .optional()?;
        Ok(catalog)
    }

    fn store(&self, catalog: &Catalog) -> RepoResult<()> {
        let changed = self.conn.execute(
            SQL_UPDATE,
            named_params! {
                ":id_catalog": catalog.id,
                ":name": catalog.name.as_str(),
                ":description": catalog.description.as_str(),
                ":price": catalog.price,
                ":vat": catalog.vat,
            },
        )?;

        log_write_outcome("catalog_store", catalog.id, changed);
        Ok(())
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(SQL_DELETE, named_params! { ":id_catalog": id })?;

        log_write_outcome("catalog_delete", id, changed);
        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<Catalog>> {
        let mut stmt = self.conn.prepare(SQL_SELECT_ALL)?;
        let catalogs = stmt
            .query_map([], parse_catalog_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(catalogs)
    }

    fn list_all_ids(&self) -> RepoResult<Vec<CatalogId>> {
        let mut stmt = self.conn.prepare(SQL_SELECT_ALL_ID)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, CatalogId>("id_catalog"))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn list_reference_items(&self) -> RepoResult<Vec<ReferenceItem>> {
        let mut stmt = self.conn.prepare(SQL_SELECT_ALL_REFERENCE)?;
        let items = stmt
            .query_map([], |row| {
                Ok(ReferenceItem {
                    code: row.get("id_catalog")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }
}

fn parse_catalog_row(row: &Row<'_>) -> rusqlite::Result<Catalog> {
    Ok(Catalog {
        id: row.get("id_catalog")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price: row.get("price")?,
        vat: row.get("vat")?,
    })
}

fn log_write_outcome(event: &str, id: CatalogId, changed: usize) {
    if changed == 0 {
        debug!("event={event} module=repo status=noop id_catalog={id}");
    } else {
        debug!("event={event} module=repo status=ok id_catalog={id}");
    }
}

fn ensure_catalog_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, CATALOG_TABLE)? {
        return Err(RepoError::MissingRequiredTable(CATALOG_TABLE));
    }

    for column in CATALOG_COLUMNS {
        if !table_has_column(conn, CATALOG_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: CATALOG_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
