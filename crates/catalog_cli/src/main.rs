//! Operator CLI over the catalog service.
//!
//! # Responsibility
//! - Open one database per process and hand it to the service explicitly.
//! - Print results as JSON on stdout; report failures on stderr.

use std::path::PathBuf;
use std::process;

use catalog_core::{
    default_log_level, init_logging, open_db, Catalog, CatalogId, CatalogRepository,
    CatalogService, SqliteCatalogRepository,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "catalog", about = "Manage catalog records", long_about = None)]
struct Cli {
    /// SQLite database file; created and migrated on first use
    #[arg(long, env = "CATALOG_DB")]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long, env = "CATALOG_LOG_LEVEL", requires = "log_dir")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, env = "CATALOG_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a catalog and print it with its new id
    Create(CatalogFields),
    /// Print one catalog
    Show { id: CatalogId },
    /// Overwrite every field of one catalog
    Update {
        id: CatalogId,
        #[command(flatten)]
        fields: CatalogFields,
    },
    /// Remove one catalog
    Remove { id: CatalogId },
    /// Print every catalog
    List,
    /// Print every catalog id
    Ids,
    /// Print every (id, name) pair
    Refs,
}

#[derive(Debug, Args)]
struct CatalogFields {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: String,

    #[arg(long, allow_negative_numbers = true)]
    price: i32,

    #[arg(long, allow_negative_numbers = true)]
    vat: i32,
}

impl CatalogFields {
    fn into_catalog(self) -> Catalog {
        Catalog::new(self.name, self.description, self.price, self.vat)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(message) = run(cli) {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| format!("failed to init logging: {err}"))?;
    }

    let conn = open_db(&cli.db)
        .map_err(|err| format!("failed to open `{}`: {err}", cli.db.display()))?;
    let repo = SqliteCatalogRepository::try_new(&conn)
        .map_err(|err| format!("database is not usable: {err}"))?;
    let service = CatalogService::new(repo);

    info!("event=cli_command module=cli status=start command={:?}", cli.command);
    execute(&service, cli.command)
}

fn execute<R: CatalogRepository>(
    service: &CatalogService<R>,
    command: Commands,
) -> Result<(), String> {
    match command {
        Commands::Create(fields) => {
            let created = service
                .create(fields.into_catalog())
                .map_err(|err| format!("failed to create catalog: {err}"))?;
            print_json(&created)
        }
        Commands::Show { id } => match service.find_by_primary_key(id) {
            Ok(Some(catalog)) => print_json(&catalog),
            Ok(None) => Err(format!("catalog {id} not found")),
            Err(err) => Err(format!("failed to load catalog {id}: {err}")),
        },
        Commands::Update { id, fields } => {
            let catalog = Catalog {
                id,
                ..fields.into_catalog()
            };
            let updated = service
                .update(catalog)
                .map_err(|err| format!("failed to update catalog {id}: {err}"))?;
            print_json(&updated)
        }
        Commands::Remove { id } => service
            .remove(id)
            .map_err(|err| format!("failed to remove catalog {id}: {err}")),
        Commands::List => {
            let catalogs = service
                .catalogs_list()
                .map_err(|err| format!("failed to list catalogs: {err}"))?;
            print_json(&catalogs)
        }
        Commands::Ids => {
            let ids = service
                .id_catalogs_list()
                .map_err(|err| format!("failed to list catalog ids: {err}"))?;
            print_json(&ids)
        }
        Commands::Refs => {
            let items = service
                .catalogs_reference_list()
                .map_err(|err| format!("failed to list catalog references: {err}"))?;
            print_json(&items)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to encode output: {err}"))?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{execute, CatalogFields, Cli, Commands};
    use catalog_core::{open_db_in_memory, CatalogService, SqliteCatalogRepository};
    use clap::Parser;

    fn fields(name: &str) -> CatalogFields {
        CatalogFields {
            name: name.to_string(),
            description: format!("{name} description"),
            price: 10,
            vat: 2,
        }
    }

    #[test]
    fn show_unknown_id_reports_not_found() {
        let conn = open_db_in_memory().unwrap();
        let service = CatalogService::new(SqliteCatalogRepository::try_new(&conn).unwrap());

        let err = execute(&service, Commands::Show { id: 404 }).unwrap_err();
        assert!(err.contains("not found"), "unexpected error: {err}");
    }

    #[test]
    fn remove_unknown_id_succeeds() {
        let conn = open_db_in_memory().unwrap();
        let service = CatalogService::new(SqliteCatalogRepository::try_new(&conn).unwrap());

        execute(&service, Commands::Remove { id: 404 }).unwrap();
    }

    #[test]
    fn create_then_show_and_listings_succeed() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
        let service = CatalogService::new(&repo);

        execute(&service, Commands::Create(fields("lamp"))).unwrap();
        let id = service.id_catalogs_list().unwrap()[0];

        execute(&service, Commands::Show { id }).unwrap();
        execute(&service, Commands::List).unwrap();
        execute(&service, Commands::Ids).unwrap();
        execute(&service, Commands::Refs).unwrap();

        execute(
            &service,
            Commands::Update {
                id,
                fields: fields("desk lamp"),
            },
        )
        .unwrap();
        let stored = service.find_by_primary_key(id).unwrap().unwrap();
        assert_eq!(stored.name, "desk lamp");
    }

    #[test]
    fn create_with_blank_name_fails() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
        let service = CatalogService::new(&repo);

        let err = execute(&service, Commands::Create(fields(" "))).unwrap_err();
        assert!(err.starts_with("failed to create catalog"));
        assert!(service.catalogs_list().unwrap().is_empty());
    }

    #[test]
    fn log_level_without_log_dir_is_rejected() {
        let result = Cli::try_parse_from([
            "catalog",
            "--db",
            "/tmp/catalog.db",
            "--log-level",
            "verbose",
            "list",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_update_with_flattened_fields() {
        let cli = Cli::try_parse_from([
            "catalog",
            "--db",
            "/tmp/catalog.db",
            "update",
            "7",
            "--name",
            "Name2",
            "--description",
            "Description2",
            "--price",
            "2",
            "--vat",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Update { id, fields } => {
                assert_eq!(id, 7);
                assert_eq!(fields.name, "Name2");
                assert_eq!(fields.price, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_requires_every_field() {
        let result = Cli::try_parse_from([
            "catalog", "--db", "/tmp/catalog.db", "create", "--name", "only",
        ]);
        assert!(result.is_err());
    }
}
