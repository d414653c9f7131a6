//! CLI command implementations
//!
//! Both commands load the config, install logging, build the registry and
//! seed an in-memory store before doing their work.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::{HttpServer, ListState};
use crate::observability::init_logging;
use crate::pagination::ResultEnvelope;
use crate::results::AdvancedResults;
use crate::schema::CollectionRegistry;
use crate::store::MemoryStore;

/// Parse arguments and run the selected command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command).await
}

pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(&config).await,
        Command::Query {
            config,
            collection,
            query: query_string,
        } => query(&config, &collection, &query_string).await,
    }
}

/// Serve list endpoints until Ctrl-C
pub async fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(&config.logging)?;

    let (registry, store) = open_store(&config)?;
    let state = Arc::new(ListState::new(store, &registry));

    info!(
        collections = ?registry.names().collect::<Vec<_>>(),
        "starting server"
    );
    HttpServer::new(config.http.clone(), state).start().await?;
    Ok(())
}

/// Run one query and print the envelope as JSON on stdout
pub async fn query(config_path: &Path, collection: &str, query_string: &str) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(&config.logging)?;

    let envelope = execute_query(&config, collection, query_string).await?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &envelope)?;
    writeln!(stdout)?;
    Ok(())
}

/// Seed a store from `config` and run one query against `collection`
pub async fn execute_query(
    config: &Config,
    collection: &str,
    query_string: &str,
) -> CliResult<ResultEnvelope> {
    let (registry, store) = open_store(config)?;
    let schema = registry
        .get(collection)
        .cloned()
        .ok_or_else(|| CliError::UnknownCollection(collection.to_string()))?;

    let results = AdvancedResults::new(store, schema);
    Ok(results.run_query_string(query_string).await?)
}

/// Build the registry and a memory store seeded from the configured files
pub fn open_store(config: &Config) -> CliResult<(CollectionRegistry, Arc<MemoryStore>)> {
    let registry = config.registry()?;
    let store = MemoryStore::for_registry(&registry);

    for collection in &config.collections {
        if let Some(seed) = &collection.seed {
            let inserted = store.seed_from_file(collection.schema.store_collection(), seed)?;
            info!(
                collection = %collection.schema.name,
                documents = inserted,
                "seeded collection"
            );
        }
    }

    Ok((registry, Arc::new(store)))
}
