use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use recipe_catalogue::utils::{logger, validation::Validate};
use recipe_catalogue::{
    build_router, CatalogueConfig, CatalogueService, CliConfig, InMemoryStore, LocalStorage,
};
use tokio::net::TcpListener;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting recipe-catalogue");
    tracing::debug!("CLI config: {:?}", cli);

    let mut config = CatalogueConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config file '{}'", cli.config))?;
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        return Err(e.into());
    }

    let store = match config.snapshot_path()? {
        Some(path) => {
            let directory = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            let file = path
                .file_name()
                .and_then(|f| f.to_str())
                .context("Snapshot location must name a UTF-8 file")?
                .to_string();
            tracing::info!("Persisting catalogue to {}", path.display());
            InMemoryStore::open(LocalStorage::new(directory), file).await?
        }
        None => {
            tracing::warn!("No snapshot configured, catalogue will not survive restarts");
            InMemoryStore::new()
        }
    };

    store
        .seed(&config.reference.cuisines, &config.reference.tags)
        .await?;

    let store = Arc::new(store);
    let service = Arc::new(CatalogueService::with_policy(
        store.clone(),
        store,
        config.tag_count_policy(),
    ));
    tracing::info!("Tag count policy: {:?}", config.tag_count_policy());

    let address = config.socket_addr()?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    let span = logger::service_span(address, config.store.snapshot.as_deref());
    recipe_catalogue::adapters::http::serve(listener, build_router(service))
        .instrument(span)
        .await?;
    Ok(())
}
