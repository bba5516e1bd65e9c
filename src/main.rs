use std::sync::Arc;

use tracing::info;

use cumulus::storage::LocalObjectStore;
use cumulus::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = cumulus::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        cumulus::logging::init_console_only(&config.logging.level);
    }

    info!("Cumulus - minimal multi-user file drive");

    if let Err(e) = run(config).await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> cumulus::Result<()> {
    config.validate()?;

    let db = Database::open(&config.database.path).await?;
    info!("Database ready at {}", config.database.path);

    let store = Arc::new(LocalObjectStore::from_config(&config.storage)?);
    info!("Object storage at {}", store.root().display());

    let server = WebServer::new(&config, db, store)?;
    info!(
        "Starting web server on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await
}
