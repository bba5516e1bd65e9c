//! Web server for Cumulus.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::db::Database;
use crate::storage::LocalObjectStore;
use crate::{CumulusError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_object_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Filesystem root the object router serves from.
    storage_root: PathBuf,
    /// Public base URL for stored objects.
    public_base_url: String,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database, store: Arc<LocalObjectStore>) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| CumulusError::Config(format!("invalid server address: {}", e)))?;

        let storage_root = store.root().to_path_buf();
        let app_state = AppState::new(db, store)
            .with_max_upload_size(config.storage.max_upload_size_bytes());

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            storage_root,
            public_base_url: config.storage.public_base_url.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the complete router (API, health check, object serving).
    pub fn router(&self) -> axum::Router {
        let mut router = create_router(self.app_state.clone()).merge(create_health_router());

        if let Some(objects) = create_object_router(&self.public_base_url, &self.storage_root) {
            router = router.merge(objects);
        }

        router
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }
}
