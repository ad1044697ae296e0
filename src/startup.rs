//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::infrastructure::store::{self, DocumentStore, PgDocumentStore};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers.
///
/// The store handle is created once at startup and reused for every request;
/// there is no teardown beyond process exit.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, settings: Arc<Settings>) -> Self {
        Self { store, settings }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create the document store over a PostgreSQL pool
        let pool = store::create_pool(&settings.database).await?;
        tracing::info!("Document store connection pool created");

        store::run_migrations(&pool).await?;
        tracing::info!("Document store migrations applied");

        let document_store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool));

        // Create app state
        let state = AppState::new(document_store, Arc::new(settings.clone()));

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
