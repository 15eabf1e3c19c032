use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use handlers::{health_check, schema_handler};
use sql_generation_handler::sql_translation_handler;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
};

use crate::config::ServerConfig;
use crate::schema_catalog::{CatalogError, HierarchyIndex, SchemaCatalog, SchemaConfig};

pub mod handlers;
pub mod models;
mod sql_generation_handler;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<SchemaCatalog>,
    pub hierarchy: Arc<HierarchyIndex>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(catalog: SchemaCatalog, hierarchy: HierarchyIndex, config: ServerConfig) -> Self {
        AppState {
            catalog: Arc::new(catalog),
            hierarchy: Arc::new(hierarchy),
            config,
        }
    }

    /// Load the schema file named in the configuration.
    pub fn load(config: ServerConfig) -> Result<Self, CatalogError> {
        let (catalog, hierarchy) = SchemaConfig::from_yaml_file(&config.schema_path)?.build()?;
        Ok(AppState::new(catalog, hierarchy, config))
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to load schema: {0}")]
    Schema(#[from] CatalogError),

    #[error("Failed to bind HTTP listener to {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Requests running past the configured timeout are answered with 408.
fn request_timeout_layer(secs: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(secs))
}

pub fn router(app_state: AppState) -> Router {
    let body_limit = app_state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/query/sql", post(sql_translation_handler))
        .route("/schema", get(schema_handler))
        .layer(request_timeout_layer(app_state.config.request_timeout_secs))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CatchPanicLayer::new())
        .with_state(Arc::new(app_state))
}

pub async fn run_with_config(config: ServerConfig) -> Result<(), ServerError> {
    log::info!(
        "Server configuration: http={}:{}, schema={}, passthrough={}",
        config.http_host,
        config.http_port,
        config.schema_path,
        config.passthrough_unknown
    );

    let app_state = AppState::load(config.clone())?;
    log::info!(
        "Loaded {} table(s) from {}",
        app_state.catalog.tables().count(),
        config.schema_path
    );

    let http_bind_address = format!("{}:{}", config.http_host, config.http_port);
    log::info!("Starting HTTP server on {}", http_bind_address);

    let http_listener = TcpListener::bind(&http_bind_address)
        .await
        .map_err(|source| ServerError::Bind {
            address: http_bind_address.clone(),
            source,
        })?;
    log::info!("Successfully bound HTTP listener to {}", http_bind_address);

    axum::serve(http_listener, router(app_state)).await?;
    Ok(())
}
