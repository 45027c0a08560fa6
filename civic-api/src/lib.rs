//! HTTP API for the civic transparency site.
//!
//! Exposes the tax record, council member and project tables as read-only
//! JSON collections plus a store health probe:
//!
//! | Route                      | Body                                   |
//! |----------------------------|----------------------------------------|
//! | `GET /api/test-db`         | `{"message", "time"}`                  |
//! | `GET /api/tax-records`     | array of tax records, ascending `id`   |
//! | `GET /api/council-members` | array of council members               |
//! | `GET /api/projects`        | array of projects                      |
//! | `GET /images/*`            | static files from `IMAGES_DIR`         |
//!
//! An empty collection answers `404 {"error": ...}`. Store failures answer
//! `500 {"error": ...}`; in production the message is replaced with
//! `"Internal server error"`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware::from_fn_with_state,
    routing::get,
};
use civic_core::db::RepositoryRegistry;
use civic_db_postgres::PostgresRepositoryFactory;
use civic_db_sqlite::SqliteRepositoryFactory;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use config::Settings;
use error::handle_internal_errors;
use routes::{council_members_handler, projects_handler, tax_records_handler, test_db_handler};
use state::AppState;

/// Every backend this binary can talk to.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(PostgresRepositoryFactory));
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// `*` allows any origin; otherwise a comma separated list of origins.
pub fn cors_layer(origins: &str) -> Result<CorsLayer> {
    let allow_origin = if origins.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin '{}'", origin))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}

pub fn build_router(state: Arc<AppState>) -> Result<Router> {
    let cors = cors_layer(&state.settings.cors_origin)?;
    let images = ServeDir::new(&state.settings.images_dir);

    Ok(Router::new()
        .route("/api/test-db", get(test_db_handler))
        .route("/api/tax-records", get(tax_records_handler))
        .route("/api/council-members", get(council_members_handler))
        .route("/api/projects", get(projects_handler))
        .nest_service("/images", images)
        .layer(from_fn_with_state(state.clone(), handle_internal_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Connect to the store, serve until a shutdown signal, then close the pool.
pub async fn run(settings: Settings) -> Result<()> {
    let db_config = settings.db_config();
    let registry = build_registry();

    let repo = match registry.create(&db_config).await {
        Ok(repo) => repo,
        Err(e) => {
            error!(backend = %db_config.backend, error = %e, "Error connecting to the database");
            return Err(e).context("Failed to connect to the database");
        }
    };
    info!("Connected to the database successfully.");

    let port = settings.port;
    let state = AppState::new(repo, settings);
    let app = build_router(state.clone())?;

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server is running on http://localhost:{port}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error");

    state.repo.close().await;
    info!("Database pool closed");

    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn registry_knows_both_backends() {
        assert_eq!(build_registry().available_backends(), vec!["postgres", "sqlite"]);
    }

    #[test]
    fn cors_accepts_wildcard_and_lists() {
        assert!(cors_layer("*").is_ok());
        assert!(cors_layer("https://tino.example, http://localhost:5173").is_ok());
    }

    #[test]
    fn cors_rejects_invalid_origin() {
        assert!(cors_layer("https://bad\norigin").is_err());
    }
}
