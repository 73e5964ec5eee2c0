//! Axum server setup
//!
//! Startup order: directories, database pool, migrations, router,
//! listener. Shuts down gracefully on SIGTERM/Ctrl+C.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::db::{create_pool, run_migrations};
use crate::error::ServerResult;
use crate::service::ListingService;
use crate::state::AppState;
use crate::uploads::UploadStore;

/// Create directories, open the database and run migrations.
///
/// Everything the server needs before it can accept requests. Also used on
/// its own to initialize a fresh deployment.
pub async fn prepare(config: &ServerConfig) -> ServerResult<AppState> {
    let uploads = UploadStore::from_config(config);
    uploads.ensure_dir().await?;
    tracing::info!(uploads = %uploads.dir().display(), "Upload directory ready");

    tracing::info!("Opening database at {}", config.db_path.display());
    let pool = create_pool(&config.db_path).await?;
    run_migrations(&pool).await?;

    Ok(AppState::new(
        ListingService::new(pool, uploads),
        config.clone(),
    ))
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config().static_dir);
    let body_limit = state.config().max_request_bytes();

    Router::new()
        .merge(routes::health::router())
        .merge(routes::listings::router())
        .nest_service("/static", static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// run_server(config).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> ServerResult<()> {
    let state = prepare(&config).await?;
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn prepare_creates_database_and_upload_dir() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::with_root(temp.path());

        let state = prepare(&config).await.unwrap();

        assert!(config.db_path.exists());
        assert!(config.upload_dir().is_dir());
        assert!(state.listings().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn prepare_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::with_root(temp.path());

        let first = prepare(&config).await.unwrap();
        first
            .listings()
            .create(Default::default(), &[])
            .await
            .unwrap();

        let second = prepare(&config).await.unwrap();
        assert_eq!(second.listings().list().await.unwrap().len(), 1);
    }
}
