//! HTTP API - device-scoped training settings and completed workouts

pub mod device;
pub mod error;
pub mod health;
pub mod settings;
pub mod types;
pub mod ui;
pub mod validate;
pub mod workouts;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{delete, get},
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::db::Database;

pub use device::{DEVICE_ID_HEADER, DeviceId, require_device_id};
pub use error::{ApiError, ApiResult};
pub use health::health_routes;

/// State shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }
}

/// API routes relative to the base path
pub fn api_routes() -> Router<AppState> {
    let scoped = Router::new()
        .route(
            "/training-settings",
            get(settings::get_training_settings).put(settings::put_training_settings),
        )
        .route(
            "/completed-workouts",
            get(workouts::list_completed_workouts).post(workouts::complete_workout),
        )
        .route("/completed-workouts/:day", delete(workouts::uncomplete_workout))
        .route_layer(middleware::from_fn(require_device_id));

    Router::new()
        .merge(scoped)
        .merge(health_routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// `/api/` -> `/api`, `api` -> `/api`, `/` -> ``
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Full application router: API under `base_path`, UI bundle as fallback
pub fn build_router(state: AppState, base_path: &str, dist_dir: Option<&Path>) -> Router {
    let base_path = normalize_base_path(base_path);

    let mut router = if base_path.is_empty() {
        Router::new().merge(api_routes())
    } else {
        Router::new().nest(&base_path, api_routes())
    };

    if let Some(ui) = dist_dir.and_then(ui::ui_service) {
        router = router.fallback_service(ui);
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the database and serve until Ctrl+C
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let db = Database::open(&config.database_path)?;
    info!("Using SQLite database at {}", config.database_path.display());

    let app = build_router(AppState::new(db), &config.base_path, Some(config.dist_dir.as_path()));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Ergotracker server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/api"), "/api");
        assert_eq!(normalize_base_path("/api/"), "/api");
        assert_eq!(normalize_base_path("api"), "/api");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/v1/ergo/"), "/v1/ergo");
    }
}
