pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verb_quiz_core::{RankThresholds, VerbCatalog};

use crate::config::Config;
use crate::store::{Store, StoreLimits};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<VerbCatalog>,
    pub store: Arc<Store>,
    pub thresholds: RankThresholds,
}

impl AppState {
    pub fn new(catalog: VerbCatalog, thresholds: RankThresholds) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store: Arc::new(Store::new()),
            thresholds,
        }
    }

    /// Replace the store with an empty one bounded by `limits`.
    pub fn with_limits(mut self, limits: StoreLimits) -> Self {
        self.store = Arc::new(Store::with_limits(limits));
        self
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Device routes
        .route("/api/device/status", get(routes::device::status))
        // Set routes
        .route("/api/sets", get(routes::sets::list))
        .route("/api/sets/{name}", get(routes::sets::get))
        // Session routes
        .route("/api/sessions", post(routes::sessions::start))
        .route(
            "/api/sessions/{id}",
            get(routes::sessions::get).delete(routes::sessions::delete),
        )
        .route("/api/sessions/{id}/answer", post(routes::sessions::answer))
        .route("/api/sessions/{id}/results", get(routes::sessions::results))
        // Score routes
        .route("/api/scores", get(routes::scores::list))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/device/register", post(routes::device::register))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading verb catalog...");
    let catalog = config.load_catalog()?;
    tracing::info!("Loaded {} verb sets", catalog.len());

    let state = AppState::new(catalog, config.rank_thresholds).with_limits(config.store_limits);
    let sweeper = jobs::start_background_jobs(state.store.clone());

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    sweeper.abort();
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
