//! Leads Dashboard Backend
//!
//! Fetches lead records from a remote source and serves them, with search and tag
//! filtering, to the dashboard over a small REST API.

mod api;
mod config;
mod errors;
mod mapper;
mod models;
mod source;
mod store;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use config::Config;
use mapper::DemoAugmenter;
use source::HttpRecordSource;
use store::LeadsStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LeadsStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Starting Leads Dashboard Backend");
    tracing::info!("Fetch limit: {}", config.fetch_limit);
    tracing::info!("Bind address: {}", config.bind_addr);

    match config.demo_seed {
        Some(seed) => tracing::info!("Demo data seed: {}", seed),
        None => tracing::warn!("No LEADS_DEMO_SEED set; demo tags and flags vary per load"),
    }

    let source = Arc::new(HttpRecordSource::new(
        config.source_url.clone(),
        config.fetch_timeout,
    )?);
    tracing::info!("Record source: {}", source.url());
    let store = Arc::new(LeadsStore::new(
        source,
        DemoAugmenter::new(config.demo_seed),
        config.fetch_limit,
    ));

    // A failed initial load is kept in the store; the dashboard can retry.
    if config.load_on_startup {
        if let Err(e) = store.load().await {
            tracing::warn!("Initial load failed: {}", e);
        }
    }

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    tracing::debug!(
        "Building router for source {}",
        state.config.source_url
    );

    // API routes
    let api_routes = Router::new()
        // Leads
        .route("/leads", get(api::get_leads))
        .route("/leads/load", post(api::load_leads))
        // Filters
        .route("/filters", delete(api::clear_filters))
        .route("/filters/search", put(api::set_search_query))
        .route("/filters/tags/{name}/toggle", post(api::toggle_tag))
        // Tags
        .route("/tags", get(api::list_tags))
        .fallback(api::not_found);

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
