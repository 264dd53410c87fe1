pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

/// Build the full API router. Everything except registration and the
/// health check sits behind bearer-token auth.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // User routes
        .route("/api/user/status", get(routes::user::status))
        // Catalog routes
        .route("/api/catalog/points", get(routes::catalog::points))
        .route("/api/catalog/groups", get(routes::catalog::groups))
        .route(
            "/api/catalog/conjunctions",
            get(routes::catalog::conjunctions),
        )
        // Quiz routes
        .route("/api/quiz/group/:group_id", get(routes::quiz::group))
        .route("/api/quiz/mixed", get(routes::quiz::mixed))
        .route("/api/quiz/results", post(routes::quiz::submit_result))
        .route("/api/quiz/results", get(routes::quiz::results))
        // Mark routes
        .route("/api/marks", put(routes::marks::upsert))
        .route("/api/marks", get(routes::marks::list))
        .route("/api/marks/counts", get(routes::marks::counts))
        // Activity routes
        .route("/api/activity", post(routes::activity::record))
        .route("/api/activity/dates", get(routes::activity::dates))
        // Progress routes
        .route("/api/progress/summary", get(routes::progress::summary))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/user/register", post(routes::user::register))
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

    // Connect to database
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState { db: Arc::new(db) };

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
