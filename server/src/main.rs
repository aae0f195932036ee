use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use eventful_server::config::Config;
use eventful_server::db::{ConnectionManager, PgConnector, PgStore};
use eventful_server::routes::create_routes;
use eventful_server::services::seed_sample_events;
use eventful_server::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let connections = Arc::new(ConnectionManager::new(PgConnector::from_config(&config)));
    let pool = connections
        .acquire()
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let store = Arc::new(PgStore::new(connections));

    if config.seed_sample_events {
        seed_sample_events(store.as_ref())
            .await
            .expect("Failed to seed sample events");
    }

    let state = AppState::new(store, config.environment);
    let app = create_routes(state, config.cors_allowed_origins.as_deref());

    tracing::info!("🚀 Server running at http://{}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
