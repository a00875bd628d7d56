//! EventHub - Application Entry Point
//!
//! This is the main entry point for the EventHub server.

use std::{net::SocketAddr, sync::Arc};

use axum::middleware;
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eventhub::{
    config::{LogFormat, CONFIG},
    create_router,
    db::{self, connection::create_pool},
    middleware::rate_limit_middleware,
    services::LogNotifier,
    state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into());

    match CONFIG.server.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting EventHub server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize Redis connection
    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    // Create application state
    let state = AppState::new(
        db_pool,
        redis_conn,
        Arc::new(LogNotifier),
        CONFIG.clone(),
    );

    // Build the router
    let app = create_router(state.clone()).layer(middleware::from_fn_with_state(
        state,
        rate_limit_middleware,
    ));

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
