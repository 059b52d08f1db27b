//! Files Manager API Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are rendered by
//! the `auth` crate.

use auth::{
    AuthConfig, MemorySessionStore, MemoryUserRepository, PgSessionStore, PgUserRepository,
    auth_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Which stores back the credential and session data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown STORE_BACKEND: {other}"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "files_manager=info,auth=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host: std::net::IpAddr = env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".to_string())
        .parse()?;
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()?;
    let addr = SocketAddr::new(host, port);

    let backend: StoreBackend = env::var("STORE_BACKEND")
        .unwrap_or_else(|_| "postgres".to_string())
        .parse()?;

    // Auth configuration
    let auth_config = match env::var("PASSWORD_PEPPER") {
        Ok(pepper_b64) => AuthConfig::with_pepper(platform::crypto::from_base64(&pepper_b64)?),
        Err(_) => AuthConfig::default(),
    };

    let cors = cors_layer();

    match backend {
        StoreBackend::Postgres => {
            // Credential store
            let database_url = env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            // Session store, on its own pool
            let session_database_url =
                env::var("SESSION_DATABASE_URL").unwrap_or_else(|_| database_url.clone());
            let sessions = Arc::new(PgSessionStore::open(&session_database_url).await?);

            // Expired sessions are swept at startup and then hourly.
            // Failures are logged and never stop the server.
            let cleanup = tokio::spawn(cleanup_sessions(
                sessions.clone(),
                SESSION_CLEANUP_INTERVAL,
            ));

            let users = Arc::new(PgUserRepository::new(pool.clone()));
            let app = auth_router(users, sessions.clone(), auth_config);

            let served = serve(app, cors, addr).await;
            cleanup.abort();
            served?;

            sessions.close().await;
            pool.close().await;
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; all data is lost on exit");

            let users = Arc::new(MemoryUserRepository::new());
            let sessions = Arc::new(MemorySessionStore::new());
            let app = auth_router(users, sessions.clone(), auth_config);

            serve(app, cors, addr).await?;

            sessions.close();
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Delete expired session rows on every tick. The first tick fires at once.
async fn cleanup_sessions(sessions: Arc<PgSessionStore>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if let Err(e) = sessions.cleanup_expired().await {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }
}

/// CORS configuration
fn cors_layer() -> CorsLayer {
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            http::HeaderName::from_static("x-token"),
        ]))
}

async fn serve(app: Router, cors: CorsLayer, addr: SocketAddr) -> anyhow::Result<()> {
    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" Memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("redis".parse::<StoreBackend>().is_err());
    }
}
