mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use studydesk_api::{AppState, AppStateInner, build_router};
use studydesk_core::Backend;
use studydesk_db::{Database, Paths};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studydesk=debug,studydesk_api=debug,studydesk_core=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = Arc::new(Database::open(&config.db_path)?);

    // Shared state
    let backend = Backend::new(db, Paths::new(config.app_id.clone()))
        .with_reserved_admin_email(config.admin_email.clone());
    let state: AppState = Arc::new(AppStateInner::new(backend, config.jwt_secret.clone(), config.language));

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("StudyDesk server listening on {} (app {})", addr, config.app_id);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
