use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use kanban_api::{AppState, AppStateInner};
use kanban_db::Database;
use kanban_types::Palette;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kanban=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("KANBAN_DB_PATH").unwrap_or_else(|_| "kanban.db".into());
    let host = std::env::var("KANBAN_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("KANBAN_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let palette = Arc::new(Palette::from_env()?);

    // Init database
    let db = Database::open(&PathBuf::from(&db_path), palette)?;

    let state: AppState = Arc::new(AppStateInner { db });

    let app = kanban_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Kanban server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
