use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use kindred_api::auth::{AppState, AppStateInner};
use kindred_api::router::router;
use kindred_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kindred=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("KINDRED_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let data_dir = std::env::var("KINDRED_DATA_DIR").unwrap_or_else(|_| "data".into());
    let host = std::env::var("KINDRED_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("KINDRED_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init record store
    let store = Store::open(&PathBuf::from(&data_dir)).await?;

    let state: AppState = Arc::new(AppStateInner { store, jwt_secret });

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Kindred server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
