mod config;
mod error;
mod models;
mod routes;
mod tmdb;

use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, tmdb::TmdbClient};

pub struct AppState {
    pub tmdb: TmdbClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,marquee=debug,tower_http=info".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let tmdb = TmdbClient::from_config(&config)?;
    tracing::info!(base_url = %config.tmdb_base_url, "upstream configured");

    let state = Arc::new(AppState { tmdb });

    let app = routes::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any)),
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
