//! Blood-bank chat API server.
//!
//! Answers free-text blood-bank questions over HTTP: the query engine turns
//! each question into parameterized SQL, PostgreSQL runs it, and a prose
//! renderer writes the reply.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bb_chat_api::config::ApiConfig;
use bb_chat_api::state::AppState;
use bb_chat_api::{db, render, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bb-chat-api starting");

    let config = match std::env::var("BB_CONFIG") {
        Ok(path) => {
            tracing::info!(path = %path, "loading config file");
            ApiConfig::from_file(&path)?.with_overrides(|key| std::env::var(key).ok())
        }
        Err(_) => ApiConfig::from_env(),
    };

    let renderer = render::from_config(&config.renderer).await;
    tracing::info!(renderer = renderer.name(), "prose renderer ready");

    // Connect to PostgreSQL if a database URL is configured, otherwise serve sample data.
    let state = if let Some(database_url) = &config.database_url {
        tracing::info!("connecting to PostgreSQL");
        let pool = db::connect(database_url).await?;
        AppState::with_pool(pool, config.max_rows, renderer)
    } else {
        tracing::warn!("DATABASE_URL not set, answering from sample data");
        AppState {
            renderer,
            ..AppState::with_sample_data()
        }
    };
    let state = state.with_expose_sql(config.expose_sql);
    if config.expose_sql {
        tracing::warn!("translate endpoint enabled, generated SQL is visible to clients");
    }

    let app = routes::build_router_with_origins(state, &config.cors_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
