//! pressgraph server binary
//!
//! Loads settings, connects the pool, parses the schema declaration, and
//! serves the GraphQL endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::mysql::MySqlPoolOptions;

use pressgraph::config::Settings;
use pressgraph::graphql::{Executor, SchemaIndex};
use pressgraph::server;
use pressgraph::service::Store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config_path =
        std::env::var("PRESSGRAPH_CONFIG").unwrap_or_else(|_| "settings.yaml".to_string());
    let settings = Settings::from_yaml_file(&config_path)
        .with_context(|| format!("failed to load settings from {}", config_path))?;

    let pool = MySqlPoolOptions::new()
        .connect(&settings.database.connection_url())
        .await
        .context("failed to connect to the database")?;

    let sdl = std::fs::read_to_string(&settings.server.schema_path)
        .with_context(|| format!("failed to read {}", settings.server.schema_path))?;
    let schema = SchemaIndex::parse(&sdl)?;

    let store = Store::new(pool, settings.database.table_prefix.clone());
    let executor = Arc::new(Executor::new(store, schema));
    let app = server::router(executor, &settings.server.graphql_path);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.server.bind))?;
    tracing::info!(
        addr = %settings.server.bind,
        path = %settings.server.graphql_path,
        "pressgraph listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
