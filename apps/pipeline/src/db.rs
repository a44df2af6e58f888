use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::PipelineError;

/// Opens a single-connection PostgreSQL pool. The pipeline issues one query
/// per run, so there is nothing to gain from more connections.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, PipelineError> {
    info!(
        host = %config.host,
        port = config.port,
        dbname = %config.dbname,
        "Connecting to PostgreSQL..."
    );

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(config))
        .await?;

    info!("PostgreSQL connection established");
    Ok(pool)
}

fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.dbname)
        .ssl_mode(config.ssl_mode)
}

