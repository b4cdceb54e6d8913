use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

/// Creates a PostgreSQL connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Connects when a database URL is configured. Any failure disables the
/// document store instead of aborting startup.
pub async fn connect_optional(database_url: Option<&str>) -> Option<PgPool> {
    let Some(url) = database_url else {
        warn!("DATABASE_URL not set; application submissions are disabled");
        return None;
    };

    match create_pool(url).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!("PostgreSQL unavailable, application submissions are disabled: {e:#}");
            None
        }
    }
}
