//! # Bookit DB
//!
//! PostgreSQL connection pool setup using SQLx.
//!
//! # Example
//!
//! ```ignore
//! use bookit_config::DatabaseConfig;
//! use bookit_db::init_db_pool;
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! ```

use bookit_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

/// Opens a connection pool sized from [`DatabaseConfig`].
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
