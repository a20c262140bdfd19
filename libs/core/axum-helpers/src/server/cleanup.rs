//! Connection cleanup run during graceful shutdown.

use tracing::{error, info};

/// Closes a sea-orm connection pool, logging the outcome.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(pool = name, "PostgreSQL connection pool closed"),
        Err(e) => error!(pool = name, "Error closing PostgreSQL connection pool: {}", e),
    }
}
