//! Seeds demo products into an empty catalog: `cargo run -p migration --bin seed`.
//! Reads `DATABASE_URL` like the API does.

use migration::seed::seed_demo_products;
use sea_orm::{Database, DbErr};

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    tracing_subscriber::fmt().with_target(false).init();

    let url = std::env::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL is not set".to_string()))?;
    let db = Database::connect(url).await?;

    match seed_demo_products(&db).await? {
        0 => tracing::info!("Products table already populated, nothing seeded"),
        n => tracing::info!(inserted = n, "Database seeded"),
    }

    db.close().await
}
