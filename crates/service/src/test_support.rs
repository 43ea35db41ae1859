#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig { url: models::db::DATABASE_URL.clone(), ..DatabaseConfig::default() };
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.connect_timeout_secs = 5;
    cfg.acquire_timeout_secs = 10;
    cfg
}

/// Connection to the test database with the schema migrated.
/// Callers should skip when `SKIP_DB_TESTS` is set or this returns an error.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&test_config()).await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    connect_with_config(&test_config()).await
}
