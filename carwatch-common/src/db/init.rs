//! Database initialization
//!
//! Opens (or creates) the single-file SQLite database and creates the
//! two CARWATCH tables if absent. There is no migration mechanism;
//! schema changes require manual intervention.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: create the database file on first run
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Wait on the database lock instead of failing fast
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Idempotent - safe to call on every startup
    create_car_details_table(&pool).await?;
    create_site_details_table(&pool).await?;

    Ok(pool)
}

async fn create_car_details_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS car_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            license_plate_number TEXT NOT NULL,
            car_type TEXT NOT NULL,
            car_make TEXT NOT NULL,
            car_color TEXT NOT NULL,
            time_of_detection TIMESTAMP NOT NULL,
            site TEXT NOT NULL,
            image_path TEXT NOT NULL,
            original_filename TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_car_details_plate ON car_details (license_plate_number)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_car_details_site ON car_details (site)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_site_details_table(pool: &SqlitePool) -> Result<()> {
    // Site name is NOT unique: duplicate names are allowed and the
    // name-based join to car_details.site is ambiguous for duplicates.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS site_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_database_and_tables() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("carwatch.db");

        let pool = init_database(&db_path).await.expect("Should initialize database");
        assert!(db_path.exists());

        // Both tables exist and are empty
        let cars: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM car_details")
            .fetch_one(&pool)
            .await
            .unwrap();
        let sites: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site_details")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(cars, 0);
        assert_eq!(sites, 0);
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("carwatch.db");

        let pool = init_database(&db_path).await.unwrap();
        sqlx::query("INSERT INTO site_details (name, city, state) VALUES ('Lot A', 'Austin', 'TX')")
            .execute(&pool)
            .await
            .unwrap();
        drop(pool);

        // Re-opening must not clobber existing rows
        let pool = init_database(&db_path).await.unwrap();
        let sites: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site_details")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sites, 1);
    }
}
