//! Site persistence and queries
//!
//! Sites are insert-once rows read by id or as a full listing. Site
//! names are not unique; a duplicate name makes the name-based join
//! from car_details ambiguous, which is documented rather than
//! prevented.

use carwatch_common::db::models::Site;
use carwatch_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// A site ready to be inserted (id is database-assigned)
#[derive(Debug, Clone)]
pub struct NewSite {
    pub name: String,
    pub city: String,
    pub state: String,
}

/// Insert one site row, returning the assigned id
pub async fn save_site(pool: &SqlitePool, site: &NewSite) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO site_details (name, city, state) VALUES (?, ?, ?)",
    )
    .bind(&site.name)
    .bind(&site.city)
    .bind(&site.state)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All sites in storage order
pub async fn list_sites(pool: &SqlitePool) -> Result<Vec<Site>> {
    let rows = sqlx::query("SELECT id, name, city, state FROM site_details ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(row_to_site).collect())
}

/// Look up one site by id
pub async fn get_site(pool: &SqlitePool, id: i64) -> Result<Option<Site>> {
    let row = sqlx::query("SELECT id, name, city, state FROM site_details WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(row_to_site))
}

fn row_to_site(row: &SqliteRow) -> Site {
    Site {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
    }
}
