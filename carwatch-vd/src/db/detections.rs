//! Detection persistence and queries
//!
//! Detections are insert-once rows: never updated, never deleted.
//! Listing order is storage order (primary key); per-plate history is
//! ordered by detection time.

use carwatch_common::db::models::Detection;
use carwatch_common::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// A detection ready to be inserted (id is database-assigned)
#[derive(Debug, Clone)]
pub struct NewDetection {
    pub license_plate_number: String,
    pub car_type: String,
    pub car_make: String,
    pub car_color: String,
    pub time_of_detection: DateTime<Utc>,
    pub site: String,
    pub image_path: String,
    pub original_filename: String,
}

/// Insert one detection row, returning the assigned id
pub async fn save_detection(pool: &SqlitePool, detection: &NewDetection) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO car_details
            (license_plate_number, car_type, car_make, car_color,
             time_of_detection, site, image_path, original_filename)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&detection.license_plate_number)
    .bind(&detection.car_type)
    .bind(&detection.car_make)
    .bind(&detection.car_color)
    .bind(detection.time_of_detection.to_rfc3339())
    .bind(&detection.site)
    .bind(&detection.image_path)
    .bind(&detection.original_filename)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

const DETECTION_COLUMNS: &str = "id, license_plate_number, car_type, car_make, car_color, \
                                 time_of_detection, site, image_path, original_filename";

/// All detections in storage order
pub async fn list_detections(pool: &SqlitePool) -> Result<Vec<Detection>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM car_details ORDER BY id ASC",
        DETECTION_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_detection).collect()
}

/// Detection history for one plate, exact match, ascending by time
pub async fn detections_for_plate(pool: &SqlitePool, plate: &str) -> Result<Vec<Detection>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM car_details WHERE license_plate_number = ? \
         ORDER BY time_of_detection ASC, id ASC",
        DETECTION_COLUMNS
    ))
    .bind(plate)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_detection).collect()
}

/// All detections whose soft site reference equals the given site name
///
/// The name join happens here at query time; nothing enforces that the
/// name exists in site_details.
pub async fn detections_for_site(pool: &SqlitePool, site_name: &str) -> Result<Vec<Detection>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM car_details WHERE site = ? ORDER BY id ASC",
        DETECTION_COLUMNS
    ))
    .bind(site_name)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_detection).collect()
}

fn row_to_detection(row: &SqliteRow) -> Result<Detection> {
    let time_str: String = row.get("time_of_detection");
    let time_of_detection = DateTime::parse_from_rfc3339(&time_str)
        .map_err(|e| Error::Internal(format!("Invalid stored timestamp {:?}: {}", time_str, e)))?
        .with_timezone(&Utc);

    Ok(Detection {
        id: row.get("id"),
        license_plate_number: row.get("license_plate_number"),
        car_type: row.get("car_type"),
        car_make: row.get("car_make"),
        car_color: row.get("car_color"),
        time_of_detection,
        site: row.get("site"),
        image_path: row.get("image_path"),
        original_filename: row.get("original_filename"),
    })
}

/// Optional equality filters for the CSV export
///
/// Absent or empty fields impose no constraint; present fields combine
/// into a conjunctive equality predicate. The column set is enumerated
/// here; there is no dynamic field lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionFilter {
    #[serde(default)]
    pub license_plate_number: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub car_make: Option<String>,
    #[serde(default)]
    pub car_type: Option<String>,
}

impl DetectionFilter {
    /// Equality terms for the fields that are present and non-empty
    pub fn terms(&self) -> Vec<(&'static str, &str)> {
        [
            ("license_plate_number", &self.license_plate_number),
            ("site", &self.site),
            ("car_make", &self.car_make),
            ("car_type", &self.car_type),
        ]
        .into_iter()
        .filter_map(|(column, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((column, v)),
            _ => None,
        })
        .collect()
    }

    /// SELECT statement for the export columns with this filter's
    /// predicate, in storage order; one `?` placeholder per term
    pub fn to_select_sql(&self) -> String {
        let mut sql = String::from(
            "SELECT license_plate_number, car_type, car_make, car_color, \
             time_of_detection, site FROM car_details",
        );

        let terms = self.terms();
        if !terms.is_empty() {
            let predicate = terms
                .iter()
                .map(|(column, _)| format!("{} = ?", column))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&predicate);
        }

        sql.push_str(" ORDER BY id ASC");
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn detection(plate: &str, time: DateTime<Utc>) -> NewDetection {
        NewDetection {
            license_plate_number: plate.to_string(),
            car_type: "Sedan".to_string(),
            car_make: "Toyota".to_string(),
            car_color: "Blue".to_string(),
            time_of_detection: time,
            site: "Lot A".to_string(),
            image_path: "/images/abc.jpg".to_string(),
            original_filename: "car.jpg".to_string(),
        }
    }

    async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
        let temp = tempfile::tempdir().unwrap();
        let pool = carwatch_common::db::init_database(&temp.path().join("test.db"))
            .await
            .unwrap();
        (temp, pool)
    }

    #[tokio::test]
    async fn test_save_and_list_roundtrip() {
        let (_temp, pool) = test_pool().await;
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

        let id = save_detection(&pool, &detection("ABC123", time)).await.unwrap();
        assert_eq!(id, 1);

        let all = list_detections(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].license_plate_number, "ABC123");
        assert_eq!(all[0].time_of_detection, time);
        assert_eq!(all[0].site, "Lot A");
    }

    #[tokio::test]
    async fn test_history_ordered_by_time_not_insertion() {
        let (_temp, pool) = test_pool().await;
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        // Inserted newest-first; history must come back oldest-first
        save_detection(&pool, &detection("XYZ789", later)).await.unwrap();
        save_detection(&pool, &detection("XYZ789", earlier)).await.unwrap();
        save_detection(&pool, &detection("OTHER1", earlier)).await.unwrap();

        let history = detections_for_plate(&pool, "XYZ789").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].time_of_detection, earlier);
        assert_eq!(history[1].time_of_detection, later);
    }

    #[tokio::test]
    async fn test_plate_match_is_case_sensitive() {
        let (_temp, pool) = test_pool().await;
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        save_detection(&pool, &detection("abc123", time)).await.unwrap();

        let history = detections_for_plate(&pool, "ABC123").await.unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_empty_filter_has_no_predicate() {
        let filter = DetectionFilter::default();
        assert!(filter.terms().is_empty());
        assert_eq!(
            filter.to_select_sql(),
            "SELECT license_plate_number, car_type, car_make, car_color, \
             time_of_detection, site FROM car_details ORDER BY id ASC"
        );
    }

    #[test]
    fn test_empty_string_fields_impose_no_constraint() {
        let filter = DetectionFilter {
            license_plate_number: Some(String::new()),
            site: Some("Lot A".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.terms(), vec![("site", "Lot A")]);
        assert!(filter.to_select_sql().contains("WHERE site = ?"));
    }

    #[test]
    fn test_multiple_terms_are_conjunctive() {
        let filter = DetectionFilter {
            car_make: Some("Toyota".to_string()),
            car_type: Some("Sedan".to_string()),
            ..Default::default()
        };
        let sql = filter.to_select_sql();
        assert!(sql.contains("WHERE car_make = ? AND car_type = ?"));
    }
}
