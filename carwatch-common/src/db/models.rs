//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded sighting of a vehicle at a site (row in `car_details`)
///
/// Insert-once: detections are never updated or deleted. `site` stores
/// the site's name, a soft reference with no enforced integrity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub id: i64,
    pub license_plate_number: String,
    pub car_type: String,
    pub car_make: String,
    pub car_color: String,
    /// Caller-supplied detection time, not server time
    pub time_of_detection: DateTime<Utc>,
    /// Site name, not a foreign key
    pub site: String,
    /// URL path under /images/ where the stored image is served
    pub image_path: String,
    /// Upload filename, retained for display only
    pub original_filename: String,
}

/// A named physical location at which detections occur (row in `site_details`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
}
