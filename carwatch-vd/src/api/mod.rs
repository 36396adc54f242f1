//! HTTP API handlers for carwatch-vd

pub mod detections;
pub mod export;
pub mod health;
pub mod sites;
pub mod ui;

pub use detections::detection_routes;
pub use export::export_routes;
pub use health::health_routes;
pub use sites::site_routes;
pub use ui::ui_routes;
