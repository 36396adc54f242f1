//! Database operations for carwatch-vd

pub mod detections;
pub mod sites;
