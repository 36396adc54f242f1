//! Test Helper Utilities
//!
//! Shared utilities for testing carwatch-vd: temp-root application
//! setup, request builders, and multipart body construction.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use sqlx::SqlitePool;
use tempfile::TempDir;

use carwatch_common::config::RootFolder;
use carwatch_common::db::init_database;
use carwatch_vd::{build_router, AppState};

/// Multipart boundary used by the request builders below
pub const BOUNDARY: &str = "carwatch-test-boundary";

/// A router over a fresh database in a temp root folder
///
/// The TempDir must be kept alive for the duration of the test.
pub struct TestApp {
    pub temp: TempDir,
    pub root: RootFolder,
    pub pool: SqlitePool,
    pub app: Router,
}

/// Create an application instance rooted in a fresh temp folder
pub async fn setup_app() -> TestApp {
    let temp = tempfile::tempdir().expect("Should create temp dir");
    let root = RootFolder::new(temp.path().join("carwatch"));
    root.ensure_directories_exist().expect("Should create root folders");

    let pool = init_database(&root.database_path())
        .await
        .expect("Should initialize test database");

    let state = AppState::new(pool.clone(), root.images_dir(), root.assets_dir());
    let app = build_router(state);

    TestApp { temp, root, pool, app }
}

/// Build a bodyless request
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON request
pub fn json_request(method: &str, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

/// Assemble a multipart/form-data body from text fields plus an
/// optional file part named "file"
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: image/jpeg\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Build a multipart request against /save_car_details
pub fn multipart_request(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/save_car_details")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap()
}

/// A complete, valid detection submission
pub fn detection_request(plate: &str, site: &str, time: &str) -> Request<Body> {
    multipart_request(
        &[
            ("license_plate_number", plate),
            ("car_type", "Sedan"),
            ("car_make", "Toyota"),
            ("car_color", "Blue"),
            ("time_of_detection", time),
            ("site", site),
        ],
        Some(("car.jpg", b"jpeg-bytes")),
    )
}

/// Read a response body to completion as a String
pub async fn body_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

/// Read a response body to completion as JSON
pub async fn body_json(body: Body) -> serde_json::Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}
