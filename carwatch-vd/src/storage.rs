//! Image file store for uploaded detection photos
//!
//! Files are keyed by the SHA-256 hash of their contents plus the
//! original upload's extension. The upload filename itself never touches
//! the filesystem (it is kept only as display metadata in the database),
//! so attacker-controlled names cannot traverse paths and identical
//! uploads dedupe to a single file. Concurrent writers racing on the
//! same key hold identical bytes, so last-write-wins is benign.

use crate::error::ApiResult;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

/// URL prefix at which stored images are served
pub const IMAGES_URL_PREFIX: &str = "/images";

/// A stored image: filesystem key plus the URL path it is served from
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// File name inside the image directory (content hash + extension)
    pub key: String,
    /// URL path recorded in car_details.image_path
    pub url_path: String,
}

/// Content-addressed image store rooted at the images directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write uploaded bytes under a content-hash key
    ///
    /// An orphaned file can remain if the caller's subsequent database
    /// insert fails; there is no compensating deletion.
    pub async fn store(&self, original_filename: &str, bytes: &[u8]) -> ApiResult<StoredImage> {
        let key = storage_key(original_filename, bytes);
        let path = self.dir.join(&key);

        tokio::fs::write(&path, bytes).await?;
        debug!(key = %key, size = bytes.len(), "Stored uploaded image");

        Ok(StoredImage {
            url_path: format!("{}/{}", IMAGES_URL_PREFIX, key),
            key,
        })
    }
}

/// Derive the storage key: SHA-256 of the contents plus the sanitized
/// extension of the original filename
fn storage_key(original_filename: &str, bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    match sanitized_extension(original_filename) {
        Some(ext) => format!("{:x}.{}", hash, ext),
        None => format!("{:x}", hash),
    }
}

/// Extract a safe lowercase extension from the upload filename
///
/// Only ASCII alphanumeric extensions up to 10 characters survive;
/// anything else is dropped rather than sanitized in place.
fn sanitized_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
