//! Local-disk store for uploaded ambassador photos.
//!
//! Files land under a configured directory and are served back by the
//! static `/uploads` route, so the returned URL is always root-relative.

use std::path::PathBuf;

use chrono::Utc;

use crate::errors::AppError;

/// Hard cap on accepted upload size.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Public path prefix the stored files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Filesystem-backed upload store.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist an uploaded file and return its public URL path.
    ///
    /// The stored name is the sanitized original prefixed with a millisecond
    /// timestamp to avoid collisions. Size must be checked by the caller
    /// before this point; this method writes unconditionally.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }
}

/// Replace every character outside `[a-zA-Z0-9.]` with an underscore.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}
