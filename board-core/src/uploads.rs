use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;
use crate::models::Attachment;

/// Fallback used when a client sends a file name with no usable component.
const DEFAULT_UPLOAD_NAME: &str = "upload";

/// Directory of uploaded attachment blobs, one file per upload.
#[derive(Debug, Clone)]
pub struct UploadDir {
    dir: PathBuf,
}

impl UploadDir {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, stored_name: &str) -> PathBuf {
        self.dir.join(stored_name)
    }

    /// Write an uploaded file under a fresh unique name.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<Attachment> {
        let original_name = sanitize_file_name(original_name);
        let stored_name = format!("{}-{}", Uuid::new_v4(), original_name);

        tokio::fs::write(self.path_of(&stored_name), bytes).await?;
        tracing::debug!("Stored upload {} ({} bytes)", stored_name, bytes.len());

        Ok(Attachment {
            stored_name,
            original_name,
            size: bytes.len() as u64,
        })
    }

    /// Delete a stored blob. Failures are logged, not returned.
    pub async fn remove(&self, attachment: &Attachment) {
        let path = self.path_of(&attachment.stored_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
        }
    }
}

/// Keep only the final path component of a client-supplied file name.
fn sanitize_file_name(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .unwrap_or(DEFAULT_UPLOAD_NAME)
        .to_string()
}
