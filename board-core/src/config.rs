use std::path::{Path, PathBuf};

/// File name of the idea collection inside the data directory.
pub const IDEAS_FILE: &str = "ideas.json";
/// Subdirectory holding uploaded attachment blobs.
pub const UPLOADS_DIR: &str = "uploads";

/// Where the board keeps its durable state.
///
/// Built once at startup and handed to the store and the upload directory;
/// nothing below this reads the environment.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn ideas_file(&self) -> PathBuf {
        self.data_dir.join(IDEAS_FILE)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join(UPLOADS_DIR)
    }

    /// Create the data and upload directories if they do not exist yet.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.uploads_dir())
    }
}
