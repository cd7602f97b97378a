//! The idea collection as a single JSON document.
//!
//! Every write replaces the whole file. Writes go to a temporary file in the
//! same directory which is then renamed over the target, so readers always see
//! either the old or the new document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::models::Idea;

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open the store backed by `path`, creating its parent directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every idea, most voted first.
    ///
    /// A missing, unreadable or malformed document yields an empty collection;
    /// individual malformed records are dropped. Ties keep their order in the
    /// file.
    pub fn load_all(&self) -> Vec<Idea> {
        let mut ideas = match self.read() {
            Ok(ideas) => ideas,
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No idea store at {}, starting empty", self.path.display());
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable idea store {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        };

        ideas.sort_by(|a, b| b.votes.cmp(&a.votes));
        ideas
    }

    /// Replace the stored collection with `ideas`, in the given order.
    pub fn save_all(&self, ideas: &[Idea]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, ideas)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} ideas to {}", ideas.len(), self.path.display());
        Ok(())
    }

    /// Add one idea to the stored collection.
    pub fn append(&self, idea: Idea) -> Result<()> {
        let mut ideas = self.load_all();
        if ideas.iter().any(|i| i.id == idea.id) {
            return Err(Error::DuplicateId(idea.id));
        }
        ideas.push(idea);
        self.save_all(&ideas)
    }

    /// Decode the document record by record; a malformed record is logged
    /// and skipped so it cannot take the rest of the collection with it.
    fn read(&self) -> Result<Vec<Idea>> {
        let data = fs::read_to_string(&self.path)?;
        let records: Vec<serde_json::Value> = serde_json::from_str(&data)?;

        let ideas: Vec<Idea> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Idea>(record) {
                Ok(idea) => Some(idea),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed idea #{} in {}: {}",
                        index,
                        self.path.display(),
                        e
                    );
                    None
                }
            })
            .collect();
        Ok(ideas)
    }
}
