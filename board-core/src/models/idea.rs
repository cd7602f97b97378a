use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attachment, Note};

/// A proposed item on the board.
///
/// `id`, `title` and `created_at` never change after creation. `votes` only
/// grows, `notes` is append-only, and `files` is fixed at creation.
///
/// Older documents may omit the counters and collections, so those fields
/// fall back to their empty values when read. `created_at` also accepts
/// bare dates and defaults to the Unix epoch when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub votes: u64,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub files: Vec<Attachment>,
    #[serde(default, deserialize_with = "super::timestamp::lenient")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating an idea.
///
/// `title` stays optional here so that a missing title is reported by the
/// service as a validation failure instead of being rejected during parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIdea {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Attachments whose bytes are already stored in the upload directory.
    #[serde(default)]
    pub files: Vec<Attachment>,
}

impl NewIdea {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
