use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment appended to an idea. Never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub text: String,
    #[serde(default, deserialize_with = "super::timestamp::lenient")]
    pub created_at: DateTime<Utc>,
}

/// Request body for adding a note: `{ "note": "..." }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteInput {
    #[serde(default)]
    pub note: Option<String>,
}
