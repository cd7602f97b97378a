use serde::{Deserialize, Serialize};

/// A file uploaded together with an idea.
///
/// The bytes live in the upload directory under `stored_name`; the record
/// only keeps what is needed to link to and describe them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Unique file name on disk, `<uuid>-<original name>`.
    #[serde(alias = "filename")]
    pub stored_name: String,
    /// Name the client sent, shown to users.
    #[serde(alias = "originalname")]
    pub original_name: String,
    /// Size in bytes.
    pub size: u64,
}
