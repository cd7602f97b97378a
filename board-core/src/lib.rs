//! Core of the idea board: models, the JSON-file store, attachment storage
//! and the idea service. Has no knowledge of HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod uploads;

pub use config::StorageConfig;
pub use error::{Error, Result};
pub use service::IdeaService;
pub use store::Store;
pub use uploads::UploadDir;
