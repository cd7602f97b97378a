pub mod api;
pub mod config;

pub use idea_board_core::{error, models, service, store, uploads};
pub use idea_board_core::{Error, IdeaService, StorageConfig, Store, UploadDir};
