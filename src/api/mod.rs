mod handlers;

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use idea_board_core::{IdeaService, StorageConfig, Store, UploadDir};

use crate::config::ServerConfig;

/// Largest accepted idea submission, attachments included.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared handler state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub ideas: IdeaService,
    pub uploads: UploadDir,
}

impl AppState {
    /// Open the store and upload directory described by `storage`.
    pub fn open(storage: &StorageConfig) -> idea_board_core::Result<Self> {
        storage.ensure_directories()?;
        Ok(Self {
            ideas: IdeaService::new(Store::open(storage.ideas_file())?),
            uploads: UploadDir::open(storage.uploads_dir())?,
        })
    }
}

pub fn create_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route("/ideas", get(handlers::list_ideas))
        .route(
            "/ideas",
            post(handlers::create_idea).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/ideas/{id}/vote", post(handlers::vote))
        .route("/ideas/{id}/notes", post(handlers::add_note))
        .route("/health", get(handlers::health));

    let uploads = ServeDir::new(state.uploads.dir());

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", uploads)
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the application for `config`.
pub fn app(config: &ServerConfig) -> idea_board_core::Result<Router> {
    let state = AppState::open(&config.storage())?;
    Ok(create_router(state, &config.public_dir))
}
