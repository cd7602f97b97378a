use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        rejection::JsonRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use idea_board_core::models::*;
use idea_board_core::{Error, UploadDir};

use super::AppState;

// ============================================================
// Error Handling
// ============================================================

const CREATE_FAILED: &str = "Failed to create idea";
const VOTE_FAILED: &str = "Failed to vote on idea";
const NOTE_FAILED: &str = "Failed to add note";
const NOT_FOUND: &str = "Idea not found";

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// Map a service failure to a response.
///
/// Unknown ids become 404. Everything else, validation included, is reported
/// as a 500 carrying the operation's generic message; details stay in the log.
fn service_error(e: Error, message: &'static str) -> ApiError {
    match e {
        Error::NotFound(id) => {
            tracing::warn!("Idea not found: {}", id);
            error_response(StatusCode::NOT_FOUND, NOT_FOUND)
        }
        Error::Validation(msg) => {
            tracing::warn!("{}: {}", message, msg);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
        other => {
            tracing::error!("{}: {}", message, other);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Ideas
// ============================================================

pub async fn list_ideas(State(state): State<AppState>) -> Json<Vec<Idea>> {
    Json(state.ideas.list_ideas())
}

/// Accepts a multipart form with `title`, `description` and any number of
/// `files` parts. Uploaded blobs are removed again if the idea is rejected.
pub async fn create_idea(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Idea>), ApiError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::warn!("{}: {}", CREATE_FAILED, rejection.body_text());
        error_response(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED)
    })?;
    let mut input = NewIdea::default();

    if let Err(e) = read_idea_form(&state.uploads, multipart, &mut input).await {
        discard_uploads(&state.uploads, &input.files).await;
        tracing::warn!("{}: {}", CREATE_FAILED, e);
        return Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            CREATE_FAILED,
        ));
    }

    let files = input.files.clone();
    match state.ideas.create_idea(input) {
        Ok(idea) => Ok((StatusCode::CREATED, Json(idea))),
        Err(e) => {
            discard_uploads(&state.uploads, &files).await;
            Err(service_error(e, CREATE_FAILED))
        }
    }
}

pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Idea>, ApiError> {
    state
        .ideas
        .register_vote(&id)
        .map(Json)
        .map_err(|e| service_error(e, VOTE_FAILED))
}

/// An unreadable body counts as a missing note, so unknown ids still get 404.
pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    input: Result<Json<CreateNoteInput>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let input = match input {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::warn!("{}: {}", NOTE_FAILED, rejection.body_text());
            CreateNoteInput::default()
        }
    };

    state
        .ideas
        .add_note(&id, input.note)
        .map(Json)
        .map_err(|e| service_error(e, NOTE_FAILED))
}

// ============================================================
// Multipart
// ============================================================

/// Read the idea form into `input`, storing file parts as they arrive.
///
/// Files stored before a failure are already recorded in `input.files` so the
/// caller can clean them up.
async fn read_idea_form(
    uploads: &UploadDir,
    mut multipart: Multipart,
    input: &mut NewIdea,
) -> Result<(), String> {
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => input.title = Some(field_text(field).await?),
            Some("description") => input.description = Some(field_text(field).await?),
            Some("files") => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;

                // Browsers send an empty unnamed part when no file was picked.
                if original_name.is_empty() && bytes.is_empty() {
                    continue;
                }

                let attachment = uploads
                    .store(&original_name, &bytes)
                    .await
                    .map_err(|e| e.to_string())?;
                input.files.push(attachment);
            }
            _ => {}
        }
    }
    Ok(())
}

async fn field_text(field: Field<'_>) -> Result<String, String> {
    field.text().await.map_err(|e| e.to_string())
}

async fn discard_uploads(uploads: &UploadDir, files: &[Attachment]) {
    for file in files {
        uploads.remove(file).await;
    }
}
