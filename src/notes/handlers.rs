use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::dto::{CreatedNoteResponse, MessageResponse, NotePayload, NoteResponse};
use super::repo::Note;

pub fn notes_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", post(create_note).get(list_notes))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
}

/// Title and content must both be present and non-empty; this runs before
/// any store access.
fn validated(payload: &NotePayload) -> Result<(&str, &str), ApiError> {
    let title = payload.title.as_deref().filter(|t| !t.is_empty());
    let content = payload.content.as_deref().filter(|c| !c.is_empty());
    match (title, content) {
        (Some(title), Some(content)) => Ok((title, content)),
        _ => Err(ApiError::Validation(
            "Missing required fields (title, content)".into(),
        )),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<NotePayload>,
) -> ApiResult<Json<CreatedNoteResponse>> {
    let (title, content) = validated(&payload)?;
    let note = Note::create(&state.db, user_id, title, content).await?;
    info!(user_id = %user_id, note_id = %note.id, "note created");
    Ok(Json(CreatedNoteResponse {
        id: note.id,
        message: "Note created successfully",
    }))
}

#[instrument(skip(state))]
pub async fn list_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = Note::list_by_owner(&state.db, user_id).await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    let note = Note::get_owned(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".into()))?;
    Ok(Json(note.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<NotePayload>,
) -> ApiResult<Json<MessageResponse>> {
    let (title, content) = validated(&payload)?;
    if !Note::update_owned(&state.db, user_id, id, title, content).await? {
        return Err(ApiError::NotFound("Note not found".into()));
    }
    info!(user_id = %user_id, note_id = %id, "note updated");
    Ok(Json(MessageResponse {
        message: "Note updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    if !Note::delete_owned(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Note not found".into()));
    }
    info!(user_id = %user_id, note_id = %id, "note deleted");
    Ok(Json(MessageResponse {
        message: "Note deleted successfully",
    }))
}
