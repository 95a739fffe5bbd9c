use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::Note;

/// Body for note create and update. Both operations replace title and
/// content wholesale.
#[derive(Debug, Deserialize)]
pub struct NotePayload {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedNoteResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_response_wire_shape() {
        let note = Note {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "T".into(),
            content: "C".into(),
            created_at: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        };
        let json = serde_json::to_value(NoteResponse::from(note)).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("createdAt").is_some());
        // The owner is never echoed back.
        assert!(json.get("user_id").is_none());
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
    }
}
