use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::UserId;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    /// `None` and empty string are distinct; a note created without content
    /// stays `None`.
    pub content: Option<String>,
    pub is_pinned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateNote {
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateNote {
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TogglePin {
    pub is_pinned: bool,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindNotesResponse {
    pub results: Vec<Note>,
}
