use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Characters of a post title shown on a list card.
pub const TITLE_PREVIEW_CHARS: usize = 50;
/// Characters of a post body shown on a list card.
pub const CONTENT_PREVIEW_CHARS: usize = 100;

// --- External API Schemas ---

/// Post
///
/// A blog post as served by the external posts API. The id is assigned by the
/// API; this service never interprets the record beyond rendering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn title_preview(&self) -> String {
        preview(&self.title, TITLE_PREVIEW_CHARS)
    }

    pub fn content_preview(&self) -> String {
        preview(&self.content, CONTENT_PREVIEW_CHARS)
    }
}

/// CreatePostRequest
///
/// JSON payload sent to the posts API (POST /posts), and the form body accepted
/// by `POST /blog/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    /// Returns the inline message to show when a field is blank.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required.");
        }
        if self.content.trim().is_empty() {
            return Err("Content is required.");
        }
        Ok(())
    }
}

// --- Form Payloads ---

/// PasswordForm
///
/// Body of a gate submission (POST /blog/access).
#[derive(Debug, Clone, Deserialize, ToSchema, Default)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
    /// Blog path to return to once access is granted.
    #[serde(default)]
    pub next: Option<String>,
}

/// Truncates to `limit` characters, appending `...` only when something was cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
