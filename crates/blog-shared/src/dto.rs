//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured author as clients send it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: String,
    pub last_name: String,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
///
/// Unknown keys are ignored, so clients may echo the `id` back on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub author: AuthorPayload,
}

/// A post as returned to clients, with the author flattened to one string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
}
