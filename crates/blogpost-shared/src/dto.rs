//! Data Transfer Objects - request/response types for the posts API.
//!
//! Request fields are optional so the server can name the first missing
//! field instead of failing with a generic deserialization error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author as submitted by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request to create a new post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorRequest>,
    pub content: Option<String>,
    pub title: Option<String>,
}

/// A create request with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostFields {
    pub first_name: String,
    pub last_name: String,
    pub content: String,
    pub title: String,
}

impl CreatePostRequest {
    /// Take the required fields, or name the first one that is absent.
    pub fn into_fields(self) -> Result<CreatePostFields, &'static str> {
        let author = self.author.ok_or("author")?;
        Ok(CreatePostFields {
            first_name: author.first_name.ok_or("author.firstName")?,
            last_name: author.last_name.ok_or("author.lastName")?,
            content: self.content.ok_or("content")?,
            title: self.title.ok_or("title")?,
        })
    }
}

/// Request to update an existing post. `id` must repeat the path id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub content: Option<String>,
    pub title: Option<String>,
}

/// Public projection of a post. `author` is the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub title: String,
    pub created: DateTime<Utc>,
}
