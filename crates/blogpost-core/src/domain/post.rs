use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author of a post, kept as a first/last name pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display name, `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// BlogPost entity - the single resource exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Materialize a new post, assigning its id and creation timestamp.
    ///
    /// `created` is truncated to microseconds, the resolution of `timestamptz`,
    /// so every store hands back the value it keeps.
    pub fn new(post: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: post.author,
            title: post.title,
            content: post.content,
            created: Utc::now().trunc_subsecs(6),
        }
    }

    /// Apply a partial update. Identity and `created` are never touched.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

/// Fields supplied by a caller when creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// Reject blank required fields.
    pub fn validate(&self) -> Result<(), DomainError> {
        require("author.firstName", &self.author.first_name)?;
        require("author.lastName", &self.author.last_name)?;
        require("title", &self.title)?;
        require("content", &self.content)
    }
}

/// Partial update of a post. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Present fields must not be blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(content) = &self.content {
            require("content", content)?;
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("`{field}` must not be blank")));
    }
    Ok(())
}
