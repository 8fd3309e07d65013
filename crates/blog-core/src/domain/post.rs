use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured author of a post.
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

    /// Flattened "first last" form used on the wire.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A post that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Author,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Author) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author,
        }
    }

    /// Assign an id and timestamps, producing the record a store persists.
    pub fn into_post(self) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: self.title,
            content: self.content,
            author: self.author,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Post entity - a persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Replace the editable fields wholesale, keeping id and creation time.
    pub fn replace_with(&mut self, changes: NewPost) {
        self.title = changes.title;
        self.content = changes.content;
        self.author = changes.author;
        self.updated_at = Utc::now();
    }
}
