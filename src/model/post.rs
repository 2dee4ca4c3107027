use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published blog post as shown in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Decode a stored record.
    ///
    /// A missing or undecodable timestamp becomes `now`, so the same record
    /// can show a different time on every read.
    pub fn from_raw(raw: RawPost, now: DateTime<Utc>) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            content: raw.content,
            created_at: raw.created_at.unwrap_or(now),
        }
    }
}

/// A record exactly as a store returned it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Post data written on publish, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// The unpublished title/content pair being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}
