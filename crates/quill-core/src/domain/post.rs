use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a single blog entry.
///
/// The store assigns `id` on first save; a fresh post carries 0 until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create an unsaved post owned by `author_id`, stamped with the current time.
    pub fn new(author_id: i32, title: String, content: String) -> Self {
        Self {
            id: 0,
            author_id,
            title,
            content,
            created_at: Utc::now(),
        }
    }
}
