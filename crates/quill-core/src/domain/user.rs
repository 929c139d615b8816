use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an author account.
///
/// The blog reads users for authorship; account management happens outside
/// this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create an unsaved user with the current timestamp.
    pub fn new(username: String) -> Self {
        Self {
            id: 0,
            username,
            created_at: Utc::now(),
        }
    }
}
