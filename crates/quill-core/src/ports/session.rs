//! Session token port.
//!
//! The blog consumes an authenticated requester identity; it never issues
//! credentials itself. This port turns the opaque session token carried by
//! the browser into the identity the handlers act on.

use thiserror::Error;

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: i32,
    pub username: String,
    pub exp: i64,
}

/// Session token operations.
pub trait SessionTokenService: Send + Sync {
    /// Sign a session token for a user.
    fn issue_token(&self, user_id: i32, username: &str) -> Result<String, SessionError>;

    /// Validate and decode a session token.
    fn validate_token(&self, token: &str) -> Result<SessionClaims, SessionError>;
}

/// Session validation errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("No session cookie")]
    MissingCookie,
}
