//! Session token validation.

mod jwt;

pub use jwt::{JwtSessionService, SessionConfig};
