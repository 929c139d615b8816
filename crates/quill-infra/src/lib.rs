//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the SeaORM-backed repositories and the session token service.

pub mod database;
pub mod session;

pub use database::Database;
pub use session::JwtSessionService;
