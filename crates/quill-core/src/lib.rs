//! # Quill Core
//!
//! The domain layer of the blog.
//! This crate contains the entity types, the ports infrastructure must
//! implement, and the error types, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
