//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, UserRepository};
use quill_infra::database::{Database, SeaOrmPostRepository, SeaOrmUserRepository};
use tera::Tera;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub templates: Tera,
}

impl AppState {
    /// Build the application state on top of an open database handle.
    pub fn new(db: &Database, templates: Tera) -> Self {
        Self {
            posts: Arc::new(SeaOrmPostRepository::new(db.handle().clone())),
            users: Arc::new(SeaOrmUserRepository::new(db.handle().clone())),
            templates,
        }
    }
}

/// Load the Tera templates matched by `glob`.
pub fn load_templates(glob: &str) -> Result<Tera, tera::Error> {
    let mut templates = Tera::new(glob)?;
    templates.autoescape_on(vec![".html.tera", ".html"]);
    Ok(templates)
}
