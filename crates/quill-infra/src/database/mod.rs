//! Database connection management and SeaORM repositories.

mod connections;
mod sea_base;

pub mod entity;
pub mod repo;

pub use connections::{Database, DatabaseConfig};
pub use repo::{SeaOrmPostRepository, SeaOrmUserRepository};
pub use sea_base::SeaOrmBaseRepository;
