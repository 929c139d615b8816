use std::time::Duration;

use sea_orm::{ConnectOptions, DbConn, DbErr};

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Handle to the relational store.
///
/// Opened once at process start and closed at shutdown. Handlers never touch
/// the pool directly; they go through repositories built from [`handle`].
///
/// [`handle`]: Database::handle
pub struct Database {
    conn: DbConn,
}

impl Database {
    /// Open the connection pool described by `config`.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = sea_orm::Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "database connected");

        Ok(Self { conn })
    }

    /// The underlying pooled connection.
    pub fn handle(&self) -> &DbConn {
        &self.conn
    }

    /// Close the pool. Call once, after the server has stopped.
    pub async fn close(self) -> Result<(), DbErr> {
        tracing::info!("closing database connection");
        self.conn.close().await
    }
}
