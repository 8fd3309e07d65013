//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::PostgresPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Wrap an already constructed store.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Build the application state with the appropriate store.
    ///
    /// Falls back to the in-memory store when no database is configured
    /// or the connection cannot be established.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let posts: Arc<dyn PostRepository> = match db_config {
            Some(config) => match blog_infra::database::connect(config).await {
                Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostRepository> = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self { posts }
    }
}
