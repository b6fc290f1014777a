//! Application state - shared across all handlers.

use std::sync::Arc;

use blogpost_core::ports::PostRepository;
use blogpost_infra::InMemoryPostRepository;
use blogpost_infra::database::DatabaseConfig;

#[cfg(feature = "postgres")]
use blogpost_infra::database::{self, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Wrap an existing post store.
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPostRepository::new()))
    }

    /// Build the application state from configuration.
    ///
    /// Falls back to the in-memory store when no database is configured
    /// or the connection fails.
    pub async fn from_config(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match database::connect(config).await {
                Ok(conn) => {
                    let repo = PostgresPostRepository::new(conn);
                    match repo.ensure_schema().await {
                        Ok(()) => Self::new(Arc::new(repo)),
                        Err(e) => {
                            tracing::error!(
                                "Failed to prepare posts table: {}. Using in-memory fallback.",
                                e
                            );
                            Self::in_memory()
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Database configured but postgres feature is disabled");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::in_memory()
        };

        tracing::info!("Application state initialized");
        state
    }
}
