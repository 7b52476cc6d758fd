use crate::config::AppConfig;
use crate::todos::{MemoryTodoStore, PgTodoStore, TodoService, TodoStore};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match &config.database {
            Some(db_config) => {
                let db = PgPoolOptions::new()
                    .max_connections(db_config.max_connections)
                    .connect(&db_config.url)
                    .await
                    .context("connect to database")?;

                sqlx::migrate!("./migrations")
                    .run(&db)
                    .await
                    .context("run migrations")?;

                tracing::info!("using postgres todo store");
                Arc::new(PgTodoStore::new(db)) as Arc<dyn TodoStore>
            }
            None => {
                tracing::warn!("DATABASE_URL not set; todos are kept in memory and lost on exit");
                Arc::new(MemoryTodoStore::new()) as Arc<dyn TodoStore>
            }
        };

        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn TodoStore>, config: Arc<AppConfig>) -> Self {
        Self {
            todos: TodoService::new(store),
            config,
        }
    }

    /// In-memory state for tests.
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(MemoryTodoStore::new()),
            Arc::new(AppConfig::in_memory()),
        )
    }
}
