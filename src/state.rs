use sqlx::sqlite::SqlitePool;

use crate::error::ApiError;

/// Shared application state. The pool is absent when no database was
/// configured or it could not be reached at startup.
#[derive(Clone)]
pub struct AppState {
    pool: Option<SqlitePool>,
    database_url_set: bool,
}

impl AppState {
    pub fn new(pool: Option<SqlitePool>, database_url_set: bool) -> Self {
        Self { pool, database_url_set }
    }

    pub fn pool(&self) -> Result<&SqlitePool, ApiError> {
        self.pool.as_ref().ok_or(ApiError::DatabaseUnavailable)
    }

    pub fn database_url_set(&self) -> bool {
        self.database_url_set
    }
}
