use std::path::PathBuf;

use sea_orm::DatabaseConnection;

/// State shared with every axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Root of the per-work output folders
    pub output_dir: PathBuf,
}

impl From<(DatabaseConnection, PathBuf)> for AppState {
    fn from((db, output_dir): (DatabaseConnection, PathBuf)) -> Self {
        Self { db, output_dir }
    }
}
