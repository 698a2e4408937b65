use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    /// Process-wide connection pool. Handlers never query it directly; they
    /// take a `DbSession` instead.
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
