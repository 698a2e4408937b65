use std::ops::Deref;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, SqlErr,
    TransactionTrait,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::schema;

/// Build the connection pool described by `config`.
///
/// The pool is owned by the caller (normally `AppState`) and must be closed
/// with [`DatabaseConnection::close`] on shutdown.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    Database::connect(opt).await
}

/// Connect, then make sure every table and index exists.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    if config.is_default_url() {
        warn!("DATABASE_URL is not set, falling back to the local development database");
    }
    info!(database = %redact_url(&config.url), "Connecting to database");

    let db = connect(config).await?;
    schema::create_tables(&db).await?;
    schema::ensure_indexes(&db).await?;

    info!(
        max_connections = config.max_connections,
        "Database connection pool established"
    );
    Ok(db)
}

/// Strip the password from a connection string so it can be logged.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}

/// A unit of work bound to a single pooled connection.
///
/// Queries run through `Deref` to the underlying transaction. Call
/// [`DbSession::close`] once the work succeeded; dropping the session
/// without closing it rolls back and hands the connection back to the pool,
/// which is what happens on every error path and when a request is
/// cancelled.
pub struct DbSession {
    txn: DatabaseTransaction,
}

impl DbSession {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }
}

impl Deref for DbSession {
    type Target = DatabaseTransaction;

    fn deref(&self) -> &Self::Target {
        &self.txn
    }
}

/// Storage failures, grouped by how a caller should react to them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The pool could not hand out a working connection.
    #[error("database unavailable: {0}")]
    Unavailable(DbErr),
    /// A unique or foreign-key constraint rejected a write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("database error: {0}")]
    Query(DbErr),
}

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        if matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
            return StorageError::Unavailable(err);
        }
        match err.sql_err() {
            Some(
                SqlErr::UniqueConstraintViolation(detail)
                | SqlErr::ForeignKeyConstraintViolation(detail),
            ) => StorageError::ConstraintViolation(detail),
            _ => StorageError::Query(err),
        }
    }
}
