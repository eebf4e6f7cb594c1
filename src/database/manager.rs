use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DatabaseConfig};
use crate::database::cursor::ScopedCursor;

/// Errors from the connection manager and the repositories built on it.
///
/// "Not found" is deliberately absent: repositories report it as `Ok(None)`
/// or `Ok(false)`.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store unreachable: {0}")]
    Connectivity(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),

    #[error(transparent)]
    Mongo(mongodb::error::Error),

    #[error(transparent)]
    BsonSer(#[from] mongodb::bson::ser::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind as Kind;

        let classified = match &err {
            sqlx::Error::Database(db) => match db.kind() {
                Kind::UniqueViolation
                | Kind::ForeignKeyViolation
                | Kind::NotNullViolation
                | Kind::CheckViolation => Some(DatabaseError::Validation(db.message().to_string())),
                _ => None,
            },
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Some(DatabaseError::Connectivity(err.to_string())),
            _ => None,
        };
        classified.unwrap_or(DatabaseError::Sqlx(err))
    }
}

impl From<mongodb::error::Error> for DatabaseError {
    fn from(err: mongodb::error::Error) -> Self {
        // 11000 = duplicate key, 121 = document failed validation
        let classified = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write)) if matches!(write.code, 11000 | 121) => {
                Some(DatabaseError::Validation(write.message.clone()))
            }
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => {
                Some(DatabaseError::Connectivity(err.to_string()))
            }
            _ => None,
        };
        classified.unwrap_or(DatabaseError::Mongo(err))
    }
}

/// Which backing store a write went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    Relational,
    Document,
}

/// Write counters, one per store. Reads never touch these.
#[derive(Debug, Default)]
struct WriteCounters {
    relational: AtomicU64,
    document: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStats {
    pub relational_writes: u64,
    pub document_writes: u64,
}

/// Owns the PostgreSQL pool and the MongoDB client for the process lifetime.
///
/// Built once with [`ConnectionManager::open`] (or [`ConnectionManager::connect_lazy`])
/// and shared behind an `Arc`; both handles are safe for concurrent use.
pub struct ConnectionManager {
    pg: PgPool,
    mongo: Client,
    database: Database,
    writes: WriteCounters,
}

impl ConnectionManager {
    /// Connect to both stores, failing fast if PostgreSQL is unreachable.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config.postgres_connection_string()?;
        let pg = Self::pool_options(config).connect(&url).await?;
        info!("Created PostgreSQL pool");

        let manager = Self::with_pool(pg, config).await?;
        info!("Created MongoDB client for database: {}", manager.database.name());
        Ok(manager)
    }

    /// Build the manager without touching the network; connections are made on first use.
    pub async fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config.postgres_connection_string()?;
        let pg = Self::pool_options(config).connect_lazy(&url)?;
        Self::with_pool(pg, config).await
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    async fn with_pool(pg: PgPool, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(config.mongo_uri()?).await?;
        options.server_selection_timeout = Some(Duration::from_secs(config.connection_timeout));
        let mongo = Client::with_options(options)?;
        let database = mongo.database(config.mongo_db()?);

        Ok(Self {
            pg,
            mongo,
            database,
            writes: WriteCounters::default(),
        })
    }

    /// Relational session. The pool replaces closed connections transparently.
    pub fn pg_pool(&self) -> &PgPool {
        &self.pg
    }

    /// Handle to a named collection in the configured document database
    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    /// Begin a transaction-scoped cursor. See [`ScopedCursor`] for the release rules.
    pub async fn scoped_cursor(&self) -> Result<ScopedCursor, DatabaseError> {
        let tx = self.pg.begin().await?;
        Ok(ScopedCursor::new(tx))
    }

    /// `SELECT 1` round-trip. Failures are logged, never propagated.
    pub async fn probe_relational(&self) -> bool {
        match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pg).await {
            Ok(value) => value == 1,
            Err(e) => {
                warn!("PostgreSQL connection failed: {}", e);
                false
            }
        }
    }

    /// `ping` against the admin database. Failures are logged, never propagated.
    pub async fn probe_document_store(&self) -> bool {
        match self.mongo.database("admin").run_command(doc! { "ping": 1 }, None).await {
            Ok(_) => true,
            Err(e) => {
                warn!("MongoDB connection failed: {}", e);
                false
            }
        }
    }

    pub(crate) fn record_write(&self, store: Store) {
        let counter = match store {
            Store::Relational => &self.writes.relational,
            Store::Document => &self.writes.document,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        debug!(?store, "write recorded");
    }

    pub fn stats(&self) -> ConnectionStats {
        ConnectionStats {
            relational_writes: self.writes.relational.load(Ordering::Relaxed),
            document_writes: self.writes.document.load(Ordering::Relaxed),
        }
    }

    /// Close the pool and shut the MongoDB client down
    pub async fn close(&self) {
        self.pg.close().await;
        info!("Closed PostgreSQL pool");
        self.mongo.clone().shutdown().await;
        info!("Closed MongoDB client");
    }
}
