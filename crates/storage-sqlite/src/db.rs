//! Database connection management and transaction execution.

use std::path::Path;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;

use crowdfund_core::db::DbTransactionExecutor;
use crowdfund_core::errors::{DatabaseError, Error, Result};

use crate::errors::StorageError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Applies SQLite pragmas on every pooled connection.
///
/// WAL mode plus a busy timeout lets concurrent investment requests contend
/// on the campaigns table without surfacing `SQLITE_BUSY` to callers.
#[derive(Debug)]
struct SqliteConnectionCustomizer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates a connection pool for the SQLite database at `db_path`.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "Failed to create database directory: {e}"
                )))
            })?;
        }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .connection_customizer(Box::new(SqliteConnectionCustomizer))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;

    debug!("Database pool created for {}", db_path);
    Ok(Arc::new(pool))
}

/// Gets a connection from the pool.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
}

/// Runs all pending embedded migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::from(StorageError::MigrationFailed(e.to_string())))?;
    for migration in applied {
        debug!("Applied migration {}", migration);
    }
    Ok(())
}

/// Transaction executor backed by the r2d2 connection pool.
///
/// Each job runs inside a single `BEGIN IMMEDIATE` transaction, so the write
/// lock is taken up front and a `Err` return from the job rolls back every
/// statement the job issued.
#[derive(Clone)]
pub struct DieselTransactionExecutor {
    pool: Arc<DbPool>,
}

impl DieselTransactionExecutor {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl DbTransactionExecutor for DieselTransactionExecutor {
    fn execute<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<T, StorageError, _>(|c| job(c).map_err(StorageError::from))
            .map_err(Error::from)
    }
}
