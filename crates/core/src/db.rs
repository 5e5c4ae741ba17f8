//! Database transaction seam.
//!
//! Services that must persist several rows atomically (investment row, ledger
//! entry, campaign counter update) are generic over an executor that runs a
//! closure inside a single database transaction. The concrete implementation
//! lives in the storage crate; tests use [`InMemoryTransactionExecutor`].

use diesel::sqlite::SqliteConnection;

use crate::errors::Result;

/// Executes a job within a single database transaction.
///
/// Returning `Err` from the job must roll the transaction back; the error is
/// surfaced to the caller unchanged.
pub trait DbTransactionExecutor: Send + Sync + Clone {
    fn execute<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static;
}
