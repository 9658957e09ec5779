//! Directories and the access grant workflow for locshare.
//!
//! Services are stateless: each holds an `Arc` of the store plus the
//! directories it resolves natural keys through. Every operation runs in its
//! own transaction, committed on success and rolled back on any error.

mod access;
mod error;
mod locations;
mod users;

pub use access::{GrantRequest, LocationAccessService};
pub use error::{AccessError, DenialReason, Missing};
pub use locations::{LocationDirectory, RegisterLocationRequest};
pub use users::UserDirectory;

use locshare_storage::Transaction;

/// Close a transaction according to the outcome of the work done on it.
pub(crate) async fn finish<T, R>(txn: T, result: Result<R, AccessError>) -> Result<R, AccessError>
where
    T: Transaction,
{
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::warn!("rollback failed after {}: {}", e, rollback);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests;
