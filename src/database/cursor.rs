use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{debug, warn};

use crate::database::manager::DatabaseError;

/// A transaction-bound cursor.
///
/// `complete(Ok(..))` commits, `complete(Err(..))` rolls back and hands the
/// original error back. A cursor dropped without `complete` (early return,
/// panic, cancelled future) rolls back when the transaction is dropped.
pub struct ScopedCursor {
    tx: Transaction<'static, Postgres>,
}

impl ScopedCursor {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Connection to run statements on, inside the transaction
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    pub async fn complete<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                match self.tx.rollback().await {
                    Ok(()) => debug!("rolled back after: {}", err),
                    Err(rollback) => warn!("rollback failed ({}) after: {}", rollback, err),
                }
                Err(err)
            }
        }
    }
}
