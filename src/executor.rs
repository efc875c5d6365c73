use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Executor wraps the transaction of one runner invocation for use by the
/// unit of work and any repositories it drives.
///
/// Cloning is cheap and every clone refers to the same underlying
/// transaction, so multiple repositories within one unit of work share a
/// single session. The slot becomes `None` once the runner commits or rolls
/// back.
#[derive(Clone, Debug)]
pub struct Executor {
    tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Locks the transaction slot for running queries.
    ///
    /// The guard holds `None` after the transaction has been committed or
    /// rolled back; callers should map that case to [`sqlx::Error::PoolClosed`].
    pub async fn lock(&self) -> MutexGuard<'_, Option<Transaction<'static, Postgres>>> {
        self.tx.lock().await
    }

    /// Takes ownership of the transaction, leaving `None` in its place.
    /// Called exactly once per invocation, when committing or rolling back.
    pub(crate) async fn take_transaction(&self) -> Option<Transaction<'static, Postgres>> {
        self.tx.lock().await.take()
    }
}
