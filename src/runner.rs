use std::error::Error;
use std::future::Future;
use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    Executor, FailureLogger, IsolationLevel, Severity, TracingLogger, TransactionError,
    TransactionResult,
};

/// Executes units of work inside database transactions with a
/// commit-or-rollback guarantee.
///
/// A transaction, once begun, is always terminated by exactly one of commit
/// or rollback: commit if and only if the unit of work returns `Ok`, rollback
/// on any failure. Each invocation begins a fresh session on the shared pool;
/// the session is never shared across concurrent invocations.
///
/// [`TransactionRunner::run`] surfaces failures to the caller unchanged.
/// [`TransactionRunner::run_safely`] contains them, reporting each failure
/// exactly once through the configured [`FailureLogger`] (or a caller-supplied
/// handler, see [`TransactionRunner::run_safely_with`]).
pub struct TransactionRunner {
    pool: Arc<PgPool>,
    logger: Arc<dyn FailureLogger>,
}

impl TransactionRunner {
    /// Create a runner over the given connection pool, reporting contained
    /// failures through the default [`TracingLogger`].
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_logger(pool, Arc::new(TracingLogger))
    }

    /// Create a runner with an explicit failure logger.
    pub fn with_logger(pool: Arc<PgPool>, logger: Arc<dyn FailureLogger>) -> Self {
        Self { pool, logger }
    }

    /// Execute `work` within a transaction, committing on success and rolling
    /// back on failure.
    ///
    /// The transaction is begun at `isolation` when given, at the session
    /// default otherwise. On success the unit of work's value is returned and
    /// its writes are durable. On failure the transaction is rolled back and
    /// the original failure is returned unchanged inside
    /// [`TransactionError::Work`]; a rollback failure never masks it and is
    /// attached as [`TransactionError::rollback_error`].
    pub async fn run<T, E, F, Fut>(
        &self,
        isolation: Option<IsolationLevel>,
        work: F,
    ) -> TransactionResult<T, E>
    where
        F: FnOnce(Executor) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut tx = self.pool.begin().await.map_err(|e| TransactionError::Begin {
            source: e,
            rollback_error: None,
        })?;

        // Postgres takes the isolation level as the first statement of the
        // transaction; a failure here still counts as a begin failure.
        if let Some(level) = isolation {
            if let Err(e) = sqlx::query(level.set_statement()).execute(&mut *tx).await {
                return Err(TransactionError::Begin {
                    source: e,
                    rollback_error: tx.rollback().await.err(),
                });
            }
        }

        let executor = Executor::new(tx);
        match work(executor.clone()).await {
            Ok(value) => match executor.take_transaction().await {
                Some(tx) => {
                    tx.commit().await.map_err(TransactionError::Commit)?;
                    Ok(value)
                }
                None => Err(TransactionError::SessionConsumed),
            },
            Err(source) => {
                // Best-effort rollback: its own failure is attached, not
                // surfaced in place of the work failure.
                let rollback_error = match executor.take_transaction().await {
                    Some(tx) => tx.rollback().await.err(),
                    None => None,
                };
                Err(TransactionError::Work {
                    source,
                    rollback_error,
                })
            }
        }
    }

    /// Execute `work` within a transaction, containing any failure.
    ///
    /// Delegates to [`TransactionRunner::run`]. On failure, reports it to the
    /// configured logger at error severity exactly once and returns it as a
    /// value; this method never panics on the failure path.
    pub async fn run_safely<T, E, F, Fut>(
        &self,
        isolation: Option<IsolationLevel>,
        work: F,
    ) -> TransactionResult<T, E>
    where
        F: FnOnce(Executor) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Error + Send + Sync + 'static,
    {
        match self.run(isolation, work).await {
            Ok(value) => Ok(value),
            Err(failure) => {
                self.logger.log(&failure, Severity::Error);
                Err(failure)
            }
        }
    }

    /// Like [`TransactionRunner::run_safely`], but reporting failures to
    /// `on_failure` instead of the configured logger.
    ///
    /// The handler is invoked exactly once with the original failure; the
    /// default logger is not touched.
    pub async fn run_safely_with<T, E, F, Fut, H>(
        &self,
        isolation: Option<IsolationLevel>,
        work: F,
        on_failure: H,
    ) -> TransactionResult<T, E>
    where
        F: FnOnce(Executor) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        H: FnOnce(&TransactionError<E>),
    {
        match self.run(isolation, work).await {
            Ok(value) => Ok(value),
            Err(failure) => {
                on_failure(&failure);
                Err(failure)
            }
        }
    }
}
