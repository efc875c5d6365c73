/// Error type for a transactional unit of work.
///
/// The type parameter `E` is the failure type of the unit of work itself;
/// it is carried through unchanged so callers get back exactly the error
/// their closure produced.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError<E> {
    /// Beginning the transaction failed (including a failed isolation-level
    /// request). Nothing was executed on the caller's behalf. When the
    /// isolation-level request failed after the transaction was opened, the
    /// error of the best-effort rollback is attached.
    #[error("failed to begin transaction: {source}")]
    Begin {
        #[source]
        source: sqlx::Error,
        rollback_error: Option<sqlx::Error>,
    },

    /// The unit of work failed. The transaction was rolled back; if the
    /// rollback itself also failed, that secondary error is attached and the
    /// original failure is still the one surfaced.
    #[error("unit of work failed: {source}")]
    Work {
        #[source]
        source: E,
        rollback_error: Option<sqlx::Error>,
    },

    /// Commit failed after the unit of work succeeded. The engine aborts the
    /// transaction on a failed commit, so its writes are not durable.
    #[error("transaction commit failed: {0}")]
    Commit(#[source] sqlx::Error),

    /// The unit of work took the transaction out of its session, leaving the
    /// runner nothing to commit or roll back.
    #[error("transaction session already consumed")]
    SessionConsumed,
}

impl<E> TransactionError<E> {
    /// The original unit-of-work failure, if that is what this error is.
    pub fn work_error(&self) -> Option<&E> {
        match self {
            Self::Work { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Consumes the error, returning the unit-of-work failure unchanged.
    pub fn into_work_error(self) -> Option<E> {
        match self {
            Self::Work { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The secondary error from a failed best-effort rollback, if any.
    pub fn rollback_error(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Begin { rollback_error, .. } | Self::Work { rollback_error, .. } => {
                rollback_error.as_ref()
            }
            _ => None,
        }
    }
}

/// Result type for transactional execution.
pub type TransactionResult<T, E> = Result<T, TransactionError<E>>;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, sqlx::Error>;
