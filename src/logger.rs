use std::error::Error;

/// Severity attached to a reported transaction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Sink for failures contained by the safe execution path.
///
/// A logger is injected into [`crate::TransactionRunner`] at construction;
/// the default reports through `tracing`. Implementations must not panic,
/// since the safe path promises never to fail.
pub trait FailureLogger: Send + Sync {
    fn log(&self, failure: &(dyn Error + 'static), severity: Severity);
}

/// Default failure logger, emitting structured `tracing` events.
#[derive(Debug, Default)]
pub struct TracingLogger;

impl FailureLogger for TracingLogger {
    fn log(&self, failure: &(dyn Error + 'static), severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(%failure, "transaction failed"),
            Severity::Warning => tracing::warn!(%failure, "transaction failed"),
        }
    }
}
