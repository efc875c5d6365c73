//! Postgres Transaction Manager
//!
//! This crate provides transaction execution helpers for PostgreSQL database
//! operations: a runner that executes a unit of work with a commit-or-rollback
//! guarantee, plus thin repository and timestamp-stamping primitives built on
//! the same transactional session.

pub mod error;
pub mod executor;
pub mod isolation;
pub mod logger;
pub mod repository;
pub mod runner;
pub mod timestamps;

pub use error::{RepositoryResult, TransactionError, TransactionResult};
pub use executor::Executor;
pub use isolation::IsolationLevel;
pub use logger::{FailureLogger, Severity, TracingLogger};
pub use repository::Repository;
pub use runner::TransactionRunner;
pub use timestamps::{TimestampStamper, Timestamped, DATETIME_DB_FORMAT};
