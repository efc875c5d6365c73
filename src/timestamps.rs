use chrono::{DateTime, Utc};

/// Database string format for timestamp columns.
pub const DATETIME_DB_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A record carrying `created_at` / `updated_at` attributes that are stamped
/// on lifecycle events.
pub trait Timestamped {
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// Stamps timestamp attributes on record lifecycle events: `created_at`
/// before an insert, `updated_at` before an update.
///
/// By default records are stamped with the current UTC time; a fixed value
/// can be supplied instead, which also makes tests deterministic.
#[derive(Debug, Default)]
pub struct TimestampStamper {
    value: Option<DateTime<Utc>>,
}

impl TimestampStamper {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stamper that always applies `value` instead of the current time.
    pub fn with_value(value: DateTime<Utc>) -> Self {
        Self { value: Some(value) }
    }

    fn value(&self) -> DateTime<Utc> {
        self.value.unwrap_or_else(Utc::now)
    }

    /// Stamp `created_at` ahead of an insert.
    pub fn before_insert<R: Timestamped>(&self, record: &mut R) {
        record.set_created_at(self.value());
    }

    /// Stamp `updated_at` ahead of an update.
    pub fn before_update<R: Timestamped>(&self, record: &mut R) {
        record.set_updated_at(self.value());
    }
}

/// Format a timestamp the way it is written to the database.
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format(DATETIME_DB_FORMAT).to_string()
}
