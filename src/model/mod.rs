//! The in-memory data model: visitor records, column schema, record sets.

mod record;
mod schema;

pub use record::{weekday_name, RecordFields, VisitorRecord};
pub use schema::ColumnSchema;

/// One loaded, immutable set of visitor records.
///
/// A record set is (re)created by the loader on cache expiry or explicit
/// refresh and never mutated afterwards; filters produce new views over it.
/// A refresh produces a new set that atomically replaces the old one in the
/// cache.
#[derive(Debug, Clone)]
pub struct RecordSet {
    /// Parsed rows, in source order.
    pub records: Vec<VisitorRecord>,
    /// Column presence established at load time.
    pub schema: ColumnSchema,
    /// URL the set was loaded from.
    pub source_url: String,
}

impl RecordSet {
    /// Number of records in the set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
