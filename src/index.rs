use std::collections::BTreeMap;

use anyhow::{Context, Result};
use indufind_syntax::parse_query;
use serde_json::Value;
use tracing::{debug, info};

use crate::matcher;
use crate::record::RecordValue;

/// In-memory index of one entity class (targets, connections, …), keyed by
/// the entity's stable identifier.
///
/// The index is a plain replace-on-write map: indexing an identifier again
/// overwrites its record, and incremental indexing is additive, so partial
/// rebuilds are safe. Searching is a full linear scan and identifiers come
/// back in index-iteration order (sorted by identifier); callers needing a
/// different order sort the result themselves.
///
/// ```
/// use indufind::EntityIndex;
/// use serde_json::json;
///
/// let mut index = EntityIndex::new();
/// index.index_value("T1", json!({"tag": "=A1-M2", "power": {"voltage": "24V"}}));
/// index.index_value("T2", json!({"tag": "=A1-M3", "power": {"voltage": "230V"}}));
///
/// assert_eq!(index.search("=A1 @power(voltage)=24").unwrap(), ["T1"]);
/// assert_eq!(index.search("@power(voltage)").unwrap(), ["T1", "T2"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct EntityIndex {
    records: BTreeMap<String, RecordValue>,
}

impl EntityIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, record: RecordValue) {
        self.records.insert(id.into(), record);
    }

    /// Converts a JSON value into a [`RecordValue`] and stores it.
    pub fn index_value(&mut self, id: impl Into<String>, value: Value) {
        self.insert(id, RecordValue::from(value));
    }

    /// Converts and stores any serializable host object. Fails without
    /// touching the index when the conversion fails, so a malformed source
    /// never leaves a partial record behind.
    pub fn index_object(
        &mut self,
        id: impl Into<String>,
        object: &impl serde::Serialize,
    ) -> Result<()> {
        let id = id.into();
        let value = serde_json::to_value(object)
            .with_context(|| format!("failed to convert record {id:?} for indexing"))?;
        self.index_value(id, value);
        Ok(())
    }

    /// Indexes every `(id, value)` pair, overwriting overlapping ids.
    pub fn index_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut count = 0usize;
        for (id, value) in entries {
            self.index_value(id, value);
            count += 1;
        }
        info!(count, total = self.records.len(), "indexed records");
    }

    /// Parses `query` once and scans every record, returning the matching
    /// identifiers. The only error is malformed query text; it is reported,
    /// never swallowed into an empty result.
    pub fn search(&self, query: &str) -> Result<Vec<String>> {
        let parsed = parse_query(query)?;
        let results: Vec<String> = self
            .records
            .iter()
            .filter(|(_, record)| matcher::matches(record, &parsed))
            .map(|(id, _)| id.clone())
            .collect();
        debug!(
            query,
            matched = results.len(),
            scanned = self.records.len(),
            "search finished"
        );
        Ok(results)
    }

    /// Borrows the record stored under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RecordValue> {
        self.records.get(id)
    }

    /// Iterates over `(id, record)` pairs in index-iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.records.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// All identifiers in index-iteration order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Discards every record. Rebuilding afterwards starts from scratch;
    /// there is no per-identifier removal.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
