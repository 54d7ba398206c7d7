//! Ordered annotation store.
//!
//! # Responsibilities
//! - Map string keys to [`Value`]s behind a single reader/writer lock
//! - Remember the position each key was first inserted at
//! - Render the entries as a delimited, optionally wrapped string
//!
//! # Design Decisions
//! - Display order comes from an explicit `order` field, never from map iteration
//! - Overwriting a key keeps its order; deleting a key does not renumber the rest
//! - Equal orders (possible after a delete) fall back to insertion sequence
//! - Copies are deep: a new map behind a new lock

pub mod value;

pub use value::Value;

use std::collections::HashMap;

use parking_lot::RwLock;

/// One stored annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaEntry {
    value: Value,
    order: usize,
    seq: u64,
}

impl MetaEntry {
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Position assigned at first insertion.
    pub fn order(&self) -> usize {
        self.order
    }
}

/// Concurrency-safe key/value store that preserves first-insertion order.
#[derive(Debug, Default)]
pub struct Meta {
    entries: RwLock<Entries>,
}

#[derive(Debug, Default, Clone)]
struct Entries {
    map: HashMap<String, MetaEntry>,
    // Total inserts of new keys, never decremented.
    inserted: u64,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().map.get(key).map(|e| e.value.clone())
    }

    /// Full entry for `key`, including its order.
    pub fn entry(&self, key: &str) -> Option<MetaEntry> {
        self.entries.read().map.get(key).cloned()
    }

    /// Set `key` to `value`.
    ///
    /// A new key is assigned the current entry count as its order. The count
    /// is read under the write lock, so concurrent inserts never collide.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.entries.write();

        match entries.map.get_mut(&key) {
            Some(entry) => entry.value = value,
            None => {
                let order = entries.map.len();
                let seq = entries.inserted;
                entries.inserted += 1;
                entries.map.insert(key, MetaEntry { value, order, seq });
            }
        }
    }

    /// Remove `key`. Remaining entries keep their order.
    pub fn delete(&self, key: &str) {
        self.entries.write().map.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }

    /// Keys in display order.
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read();
        sorted(&entries.map).into_iter().map(|(k, _)| k.clone()).collect()
    }

    /// Render every entry as `key=value` in display order, joined by `delim`.
    ///
    /// The joined string replaces the first `%s` in `wrapper`; an empty
    /// wrapper returns it bare. An empty store renders as `""` without the
    /// wrapper.
    pub fn format(&self, delim: &str, wrapper: &str) -> String {
        let entries = self.entries.read();
        if entries.map.is_empty() {
            return String::new();
        }

        let joined = sorted(&entries.map)
            .into_iter()
            .map(|(k, e)| format!("{k}={}", e.value))
            .collect::<Vec<_>>()
            .join(delim);

        if wrapper.is_empty() {
            joined
        } else if wrapper.contains("%s") {
            wrapper.replacen("%s", &joined, 1)
        } else {
            format!("{wrapper}{joined}")
        }
    }

    /// Deep copy with its own map and lock.
    pub fn copy(&self) -> Meta {
        let entries = self.entries.read();
        Meta {
            entries: RwLock::new(entries.clone()),
        }
    }
}

impl Clone for Meta {
    fn clone(&self) -> Self {
        self.copy()
    }
}

// Ties on order can follow a delete-then-insert; the earlier insert wins.
fn sorted(entries: &HashMap<String, MetaEntry>) -> Vec<(&String, &MetaEntry)> {
    let mut pairs: Vec<_> = entries.iter().collect();
    pairs.sort_by_key(|(_, e)| (e.order, e.seq));
    pairs
}
