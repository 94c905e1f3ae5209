//! Memory Store Module
//!
//! Synchronous HashMap engine behind [`MemoryBackend`](super::MemoryBackend),
//! following Redis semantics for strings, counters, lists and expiry.

use std::collections::HashMap;
use std::time::Duration;

use crate::backend::{Entry, Value};
use crate::error::{Error, Result};

// == Memory Store ==
/// Key-value storage with lazy and swept TTL expiration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, Entry>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry under `key`, dropping it first if it has expired.
    fn live_entry(&mut self, key: &str) -> Option<&mut Entry> {
        if self.entries.get(key).is_some_and(Entry::is_expired) {
            self.entries.remove(key);
            return None;
        }
        self.entries.get_mut(key)
    }

    // == Set ==
    /// Stores a byte string, overwriting any previous value and expiry.
    pub fn set(&mut self, key: &str, value: Vec<u8>) {
        self.entries
            .insert(key.to_string(), Entry::new(Value::Bytes(value), None));
    }

    // == Set With Expiry ==
    /// Stores a byte string that expires after `ttl`.
    pub fn set_ex(&mut self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let ttl_ms = ttl.as_millis();
        if ttl_ms == 0 {
            return Err(Error::InvalidExpiry(format!(
                "expiry for '{}' must be at least one millisecond",
                key
            )));
        }

        let ttl_ms = u64::try_from(ttl_ms).unwrap_or(u64::MAX);
        self.entries
            .insert(key.to_string(), Entry::new(Value::Bytes(value), Some(ttl_ms)));
        Ok(())
    }

    // == Get ==
    /// Retrieves a byte string; `None` if absent or expired.
    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.live_entry(key) {
            Some(Entry {
                value: Value::Bytes(bytes),
                ..
            }) => Ok(Some(bytes.clone())),
            Some(_) => Err(Error::WrongType(key.to_string())),
            None => Ok(None),
        }
    }

    // == Increment ==
    /// Adds one to the decimal counter under `key`, keeping its expiry.
    pub fn incr(&mut self, key: &str) -> Result<i64> {
        let current = match self.live_entry(key) {
            Some(Entry {
                value: Value::Bytes(bytes),
                ..
            }) => parse_counter(key, bytes)?,
            Some(_) => return Err(Error::WrongType(key.to_string())),
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| Error::Conversion(format!("counter '{}' would overflow", key)))?;
        let encoded = next.to_string().into_bytes();

        match self.entries.get_mut(key) {
            Some(entry) => entry.value = Value::Bytes(encoded),
            None => {
                self.entries
                    .insert(key.to_string(), Entry::new(Value::Bytes(encoded), None));
            }
        }

        Ok(next)
    }

    // == Right Push ==
    /// Appends to the list under `key`, creating it if needed.
    pub fn rpush(&mut self, key: &str, value: Vec<u8>) -> Result<usize> {
        if let Some(entry) = self.live_entry(key) {
            return match &mut entry.value {
                Value::List(items) => {
                    items.push(value);
                    Ok(items.len())
                }
                Value::Bytes(_) => Err(Error::WrongType(key.to_string())),
            };
        }

        self.entries
            .insert(key.to_string(), Entry::new(Value::List(vec![value]), None));
        Ok(1)
    }

    // == List Range ==
    /// Returns the inclusive slice `start..=stop` of the list under `key`.
    pub fn lrange(&mut self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        match self.live_entry(key) {
            Some(Entry {
                value: Value::List(items),
                ..
            }) => Ok(match range_bounds(items.len(), start, stop) {
                Some((from, to)) => items[from..=to].to_vec(),
                None => Vec::new(),
            }),
            Some(_) => Err(Error::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }

    // == Flush ==
    /// Removes every entry.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones not yet swept included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_counter(key: &str, bytes: &[u8]) -> Result<i64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| Error::Conversion(format!("value of '{}' is not an integer", key)))
}

/// Resolves Redis-style inclusive indices against a list of `len` items.
fn range_bounds(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn list(items: &[&str]) -> Vec<Vec<u8>> {
        items.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    #[test]
    fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = MemoryStore::new();

        store.set("key1", b"value1".to_vec());

        assert_eq!(store.get("key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_clears_previous_expiry() {
        let mut store = MemoryStore::new();

        store
            .set_ex("key1", b"old".to_vec(), Duration::from_millis(30))
            .unwrap();
        store.set("key1", b"new".to_vec());
        sleep(Duration::from_millis(60));

        assert_eq!(store.get("key1").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn test_set_ex_expires() {
        let mut store = MemoryStore::new();

        store
            .set_ex("page", b"<html>".to_vec(), Duration::from_millis(50))
            .unwrap();
        assert!(store.get("page").unwrap().is_some());

        sleep(Duration::from_millis(80));

        assert_eq!(store.get("page").unwrap(), None);
        assert!(store.is_empty(), "expired entry should be dropped on read");
    }

    #[test]
    fn test_set_ex_zero_ttl_rejected() {
        let mut store = MemoryStore::new();

        let result = store.set_ex("page", b"x".to_vec(), Duration::ZERO);
        assert!(matches!(result, Err(Error::InvalidExpiry(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_incr_creates_and_counts() {
        let mut store = MemoryStore::new();

        assert_eq!(store.incr("hits").unwrap(), 1);
        assert_eq!(store.incr("hits").unwrap(), 2);
        assert_eq!(store.get("hits").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_incr_existing_decimal_text() {
        let mut store = MemoryStore::new();

        store.set("hits", b"41".to_vec());
        assert_eq!(store.incr("hits").unwrap(), 42);
    }

    #[test]
    fn test_incr_non_integer_fails() {
        let mut store = MemoryStore::new();

        store.set("name", b"hello".to_vec());
        assert!(matches!(store.incr("name"), Err(Error::Conversion(_))));
        assert_eq!(store.get("name").unwrap(), Some(b"hello".to_vec()));
    }

    #[test]
    fn test_incr_overflow_fails() {
        let mut store = MemoryStore::new();

        store.set("hits", i64::MAX.to_string().into_bytes());
        assert!(matches!(store.incr("hits"), Err(Error::Conversion(_))));
    }

    #[test]
    fn test_incr_keeps_expiry() {
        let mut store = MemoryStore::new();

        store
            .set_ex("hits", b"1".to_vec(), Duration::from_millis(40))
            .unwrap();
        assert_eq!(store.incr("hits").unwrap(), 2);

        sleep(Duration::from_millis(70));
        assert_eq!(store.get("hits").unwrap(), None);
    }

    #[test]
    fn test_rpush_and_lrange() {
        let mut store = MemoryStore::new();

        assert_eq!(store.rpush("log", b"a".to_vec()).unwrap(), 1);
        assert_eq!(store.rpush("log", b"b".to_vec()).unwrap(), 2);
        assert_eq!(store.rpush("log", b"c".to_vec()).unwrap(), 3);

        assert_eq!(store.lrange("log", 0, -1).unwrap(), list(&["a", "b", "c"]));
        assert_eq!(store.lrange("log", 1, 1).unwrap(), list(&["b"]));
        assert_eq!(store.lrange("log", -2, -1).unwrap(), list(&["b", "c"]));
    }

    #[test]
    fn test_lrange_out_of_range() {
        let mut store = MemoryStore::new();
        store.rpush("log", b"a".to_vec()).unwrap();
        store.rpush("log", b"b".to_vec()).unwrap();

        assert_eq!(store.lrange("log", 0, 100).unwrap(), list(&["a", "b"]));
        assert_eq!(store.lrange("log", -100, 0).unwrap(), list(&["a"]));
        assert!(store.lrange("log", 5, 10).unwrap().is_empty());
        assert!(store.lrange("log", 1, 0).unwrap().is_empty());
        assert!(store.lrange("missing", 0, -1).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_type_access() {
        let mut store = MemoryStore::new();
        store.set("plain", b"x".to_vec());
        store.rpush("log", b"a".to_vec()).unwrap();

        assert!(matches!(store.get("log"), Err(Error::WrongType(_))));
        assert!(matches!(store.incr("log"), Err(Error::WrongType(_))));
        assert!(matches!(
            store.rpush("plain", b"y".to_vec()),
            Err(Error::WrongType(_))
        ));
        assert!(matches!(store.lrange("plain", 0, -1), Err(Error::WrongType(_))));
    }

    #[test]
    fn test_flush_removes_everything() {
        let mut store = MemoryStore::new();
        store.set("a", b"1".to_vec());
        store.incr("b").unwrap();
        store.rpush("c", b"x".to_vec()).unwrap();

        store.flush();

        assert!(store.is_empty());
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = MemoryStore::new();

        store
            .set_ex("key1", b"value1".to_vec(), Duration::from_millis(30))
            .unwrap();
        store
            .set_ex("key2", b"value2".to_vec(), Duration::from_secs(10))
            .unwrap();

        sleep(Duration::from_millis(60));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").unwrap().is_some());
    }
}
