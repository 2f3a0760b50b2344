//! Bounded in-memory cache of extraction records keyed by fingerprint.
//!
//! First successful insert for a fingerprint wins; later extractions of
//! content-identical documents get the cached record back. Eviction is
//! least-recently-used so the cache cannot grow without bound.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::models::DocumentRecord;

struct Inner {
    map: HashMap<String, Arc<DocumentRecord>>,
    /// Recency order, least-recently-used at the front.
    order: VecDeque<String>,
}

/// LRU cache of extracted records keyed by content fingerprint.
pub struct FingerprintCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl FingerprintCache {
    /// Create a cache holding up to `capacity` records. Zero disables
    /// caching entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Look up a record by fingerprint, refreshing its recency.
    pub fn get(&self, fingerprint: &str) -> Option<Arc<DocumentRecord>> {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        let record = inner.map.get(fingerprint).cloned()?;
        inner.order.retain(|k| k != fingerprint);
        inner.order.push_back(fingerprint.to_string());
        Some(record)
    }

    /// Insert a record unless its fingerprint is already cached.
    ///
    /// Returns the winning record: the previously cached one on a hit, the
    /// given one otherwise. Evicts the least-recently-used entries once
    /// over capacity.
    pub fn insert_if_absent(&self, record: Arc<DocumentRecord>) -> Arc<DocumentRecord> {
        if self.capacity == 0 {
            return record;
        }

        let mut inner = self.inner.lock().expect("cache lock poisoned");
        let fingerprint = record.fingerprint.clone();

        if let Some(existing) = inner.map.get(&fingerprint).cloned() {
            inner.order.retain(|k| k != &fingerprint);
            inner.order.push_back(fingerprint);
            return existing;
        }

        inner.map.insert(fingerprint.clone(), record.clone());
        inner.order.push_back(fingerprint);

        while inner.map.len() > self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                }
                None => break,
            }
        }

        record
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::{DocumentType, ExtractionMethod};

    fn record(text: &str) -> Arc<DocumentRecord> {
        Arc::new(DocumentRecord {
            path: format!("/tmp/{text}.txt").into(),
            file_name: format!("{text}.txt"),
            file_size: text.len() as u64,
            file_type: DocumentType::PlainText,
            extracted_at: Utc::now(),
            text_content: text.to_string(),
            units: Vec::new(),
            metadata: serde_json::json!({}),
            method: ExtractionMethod::DirectRead,
            fingerprint: DocumentRecord::fingerprint_of(text),
            error: None,
        })
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = FingerprintCache::new(8);
        let first = record("same");
        let mut duplicate = (*record("same")).clone();
        duplicate.file_name = "other-path.txt".to_string();

        let won = cache.insert_if_absent(first.clone());
        assert_eq!(won.file_name, first.file_name);

        let second = cache.insert_if_absent(Arc::new(duplicate));
        assert_eq!(second.file_name, first.file_name);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_eviction_is_lru() {
        let cache = FingerprintCache::new(2);
        let a = record("a");
        let b = record("b");
        let c = record("c");

        cache.insert_if_absent(a.clone());
        cache.insert_if_absent(b.clone());
        // Touch `a` so `b` becomes least recently used.
        assert!(cache.get(&a.fingerprint).is_some());
        cache.insert_if_absent(c.clone());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&a.fingerprint).is_some());
        assert!(cache.get(&b.fingerprint).is_none());
        assert!(cache.get(&c.fingerprint).is_some());
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = FingerprintCache::new(0);
        let a = record("a");
        cache.insert_if_absent(a.clone());
        assert!(cache.is_empty());
        assert!(cache.get(&a.fingerprint).is_none());
    }
}
