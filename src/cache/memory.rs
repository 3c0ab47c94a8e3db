//! Concurrent path → payload cache.

use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;

/// A cached response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheItem {
    /// Request path the item is served under.
    pub path: String,
    /// Value of the `Content-Type` header.
    pub content_type: String,
    /// Value of the `Content-Encoding` header, when the payload is encoded.
    pub content_encoding: Option<String>,
    /// Raw payload, served verbatim.
    pub body: Bytes,
}

impl CacheItem {
    /// Create an unencoded item.
    pub fn new(
        path: impl Into<String>,
        content_type: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            path: path.into(),
            content_type: content_type.into(),
            content_encoding: None,
            body: body.into(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A thread-safe cache of [`CacheItem`]s keyed by path.
///
/// Readers never observe a partially written entry: `set` is a single-entry
/// upsert under the shard lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, CacheItem>>,
}

impl MemoryCache {
    /// Create an empty cache sized for roughly `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(DashMap::with_capacity(capacity)),
        }
    }

    /// Get the item stored under `path`.
    pub fn get(&self, path: &str) -> Option<CacheItem> {
        self.inner.get(path).map(|r| r.value().clone())
    }

    /// Store an item under its own path, replacing any previous one.
    pub fn set(&self, item: CacheItem) {
        self.inner.insert(item.path.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_operations() {
        let cache = MemoryCache::new(2);
        assert!(cache.get("/app.js").is_none());
        assert!(cache.is_empty());

        cache.set(CacheItem::new("/app.js", "application/javascript", "console.log(1);"));
        let item = cache.get("/app.js").unwrap();
        assert_eq!(item.content_type, "application/javascript");
        assert_eq!(item.len(), 15);
        assert_eq!(cache.len(), 1);

        // Repeated reads return the same bytes
        assert_eq!(cache.get("/app.js").unwrap().body, item.body);
    }

    #[test]
    fn test_capacity_is_not_a_bound() {
        let cache = MemoryCache::new(1);
        for i in 0..10 {
            cache.set(CacheItem::new(format!("/{}.txt", i), "text/plain", "x"));
        }
        assert_eq!(cache.len(), 10);
        assert!(cache.get("/0.txt").is_some());
    }

    #[test]
    fn test_set_replaces_item() {
        let cache = MemoryCache::new(1);
        cache.set(CacheItem::new("/robots.txt", "text/plain", "a"));

        let mut item = CacheItem::new("/robots.txt", "text/plain", "b");
        item.content_encoding = Some("gzip".to_string());
        cache.set(item);

        let stored = cache.get("/robots.txt").unwrap();
        assert_eq!(stored.body, Bytes::from_static(b"b"));
        assert_eq!(stored.content_encoding.as_deref(), Some("gzip"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = MemoryCache::new(4);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let path = format!("/{}", i % 2);
                    cache.set(CacheItem::new(path.clone(), "text/plain", "same"));
                    cache.get(&path).map(|item| item.body)
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), Some(Bytes::from_static(b"same")));
        }
        assert_eq!(cache.len(), 2);
    }
}
