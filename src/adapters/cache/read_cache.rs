//! Path-keyed cache of successful get-data replies.

use dashmap::DashMap;

use crate::domain::models::{CacheConfig, Response};

/// Concurrent map of node path to the last successful get-data reply.
///
/// The table is sharded, so lookups, insertions, and removals on unrelated
/// paths never serialize against each other. Ownership is explicit: the cache
/// is constructed by whoever composes the dispatch layer and injected into
/// [`CachedProvider`](super::CachedProvider); nothing here is process-global.
///
/// An entry exists only while the most recent read of its path succeeded and
/// no later delete intervened. Entries never expire on their own.
#[derive(Debug, Default)]
pub struct ReadCache {
    entries: DashMap<String, Response>,
}

impl ReadCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Pre-size the table for an expected working set.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    /// Build from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Clone of the cached reply for `path`, if present.
    ///
    /// The clone shares its data buffer with the stored entry, so later
    /// in-place updates remain visible through it.
    pub fn lookup(&self, path: &str) -> Option<Response> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }

    /// Retain `resp` as the last-read reply for `path`.
    pub fn store(&self, path: impl Into<String>, resp: Response) {
        self.entries.insert(path.into(), resp);
    }

    /// Drop the entry for `path`. Absent entries are not an error.
    pub fn invalidate(&self, path: &str) {
        self.entries.remove(path);
    }

    /// Replace the data buffer of the entry for `path` in place.
    ///
    /// The map value is left where it is; the bytes are swapped through the
    /// entry's shared buffer, so every clone handed out earlier observes the
    /// new data. Returns `false` when no entry exists — writes never insert.
    pub fn update_data(&self, path: &str, data: &[u8]) -> bool {
        match self.entries.get(path) {
            Some(entry) => match entry.as_get_data() {
                Some(body) => {
                    body.data.replace(data.to_vec());
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Whether an entry exists for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{GetDataBody, ResponseBody, SharedData, Stat};

    fn read_reply(data: &[u8]) -> Response {
        Response::ok(
            0,
            1,
            ResponseBody::GetData(GetDataBody {
                data: SharedData::new(data.to_vec()),
                stat: Stat::default(),
            }),
        )
    }

    #[test]
    fn lookup_returns_stored_reply() {
        let cache = ReadCache::new();
        cache.store("/a", read_reply(b"one"));

        let found = cache.lookup("/a").expect("entry");
        assert_eq!(found.as_get_data().unwrap().data.to_vec(), b"one");
        assert!(cache.lookup("/b").is_none());
    }

    #[test]
    fn lookup_clone_shares_the_entry_buffer() {
        let cache = ReadCache::new();
        cache.store("/a", read_reply(b"one"));

        let before = cache.lookup("/a").expect("entry");
        assert!(cache.update_data("/a", b"two"));

        assert_eq!(before.as_get_data().unwrap().data.to_vec(), b"two");
    }

    #[test]
    fn invalidate_is_idempotent() {
        let cache = ReadCache::new();
        cache.store("/a", read_reply(b"one"));

        cache.invalidate("/a");
        cache.invalidate("/a");
        cache.invalidate("/never-stored");

        assert!(cache.is_empty());
    }

    #[test]
    fn update_without_entry_reports_false() {
        let cache = ReadCache::new();

        assert!(!cache.update_data("/a", b"two"));
        assert!(!cache.contains("/a"));
        assert_eq!(cache.len(), 0);
    }
}
