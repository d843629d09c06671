use crate::table::Workbook;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

/// Identity of a loaded source: where it came from and, for local files,
/// the modification time it had when it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: String,
    pub modified: Option<SystemTime>,
}

impl CacheKey {
    pub fn new(source: impl Into<String>, modified: Option<SystemTime>) -> Self {
        Self {
            source: source.into(),
            modified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Parsed workbooks keyed by [`CacheKey`]. Only successful loads are cached;
/// a new modification time for a source evicts its older entry.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: Mutex<HashMap<CacheKey, Arc<Workbook>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Workbook>> {
        let found = self.lock().get(key).cloned();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    pub fn insert(&self, key: CacheKey, workbook: Arc<Workbook>) {
        let mut entries = self.lock();
        entries.retain(|k, _| k.source != key.source);
        entries.insert(key, workbook);
    }

    pub fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Arc<Workbook>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
