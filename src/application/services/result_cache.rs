use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::{Fingerprint, Transcript};

struct CacheEntry {
    created_at: Instant,
    transcript: Transcript,
}

/// In-memory transcript cache keyed by upload fingerprint.
///
/// Lookups do not check entry age; expired entries are removed only by
/// [`sweep`](ResultCache::sweep), which the health handler invokes
/// opportunistically. Storing an existing fingerprint replaces the entry.
/// Process-local and lost on restart.
pub struct ResultCache {
    entries: Mutex<HashMap<Fingerprint, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<Transcript> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(fingerprint).map(|e| e.transcript.clone())
    }

    pub fn store(&self, fingerprint: Fingerprint, transcript: Transcript) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            fingerprint,
            CacheEntry {
                created_at: Instant::now(),
                transcript,
            },
        );
    }

    /// Remove every entry older than the configured TTL and return how
    /// many were removed. Safe on an empty cache.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, e| now.duration_since(e.created_at) <= self.ttl);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::info!(removed, "Swept expired cache entries");
        }
        removed
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
