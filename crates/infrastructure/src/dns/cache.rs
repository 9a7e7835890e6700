mod key;

pub use key::CacheKey;

use dashmap::DashMap;
use dnslookup_application::ports::RecordCache;
use dnslookup_domain::{RecordType, ResourceRecord};
use rustc_hash::FxBuildHasher;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_NEGATIVE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CachedRecord {
    record: ResourceRecord,
    expires_at: Instant,
}

/// In-memory record store keyed by (name, type).
///
/// Inserting a record whose value is already cached for the same key
/// replaces it (last write wins). Other values accumulate.
pub struct InMemoryRecordCache {
    entries: DashMap<CacheKey, Vec<CachedRecord>, FxBuildHasher>,
    negative_ttl: Duration,
}

impl InMemoryRecordCache {
    pub fn new(negative_ttl: Duration) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            negative_ttl,
        }
    }

    pub fn insert_at(&self, record: ResourceRecord, now: Instant) {
        let lifetime = if record.is_negative() {
            self.negative_ttl
        } else {
            Duration::from_secs(record.ttl_secs().unwrap_or(0))
        };
        let key = CacheKey::new(&record.name, record.record_type);
        let cached = CachedRecord {
            expires_at: now + lifetime,
            record,
        };

        let mut slot = self.entries.entry(key).or_default();
        if cached.record.is_negative() {
            slot.clear();
        } else {
            slot.retain(|c| !c.record.is_negative() && c.record.value != cached.record.value);
        }
        slot.push(cached);
    }

    pub fn lookup_at(
        &self,
        domain: &str,
        record_type: RecordType,
        now: Instant,
    ) -> Vec<ResourceRecord> {
        let key = CacheKey::new(domain, record_type);
        let Some(mut slot) = self.entries.get_mut(&key) else {
            return Vec::new();
        };

        slot.retain(|c| c.expires_at > now);
        slot.iter().map(|c| Self::live_view(c, now)).collect()
    }

    pub fn snapshot_at(&self, now: Instant) -> Vec<ResourceRecord> {
        let mut records: Vec<ResourceRecord> = self
            .entries
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|c| c.expires_at > now)
                    .map(|c| Self::live_view(c, now))
                    .collect::<Vec<_>>()
            })
            .collect();

        records.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then(a.record_type.cmp(&b.record_type))
                .then(a.value.cmp(&b.value))
        });
        records
    }

    /// Drops expired entries; returns how many records were removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, slot| {
            let before = slot.len();
            slot.retain(|c| c.expires_at > now);
            removed += before - slot.len();
            !slot.is_empty()
        });
        if removed > 0 {
            debug!(removed = removed, "Expired cache records purged");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn live_view(cached: &CachedRecord, now: Instant) -> ResourceRecord {
        if cached.record.is_negative() {
            return cached.record.clone();
        }
        let remaining = cached.expires_at.saturating_duration_since(now).as_secs();
        cached
            .record
            .with_ttl(i32::try_from(remaining).unwrap_or(i32::MAX))
    }
}

impl Default for InMemoryRecordCache {
    fn default() -> Self {
        Self::new(DEFAULT_NEGATIVE_TTL)
    }
}

impl RecordCache for InMemoryRecordCache {
    fn insert(&self, record: ResourceRecord) {
        self.insert_at(record, Instant::now());
    }

    fn lookup(&self, domain: &str, record_type: RecordType) -> Vec<ResourceRecord> {
        self.lookup_at(domain, record_type, Instant::now())
    }

    fn snapshot(&self) -> Vec<ResourceRecord> {
        self.snapshot_at(Instant::now())
    }
}
