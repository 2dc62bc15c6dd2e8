//! Memoized preflop distributions keyed by hole cards and opponent count.
//!
//! Lookups are order-independent over the two hole cards. Concurrent callers
//! asking for the same key wait on that key's slot while one of them computes,
//! so each key is computed at most once; different keys proceed in parallel.

use crate::cards::Card;
use crate::hand::{HoleCards, Opponents};
use crate::simulator::PreflopDistribution;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// On-disk format version; files with another version are ignored.
pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] io::Error),
    #[error("cache format error: {0}")]
    Format(#[from] serde_json::Error),
    #[error("unsupported cache version {found} (expected {CACHE_FORMAT_VERSION})")]
    Version { found: u32 },
}

/// Hole cards in canonical order plus the opponent count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub hole: [Card; 2],
    pub opponents: u8,
}

impl CacheKey {
    pub fn new(hole: &HoleCards, opponents: Opponents) -> Self {
        Self { hole: hole.canonical(), opponents: opponents.count() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub key: CacheKey,
    pub distribution: PreflopDistribution,
}

/// Persistence for cache records.
pub trait CacheStore: Send + Sync + fmt::Debug {
    fn load(&self) -> Result<Vec<CacheRecord>, CacheError>;
    fn save(&self, records: &[CacheRecord]) -> Result<(), CacheError>;
}

#[derive(Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: Vec<CacheRecord>,
}

/// JSON file store. A missing file loads as empty. Each save writes its own
/// uniquely named temp file in the same directory and renames it over the
/// target, so a reader sees either the old file or the new one.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl CacheStore for JsonFileStore {
    fn load(&self) -> Result<Vec<CacheRecord>, CacheError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let file: CacheFile = serde_json::from_str(&text)?;
        if file.version != CACHE_FORMAT_VERSION {
            return Err(CacheError::Version { found: file.version });
        }
        Ok(file.entries)
    }

    fn save(&self, records: &[CacheRecord]) -> Result<(), CacheError> {
        let dir = self.dir();
        fs::create_dir_all(dir)?;
        let file = CacheFile { version: CACHE_FORMAT_VERSION, entries: records.to_vec() };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(&file)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

type Slot = Arc<Mutex<Option<PreflopDistribution>>>;

#[derive(Debug, Default)]
pub struct EquityCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
    /// Slots holding a distribution.
    filled: AtomicUsize,
    /// Serializes `flush` so saves never interleave.
    flush_lock: Mutex<()>,
    store: Option<Box<dyn CacheStore>>,
}

impl EquityCache {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Warm the cache from `store`. A store that cannot be read leaves the
    /// cache cold; the failure is logged, not returned.
    pub fn open(store: impl CacheStore + 'static) -> Self {
        let records = store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, store = ?store, "equity cache unreadable, starting cold");
            Vec::new()
        });
        tracing::debug!(entries = records.len(), "equity cache loaded");
        let slots: HashMap<CacheKey, Slot> = records
            .into_iter()
            .map(|r| (r.key, Arc::new(Mutex::new(Some(r.distribution)))))
            .collect();
        Self {
            filled: AtomicUsize::new(slots.len()),
            slots: Mutex::new(slots),
            flush_lock: Mutex::new(()),
            store: Some(Box::new(store)),
        }
    }

    fn slot(&self, key: CacheKey) -> Slot {
        Arc::clone(self.slots.lock().entry(key).or_default())
    }

    /// Return the cached distribution for this hand, or run `compute` and
    /// store its result. An entry built from fewer than `trials` samples is
    /// recomputed. Errors from `compute` are returned and nothing is stored.
    pub fn get_or_compute<E, F>(
        &self,
        hole: &HoleCards,
        opponents: Opponents,
        trials: u32,
        compute: F,
    ) -> Result<PreflopDistribution, E>
    where
        F: FnOnce() -> Result<PreflopDistribution, E>,
    {
        let key = CacheKey::new(hole, opponents);
        let slot = self.slot(key);
        let mut entry = slot.lock();
        if let Some(hit) = (*entry).filter(|d| d.trials >= u64::from(trials)) {
            tracing::debug!(hole = %DisplayKey(&key), opponents = key.opponents, "preflop cache hit");
            return Ok(hit);
        }
        tracing::info!(
            hole = %DisplayKey(&key),
            opponents = key.opponents,
            trials,
            "preflop cache miss, computing"
        );
        let computed = compute()?;
        if entry.replace(computed).is_none() {
            self.filled.fetch_add(1, Ordering::Relaxed);
        }
        Ok(computed)
    }

    pub fn get(&self, hole: &HoleCards, opponents: Opponents) -> Option<PreflopDistribution> {
        let slot = self.slots.lock().get(&CacheKey::new(hole, opponents)).cloned()?;
        let entry = *slot.lock();
        entry
    }

    /// Completed entries, sorted by key. Waits for in-flight computations.
    pub fn records(&self) -> Vec<CacheRecord> {
        let slots: Vec<(CacheKey, Slot)> =
            self.slots.lock().iter().map(|(k, s)| (*k, Arc::clone(s))).collect();
        let mut records: Vec<CacheRecord> = slots
            .into_iter()
            .filter_map(|(key, slot)| {
                let entry = *slot.lock();
                entry.map(|distribution| CacheRecord { key, distribution })
            })
            .collect();
        records.sort_by_key(|r| r.key);
        records
    }

    /// Number of completed entries. Does not wait for in-flight computations.
    pub fn len(&self) -> usize {
        self.filled.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every completed entry to the backing store, if any. Returns
    /// whether the write happened; failures are logged.
    pub fn flush(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        let _guard = self.flush_lock.lock();
        let records = self.records();
        match store.save(&records) {
            Ok(()) => {
                tracing::debug!(entries = records.len(), "equity cache flushed");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, store = ?store, "equity cache flush failed");
                false
            }
        }
    }
}

struct DisplayKey<'a>(&'a CacheKey);

impl fmt::Display for DisplayKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.hole[0], self.0.hole[1])
    }
}
