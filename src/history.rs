//! Bounded, persisted log of past calculations.
//!
//! Records are kept newest first. Every mutation rewrites the whole sequence
//! into a single key-value slot. Storage failures are logged and never reach
//! the caller: unreadable or malformed data loads as an empty history.

use crate::metrics;
use crate::model::{CalculationMode, CalculationRecord, HistoryStats, NewRecord};
use crate::storage::KvStore;
use rand::RngCore;

pub const STORAGE_KEY: &str = "productivity-calculator-history";
pub const MAX_RECORDS: usize = 20;

pub struct HistoryStore<S: KvStore> {
    store: S,
    records: Vec<CalculationRecord>,
    capacity: usize,
}

impl<S: KvStore> HistoryStore<S> {
    /// Load the history from `store`, holding at most [`MAX_RECORDS`].
    pub fn load(store: S) -> Self {
        Self::with_capacity(store, MAX_RECORDS)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        let mut records = match store.read(STORAGE_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<CalculationRecord>>(&text) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("Ignoring malformed calculation history: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to load calculation history: {e:#}");
                Vec::new()
            }
        };
        if records.len() > capacity {
            log::debug!(
                "Dropping {} stored history records beyond capacity {capacity}",
                records.len() - capacity
            );
            records.truncate(capacity);
        }
        log::debug!("Loaded {} history records", records.len());
        Self {
            store,
            records,
            capacity,
        }
    }

    /// All records, newest first.
    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    /// Assign an id and timestamp, prepend, evict the oldest beyond capacity.
    pub fn add_record(&mut self, candidate: NewRecord) -> CalculationRecord {
        let record = CalculationRecord {
            id: gen_record_id(),
            industry_slug: candidate.industry_slug,
            mode: candidate.mode,
            values: candidate.values,
            break_minutes: candidate.break_minutes,
            result: candidate.result,
            timestamp: now_millis(),
            is_benchmark: false,
        };
        self.records.insert(0, record.clone());
        if self.records.len() > self.capacity {
            let evicted = self.records.len() - self.capacity;
            self.records.truncate(self.capacity);
            log::debug!("Evicted {evicted} oldest history records");
        }
        self.persist();
        record
    }

    pub fn clear_history(&mut self) {
        self.records.clear();
        self.persist();
    }

    /// Newest-first records for one industry.
    pub fn industry_history<'a>(
        &'a self,
        slug: &'a str,
    ) -> impl Iterator<Item = &'a CalculationRecord> + 'a {
        self.records.iter().filter(move |r| r.industry_slug == slug)
    }

    pub fn find(&self, record_id: &str) -> Option<&CalculationRecord> {
        self.records.iter().find(|r| r.id == record_id)
    }

    /// Toggle the benchmark flag on a record and clear it on every other record
    /// of the same industry. Returns the record's new flag, or `None` when no
    /// record has that id.
    pub fn set_benchmark(&mut self, record_id: &str) -> Option<bool> {
        let (slug, now_set) = {
            let target = self.records.iter().find(|r| r.id == record_id)?;
            (target.industry_slug.clone(), !target.is_benchmark)
        };
        for r in self.records.iter_mut().filter(|r| r.industry_slug == slug) {
            r.is_benchmark = r.id == record_id && now_set;
        }
        self.persist();
        Some(now_set)
    }

    pub fn benchmark(&self, slug: &str) -> Option<&CalculationRecord> {
        self.records
            .iter()
            .find(|r| r.industry_slug == slug && r.is_benchmark)
    }

    /// Statistics over the industry's productivity-mode results.
    pub fn stats(&self, slug: &str) -> Option<HistoryStats> {
        let results: Vec<f64> = self
            .industry_history(slug)
            .filter(|r| r.mode == CalculationMode::Productivity)
            .map(|r| r.result)
            .collect();
        metrics::compute_stats(&results)
    }

    fn persist(&self) {
        let text = match serde_json::to_string(&self.records) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to serialize calculation history: {e}");
                return;
            }
        };
        if let Err(e) = self.store.write(STORAGE_KEY, &text) {
            log::warn!("Failed to save calculation history: {e:#}");
        }
    }
}

/// Random 128-bit id as 32 hex characters.
fn gen_record_id() -> String {
    let mut b = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut b);
    b.iter().map(|x| format!("{x:02x}")).collect()
}

/// Current time as epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
