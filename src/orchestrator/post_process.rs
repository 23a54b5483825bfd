//! Post-calculation processing.
//!
//! Gathers tier, benchmark comparison and refreshed statistics after a
//! calculation is recorded.

use super::controller::CompletedCalculation;
use crate::history::HistoryStore;
use crate::metrics;
use crate::model::{CalculationRecord, HistoryStats, Tier};
use crate::storage::KvStore;
use serde::Serialize;

/// Result of post-calculation processing, ready for presentation layers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProcessedCalculation {
    pub record: CalculationRecord,
    pub tier: Option<Tier>,
    /// Percentage difference from the industry's benchmark record.
    pub vs_benchmark_pct: Option<f64>,
    pub stats: Option<HistoryStats>,
}

pub(crate) fn process_calculation<S: KvStore>(
    history: &HistoryStore<S>,
    done: CompletedCalculation,
) -> ProcessedCalculation {
    let slug = done.record.industry_slug.as_str();
    let vs_benchmark_pct = history
        .benchmark(slug)
        .filter(|b| b.id != done.record.id && b.mode == done.record.mode)
        .and_then(|b| metrics::percent_vs_benchmark(done.record.result, b.result));

    ProcessedCalculation {
        stats: history.stats(slug),
        tier: done.calculation.tier,
        vs_benchmark_pct,
        record: done.record,
    }
}
