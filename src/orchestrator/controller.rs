//! Calculation lifecycle: compute, pause for the reveal, record.

use crate::engine::{self, Calculation};
use crate::history::HistoryStore;
use crate::model::{CalculationMode, CalculationRecord, IndustryProfile, RawInputs};
use crate::storage::KvStore;
use std::future::Future;
use std::time::Duration;

/// Cosmetic pause between triggering a calculation and revealing it.
pub(crate) trait RevealDelay {
    fn wait(&self) -> impl Future<Output = ()>;
}

/// Sleeps for a fixed duration on the tokio timer.
pub(crate) struct SleepDelay(pub Duration);

impl RevealDelay for SleepDelay {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

#[cfg(test)]
pub(crate) struct NoDelay;

#[cfg(test)]
impl RevealDelay for NoDelay {
    async fn wait(&self) {}
}

/// One calculation request as collected from the user.
#[derive(Debug, Clone)]
pub(crate) struct CalcRequest {
    pub mode: CalculationMode,
    pub raw: RawInputs,
    pub break_minutes: Option<f64>,
}

/// Result of a successful run: the stored record plus its engine outcome.
#[derive(Debug, Clone)]
pub(crate) struct CompletedCalculation {
    pub record: CalculationRecord,
    pub calculation: Calculation,
}

/// Compute a request and, when it yields a result, wait out the reveal delay
/// and append it to history. Invalid inputs return `None` immediately and
/// leave history untouched.
pub(crate) async fn run_calculation<S: KvStore, D: RevealDelay>(
    profile: &IndustryProfile,
    request: &CalcRequest,
    history: &mut HistoryStore<S>,
    delay: &D,
) -> Option<CompletedCalculation> {
    let Some(calculation) = engine::evaluate(
        profile,
        request.mode,
        &request.raw,
        request.break_minutes,
    ) else {
        log::debug!(
            "No result for {} in {:?} mode",
            profile.slug,
            request.mode
        );
        return None;
    };

    delay.wait().await;

    let record = history.add_record(calculation.clone().into_record(&profile.slug));
    log::info!(
        "Recorded {:?} calculation {} for {}: {}",
        record.mode,
        record.id,
        record.industry_slug,
        record.result
    );
    Some(CompletedCalculation {
        record,
        calculation,
    })
}
