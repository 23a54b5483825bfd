use crate::model::{HistoryStats, Trend};

/// Relative change needed before a trend counts as up or down.
const TREND_TOLERANCE: f64 = 0.01;

/// Compute max/min/avg/count and trend over results ordered newest first.
pub fn compute_stats(results: &[f64]) -> Option<HistoryStats> {
    if results.is_empty() {
        return None;
    }
    let max = results.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = results.iter().copied().fold(f64::INFINITY, f64::min);
    let avg = results.iter().sum::<f64>() / results.len() as f64;
    let trend = match results {
        [newest, previous, ..] => Some(compute_trend(*newest, *previous)),
        _ => None,
    };
    Some(HistoryStats {
        max,
        min,
        avg,
        count: results.len(),
        trend,
    })
}

/// Compare the newest result to the one before it.
pub fn compute_trend(newest: f64, previous: f64) -> Trend {
    if newest > previous * (1.0 + TREND_TOLERANCE) {
        Trend::Up
    } else if newest < previous * (1.0 - TREND_TOLERANCE) {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Percentage difference of `result` relative to a benchmark result.
pub fn percent_vs_benchmark(result: f64, benchmark: f64) -> Option<f64> {
    if benchmark == 0.0 || !benchmark.is_finite() {
        return None;
    }
    let pct = (result - benchmark) / benchmark.abs() * 100.0;
    pct.is_finite().then_some(pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_over_three_results() {
        let s = compute_stats(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(s.max, 30.0);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.avg, 20.0);
        assert_eq!(s.count, 3);
        assert_eq!(s.trend, Some(Trend::Down));
    }

    #[test]
    fn single_result_has_no_trend() {
        let s = compute_stats(&[42.0]).unwrap();
        assert_eq!(s.trend, None);
        assert_eq!(s.count, 1);
        assert!(compute_stats(&[]).is_none());
    }

    #[test]
    fn small_changes_are_stable() {
        assert_eq!(compute_trend(100.5, 100.0), Trend::Stable);
        assert_eq!(compute_trend(99.5, 100.0), Trend::Stable);
        assert_eq!(compute_trend(101.5, 100.0), Trend::Up);
        assert_eq!(compute_trend(98.5, 100.0), Trend::Down);
    }

    #[test]
    fn benchmark_percentage() {
        assert_eq!(percent_vs_benchmark(120.0, 100.0), Some(20.0));
        assert_eq!(percent_vs_benchmark(50.0, 100.0), Some(-50.0));
        assert_eq!(percent_vs_benchmark(50.0, 0.0), None);
    }
}
