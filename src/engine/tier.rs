use crate::model::{BenchmarkThresholds, CalculationMode, Tier};

/// Classify a productivity result against an industry's thresholds.
pub fn classify(result: f64, thresholds: &BenchmarkThresholds) -> Tier {
    if result >= thresholds.excellent {
        Tier::Excellent
    } else if result >= thresholds.good {
        Tier::Good
    } else if result >= thresholds.average {
        Tier::Average
    } else {
        Tier::BelowAverage
    }
}

/// Tiers only exist for productivity results of industries with a benchmark.
pub fn tier_for(
    mode: CalculationMode,
    result: f64,
    thresholds: Option<&BenchmarkThresholds>,
) -> Option<Tier> {
    match (mode, thresholds) {
        (CalculationMode::Productivity, Some(t)) => Some(classify(result, t)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: BenchmarkThresholds = BenchmarkThresholds {
        average: 10.0,
        good: 20.0,
        excellent: 30.0,
    };

    #[test]
    fn boundaries_are_inclusive_from_below() {
        assert_eq!(classify(30.0, &T), Tier::Excellent);
        assert_eq!(classify(29.99, &T), Tier::Good);
        assert_eq!(classify(20.0, &T), Tier::Good);
        assert_eq!(classify(10.0, &T), Tier::Average);
        assert_eq!(classify(9.99, &T), Tier::BelowAverage);
    }

    #[test]
    fn no_tier_outside_productivity_mode() {
        assert_eq!(tier_for(CalculationMode::Output, 50.0, Some(&T)), None);
        assert_eq!(tier_for(CalculationMode::Input, 50.0, Some(&T)), None);
        assert_eq!(tier_for(CalculationMode::Productivity, 50.0, None), None);
        assert_eq!(
            tier_for(CalculationMode::Productivity, 50.0, Some(&T)),
            Some(Tier::Excellent)
        );
    }
}
