mod input;
mod tier;

use tier::tier_for;

use crate::model::{CalculationMode, IndustryProfile, NewRecord, RawInputs, RecordValues, Tier};

/// Outcome of a successful calculation, ready to be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub mode: CalculationMode,
    pub values: RecordValues,
    pub break_minutes: Option<f64>,
    pub result: f64,
    pub tier: Option<Tier>,
}

impl Calculation {
    pub fn into_record(self, industry_slug: &str) -> NewRecord {
        NewRecord {
            industry_slug: industry_slug.to_string(),
            mode: self.mode,
            values: self.values,
            break_minutes: self.break_minutes,
            result: self.result,
        }
    }
}

/// Compute the result for `mode`. Returns `None` whenever the inputs do not
/// yield a finite number: unparseable text, a zero or negative divisor, or
/// overflow.
pub fn compute(mode: CalculationMode, raw: &RawInputs, break_minutes: Option<f64>) -> Option<f64> {
    let output = input::parse_value(raw.output.as_deref());
    let hours = input::parse_value(raw.input.as_deref());
    let target = input::parse_value(raw.productivity.as_deref());

    let result = match mode {
        CalculationMode::Productivity => {
            let effective = input::effective_input(hours, break_minutes);
            if !output.is_finite() || !effective.is_finite() || effective <= 0.0 {
                return None;
            }
            output / effective
        }
        CalculationMode::Output => {
            let effective = input::effective_input(hours, break_minutes);
            if !target.is_finite() || !effective.is_finite() {
                return None;
            }
            target * effective
        }
        CalculationMode::Input => {
            if !output.is_finite() || !target.is_finite() || target <= 0.0 {
                return None;
            }
            output / target
        }
    };

    result.is_finite().then_some(result)
}

/// Compute and classify a calculation for one industry.
pub fn evaluate(
    profile: &IndustryProfile,
    mode: CalculationMode,
    raw: &RawInputs,
    break_minutes: Option<f64>,
) -> Option<Calculation> {
    let result = compute(mode, raw, break_minutes)?;

    let output = input::parse_value(raw.output.as_deref());
    let hours = input::parse_value(raw.input.as_deref());
    let target = input::parse_value(raw.productivity.as_deref());
    let values = match mode {
        CalculationMode::Productivity => RecordValues {
            output: input::stored(output),
            input: input::stored(hours),
            productivity: 0.0,
        },
        CalculationMode::Output => RecordValues {
            output: 0.0,
            input: input::stored(hours),
            productivity: input::stored(target),
        },
        CalculationMode::Input => RecordValues {
            output: input::stored(output),
            input: 0.0,
            productivity: input::stored(target),
        },
    };
    let break_minutes = if mode.uses_input_field() {
        input::sanitize_break(break_minutes)
    } else {
        None
    };

    Some(Calculation {
        mode,
        values,
        break_minutes,
        result,
        tier: tier_for(mode, result, profile.benchmark.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BenchmarkThresholds, InputField};

    fn raw(output: Option<&str>, input: Option<&str>, productivity: Option<&str>) -> RawInputs {
        RawInputs {
            output: output.map(String::from),
            input: input.map(String::from),
            productivity: productivity.map(String::from),
        }
    }

    fn profile(benchmark: Option<BenchmarkThresholds>) -> IndustryProfile {
        let field = |label: &str| InputField {
            label: label.to_string(),
            unit: "u".to_string(),
            placeholder: String::new(),
        };
        IndustryProfile {
            slug: "test".into(),
            name: "Test".into(),
            output: field("Output"),
            input: field("Hours"),
            result_label: "Rate".into(),
            result_unit: "u/h".into(),
            benchmark,
        }
    }

    #[test]
    fn productivity_is_output_over_input() {
        for (o, i) in [(100.0, 4.0), (-12.5, 0.5), (0.0, 3.0), (1e6, 7.0)] {
            let r = compute(
                CalculationMode::Productivity,
                &raw(Some(&o.to_string()), Some(&i.to_string()), None),
                None,
            );
            assert_eq!(r, Some(o / i));
        }
    }

    #[test]
    fn zero_input_gives_no_result() {
        let r = compute(CalculationMode::Productivity, &raw(Some("10"), Some("0"), None), None);
        assert_eq!(r, None);
    }

    #[test]
    fn non_numeric_gives_no_result() {
        let r = compute(CalculationMode::Productivity, &raw(Some("ten"), Some("2"), None), None);
        assert_eq!(r, None);
        let r = compute(CalculationMode::Productivity, &raw(Some("10"), None, None), None);
        assert_eq!(r, None);
    }

    #[test]
    fn break_time_reduces_effective_input() {
        let r = compute(
            CalculationMode::Productivity,
            &raw(Some("100"), Some("2"), None),
            Some(30.0),
        )
        .unwrap();
        assert!((r - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn break_consuming_all_hours_gives_no_result() {
        let r = compute(
            CalculationMode::Productivity,
            &raw(Some("100"), Some("1"), None),
            Some(90.0),
        );
        assert_eq!(r, None);
    }

    #[test]
    fn output_mode_projects_forward() {
        let r = compute(CalculationMode::Output, &raw(None, Some("4"), Some("5")), None);
        assert_eq!(r, Some(20.0));
        // zero and negative targets are allowed
        let r = compute(CalculationMode::Output, &raw(None, Some("4"), Some("-2")), None);
        assert_eq!(r, Some(-8.0));
        let r = compute(CalculationMode::Output, &raw(None, Some("4"), Some("5")), Some(60.0));
        assert_eq!(r, Some(15.0));
    }

    #[test]
    fn input_mode_divides_by_target() {
        let r = compute(CalculationMode::Input, &raw(Some("20"), None, Some("5")), None);
        assert_eq!(r, Some(4.0));
        let r = compute(CalculationMode::Input, &raw(Some("20"), None, Some("0")), None);
        assert_eq!(r, None);
        let r = compute(CalculationMode::Input, &raw(Some("20"), None, Some("-1")), None);
        assert_eq!(r, None);
    }

    #[test]
    fn input_mode_ignores_break() {
        let r = compute(CalculationMode::Input, &raw(Some("20"), Some("9"), Some("5")), Some(30.0));
        assert_eq!(r, Some(4.0));
    }

    #[test]
    fn output_then_input_recovers_hours() {
        for (p, i) in [(5.0, 4.0), (0.3, 0.0), (12.75, 38.5), (1e-3, 1e4)] {
            let out = compute(
                CalculationMode::Output,
                &raw(None, Some(&i.to_string()), Some(&p.to_string())),
                None,
            )
            .unwrap();
            let back = compute(
                CalculationMode::Input,
                &raw(Some(&out.to_string()), None, Some(&p.to_string())),
                None,
            )
            .unwrap();
            assert!((back - i).abs() <= 1e-9 * i.max(1.0), "p={p} i={i} back={back}");
        }
    }

    #[test]
    fn overflow_gives_no_result() {
        let r = compute(CalculationMode::Output, &raw(None, Some("1e308"), Some("1e308")), None);
        assert_eq!(r, None);
    }

    #[test]
    fn evaluate_zero_fills_unused_values_and_tiers() {
        let p = profile(Some(BenchmarkThresholds {
            average: 10.0,
            good: 20.0,
            excellent: 30.0,
        }));
        let calc = evaluate(
            &p,
            CalculationMode::Productivity,
            &raw(Some("50"), Some("2"), Some("99")),
            Some(0.0),
        )
        .unwrap();
        assert_eq!(calc.result, 25.0);
        assert_eq!(calc.tier, Some(Tier::Good));
        assert_eq!(
            calc.values,
            RecordValues {
                output: 50.0,
                input: 2.0,
                productivity: 0.0
            }
        );

        let calc = evaluate(&p, CalculationMode::Input, &raw(Some("50"), None, Some("5")), Some(10.0))
            .unwrap();
        assert_eq!(calc.tier, None);
        assert_eq!(calc.break_minutes, None);
        assert_eq!(calc.values.input, 0.0);
    }

    #[test]
    fn evaluate_without_benchmark_has_no_tier() {
        let calc = evaluate(
            &profile(None),
            CalculationMode::Productivity,
            &raw(Some("50"), Some("2"), None),
            None,
        )
        .unwrap();
        assert_eq!(calc.tier, None);
    }
}
