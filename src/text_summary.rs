//! Text summary builder for CLI output.
//!
//! This module turns plain calculation data into human-readable lines. Labels
//! for modes, tiers and trends live here, not in the core.

use crate::model::{
    CalculationMode, CalculationRecord, HistoryStats, IndustryProfile, Tier, Trend,
};
use crate::orchestrator::ProcessedCalculation;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

pub(crate) fn mode_label(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::Productivity => "Productivity",
        CalculationMode::Output => "Output",
        CalculationMode::Input => "Input",
    }
}

pub(crate) fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::BelowAverage => "Below average",
        Tier::Average => "Average",
        Tier::Good => "Good",
        Tier::Excellent => "Excellent",
    }
}

pub(crate) fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "up",
        Trend::Down => "down",
        Trend::Stable => "stable",
    }
}

/// Format with at most two fraction digits and thousands separators.
pub(crate) fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return "-".to_string();
    }
    let rounded = match (v * 100.0).round() / 100.0 {
        r if r.is_finite() => r,
        _ => v,
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Render a record's age: `just now`, `Nm ago`, `Nh ago`, else its date.
pub(crate) fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff_mins = now_ms.saturating_sub(timestamp_ms).div_euclid(60_000);
    if diff_mins < 1 {
        return "just now".to_string();
    }
    if diff_mins < 60 {
        return format!("{diff_mins}m ago");
    }
    let diff_hours = diff_mins / 60;
    if diff_hours < 24 {
        return format!("{diff_hours}h ago");
    }
    format_date(timestamp_ms)
}

fn format_date(timestamp_ms: i64) -> String {
    let nanos = i128::from(timestamp_ms) * 1_000_000;
    let Ok(utc) = time::OffsetDateTime::from_unix_timestamp_nanos(nanos) else {
        return "-".to_string();
    };
    let local = time::UtcOffset::current_local_offset()
        .map(|offset| utc.to_offset(offset))
        .unwrap_or(utc);
    local
        .format(time::macros::format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "-".into())
}

fn result_unit<'a>(profile: &'a IndustryProfile, mode: CalculationMode) -> &'a str {
    match mode {
        CalculationMode::Productivity => &profile.result_unit,
        CalculationMode::Output => &profile.output.unit,
        CalculationMode::Input => &profile.input.unit,
    }
}

fn stats_line(stats: &HistoryStats, unit: &str) -> String {
    let trend = stats.trend.map(trend_label).unwrap_or("-");
    format!(
        "Stats ({} runs): max {} min {} avg {} {unit}, trend {trend}",
        stats.count,
        format_number(stats.max),
        format_number(stats.min),
        format_number(stats.avg),
    )
}

pub(crate) fn build_calculation_summary(
    profile: &IndustryProfile,
    processed: &ProcessedCalculation,
) -> TextSummary {
    let mut lines = Vec::new();
    let record = &processed.record;
    let label = match record.mode {
        CalculationMode::Productivity => profile.result_label.as_str(),
        CalculationMode::Output => profile.output.label.as_str(),
        CalculationMode::Input => profile.input.label.as_str(),
    };
    lines.push(format!(
        "{}: {} {}",
        label,
        format_number(record.result),
        result_unit(profile, record.mode)
    ));
    if let Some(minutes) = record.break_minutes.filter(|m| *m > 0.0) {
        lines.push(format!("Break deducted: {} min", format_number(minutes)));
    }
    if let Some(tier) = processed.tier {
        lines.push(format!("Tier: {}", tier_label(tier)));
    }
    if let Some(pct) = processed.vs_benchmark_pct {
        let sign = if pct > 0.0 { "+" } else { "" };
        lines.push(format!("vs benchmark: {sign}{}%", format_number(pct)));
    }
    if let Some(stats) = processed.stats.as_ref() {
        lines.push(stats_line(stats, &profile.result_unit));
    }
    lines.push(format!("Record: {}", record.id));
    TextSummary { lines }
}

pub(crate) fn build_history_summary(
    profile: &IndustryProfile,
    records: &[&CalculationRecord],
    now_ms: i64,
) -> TextSummary {
    let mut lines = Vec::new();
    if records.is_empty() {
        lines.push(format!("No calculations recorded for {}", profile.name));
        return TextSummary { lines };
    }
    lines.push(format!("Recent calculations: {}", profile.name));
    for r in records {
        let marker = if r.is_benchmark { "*" } else { " " };
        lines.push(format!(
            "{marker} {:<12} {:>12} {:<14} {:>10}  {}",
            mode_label(r.mode),
            format_number(r.result),
            result_unit(profile, r.mode),
            relative_time(r.timestamp, now_ms),
            r.id
        ));
    }
    TextSummary { lines }
}

pub(crate) fn build_stats_summary(
    profile: &IndustryProfile,
    stats: Option<&HistoryStats>,
    benchmark: Option<&CalculationRecord>,
) -> TextSummary {
    let mut lines = Vec::new();
    match stats {
        Some(s) => lines.push(stats_line(s, &profile.result_unit)),
        None => lines.push(format!("No productivity calculations for {}", profile.name)),
    }
    if let Some(b) = benchmark {
        lines.push(format!(
            "Benchmark: {} {} ({})",
            format_number(b.result),
            result_unit(profile, b.mode),
            b.id
        ));
    }
    TextSummary { lines }
}

pub(crate) fn build_industry_list(profiles: &[IndustryProfile]) -> TextSummary {
    let lines = profiles
        .iter()
        .map(|p| {
            let bench = p
                .benchmark
                .map(|b| {
                    format!(
                        "avg {} / good {} / excellent {}",
                        format_number(b.average),
                        format_number(b.good),
                        format_number(b.excellent)
                    )
                })
                .unwrap_or_else(|| "no benchmark".to_string());
            format!("{:<22} {:<26} {:<18} {bench}", p.slug, p.name, p.result_unit)
        })
        .collect();
    TextSummary { lines }
}
