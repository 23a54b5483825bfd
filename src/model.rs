use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Resolved runtime configuration, built from CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcConfig {
    pub data_dir: PathBuf,
    #[serde(with = "humantime_serde")]
    pub reveal_delay: Duration,
    #[serde(default)]
    pub industries_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// output / input
    Productivity,
    /// productivity target * input
    Output,
    /// output / productivity target
    Input,
}

impl CalculationMode {
    /// Whether this mode divides or multiplies by the raw input field,
    /// and therefore honours the break deduction.
    pub fn uses_input_field(self) -> bool {
        matches!(self, CalculationMode::Productivity | CalculationMode::Output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    BelowAverage,
    Average,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputField {
    pub label: String,
    pub unit: String,
    #[serde(default)]
    pub placeholder: String,
}

/// Ascending thresholds on the productivity result domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkThresholds {
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryProfile {
    pub slug: String,
    pub name: String,
    pub output: InputField,
    pub input: InputField,
    pub result_label: String,
    pub result_unit: String,
    #[serde(default)]
    pub benchmark: Option<BenchmarkThresholds>,
}

/// User-entered values, still unparsed.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub output: Option<String>,
    pub input: Option<String>,
    pub productivity: Option<String>,
}

/// Numeric inputs used by a calculation; unused or unparseable fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordValues {
    pub output: f64,
    pub input: f64,
    pub productivity: f64,
}

/// A record before the history store assigns it an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub industry_slug: String,
    pub mode: CalculationMode,
    pub values: RecordValues,
    pub break_minutes: Option<f64>,
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: String,
    pub industry_slug: String,
    pub mode: CalculationMode,
    pub values: RecordValues,
    #[serde(default)]
    pub break_minutes: Option<f64>,
    pub result: f64,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub is_benchmark: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    pub count: usize,
    pub trend: Option<Trend>,
}
