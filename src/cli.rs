use crate::history::HistoryStore;
use crate::industries::Catalogue;
use crate::model::{CalcConfig, CalculationMode, CalculationRecord, RawInputs};
use crate::orchestrator::{self, CalcRequest, SleepDelay};
use crate::storage::{self, FileStore};
use crate::text_summary::{self, TextSummary};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "productivity-calc",
    version,
    about = "Industry productivity calculator with local calculation history"
)]
pub struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding calculation history and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Load industry profiles from a JSON file instead of the built-in catalogue
    #[arg(long, global = true)]
    pub industries: Option<PathBuf>,

    /// Pause before revealing a calculation result
    #[arg(long, global = true, default_value = "300ms")]
    pub reveal_delay: humantime::Duration,

    /// Show debug logging on the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List the available industry profiles
    Industries,
    /// Run a calculation and record it in history
    Calc(CalcArgs),
    /// Show recent calculations for an industry, newest first
    History {
        slug: String,
        /// Maximum number of records to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Show productivity statistics for an industry
    Stats { slug: String },
    /// Toggle the benchmark flag on a recorded calculation
    Benchmark { id: String },
    /// Delete all recorded calculations
    Clear,
    /// Export recorded calculations
    Export {
        /// Write history as JSON
        #[arg(long)]
        export_json: Option<PathBuf>,
        /// Write history as CSV
        #[arg(long)]
        export_csv: Option<PathBuf>,
        /// Only export one industry
        #[arg(long)]
        industry: Option<String>,
    },
}

#[derive(Debug, Args, Clone)]
pub struct CalcArgs {
    /// Industry slug
    pub slug: String,

    /// What to derive
    #[arg(long, value_enum, default_value_t = ModeArg::Productivity)]
    pub mode: ModeArg,

    /// Output quantity
    #[arg(long, allow_hyphen_values = true)]
    pub output: Option<String>,

    /// Input hours
    #[arg(long, allow_hyphen_values = true)]
    pub input: Option<String>,

    /// Productivity target (output per input hour)
    #[arg(long, allow_hyphen_values = true)]
    pub productivity: Option<String>,

    /// Break minutes deducted from input hours
    #[arg(long)]
    pub break_minutes: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Productivity,
    Output,
    Input,
}

impl From<ModeArg> for CalculationMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Productivity => CalculationMode::Productivity,
            ModeArg::Output => CalculationMode::Output,
            ModeArg::Input => CalculationMode::Input,
        }
    }
}

/// Build a `CalcConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> CalcConfig {
    CalcConfig {
        data_dir: args
            .data_dir
            .clone()
            .unwrap_or_else(storage::default_data_dir),
        reveal_delay: Duration::from(args.reveal_delay),
        industries_path: args.industries.clone(),
    }
}

pub async fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    crate::logging::init_logging(&cfg.data_dir, args.verbose);

    let catalogue = Catalogue::load(cfg.industries_path.as_deref())?;
    let mut history = HistoryStore::load(FileStore::new(&cfg.data_dir));

    let (out_tx, out_handle) = spawn_output_writer();
    let res = dispatch(&args, &cfg, &catalogue, &mut history, &out_tx).await;
    drop(out_tx);
    let _ = out_handle.await;
    res
}

async fn dispatch(
    args: &Cli,
    cfg: &CalcConfig,
    catalogue: &Catalogue,
    history: &mut HistoryStore<FileStore>,
    out: &mpsc::UnboundedSender<OutputLine>,
) -> Result<()> {
    match &args.command {
        Command::Industries => {
            if args.json {
                emit_json(out, catalogue.profiles())?;
            } else {
                emit_text(out, text_summary::build_industry_list(catalogue.profiles()));
            }
        }
        Command::Calc(calc) => {
            let profile = catalogue.require(&calc.slug)?;
            let request = CalcRequest {
                mode: calc.mode.into(),
                raw: RawInputs {
                    output: calc.output.clone(),
                    input: calc.input.clone(),
                    productivity: calc.productivity.clone(),
                },
                break_minutes: calc.break_minutes,
            };
            let delay = SleepDelay(cfg.reveal_delay);
            match orchestrator::run_calculation(profile, &request, history, &delay).await {
                Some(done) => {
                    let processed = orchestrator::process_calculation(history, done);
                    if args.json {
                        emit_json(out, &processed)?;
                    } else {
                        emit_text(
                            out,
                            text_summary::build_calculation_summary(profile, &processed),
                        );
                    }
                }
                None => {
                    if args.json {
                        emit_json(out, &serde_json::Value::Null)?;
                    } else {
                        let _ = out.send(OutputLine::Stderr(
                            "No result: check that the values are numbers and the divisor is above zero"
                                .into(),
                        ));
                    }
                }
            }
        }
        Command::History { slug, limit } => {
            let profile = catalogue.require(slug)?;
            let records: Vec<&CalculationRecord> =
                history.industry_history(slug).take(*limit).collect();
            if args.json {
                emit_json(out, &records)?;
            } else {
                let now = crate::history::now_millis();
                emit_text(
                    out,
                    text_summary::build_history_summary(profile, &records, now),
                );
            }
        }
        Command::Stats { slug } => {
            let profile = catalogue.require(slug)?;
            let stats = history.stats(slug);
            let benchmark = history.benchmark(slug);
            if args.json {
                #[derive(Serialize)]
                struct StatsOutput<'a> {
                    stats: Option<crate::model::HistoryStats>,
                    benchmark: Option<&'a CalculationRecord>,
                }
                emit_json(out, &StatsOutput { stats, benchmark })?;
            } else {
                emit_text(
                    out,
                    text_summary::build_stats_summary(profile, stats.as_ref(), benchmark),
                );
            }
        }
        Command::Benchmark { id } => {
            let now_set = history
                .set_benchmark(id)
                .ok_or_else(|| anyhow::anyhow!("no calculation with id {id}"))?;
            if args.json {
                emit_json(out, &serde_json::json!({ "id": id, "isBenchmark": now_set }))?;
            } else if now_set {
                let result = history
                    .find(id)
                    .map(|r| text_summary::format_number(r.result))
                    .unwrap_or_default();
                let _ = out.send(OutputLine::Stdout(format!("Benchmark set: {id} ({result})")));
            } else {
                let _ = out.send(OutputLine::Stdout(format!("Benchmark cleared: {id}")));
            }
        }
        Command::Clear => {
            let cleared = history.records().len();
            history.clear_history();
            if args.json {
                emit_json(out, &serde_json::json!({ "cleared": cleared }))?;
            } else {
                let _ = out.send(OutputLine::Stdout(format!("Cleared {cleared} calculations")));
            }
        }
        Command::Export {
            export_json,
            export_csv,
            industry,
        } => {
            if export_json.is_none() && export_csv.is_none() {
                anyhow::bail!("nothing to export: pass --export-json and/or --export-csv");
            }
            let records: Vec<CalculationRecord> = match industry {
                Some(slug) => {
                    catalogue.require(slug)?;
                    history.industry_history(slug).cloned().collect()
                }
                None => history.records().to_vec(),
            };
            if let Some(p) = export_json.as_deref() {
                storage::export_json(p, &records).context("export JSON")?;
                let _ = out.send(OutputLine::Stderr(format!("Exported JSON: {}", p.display())));
            }
            if let Some(p) = export_csv.as_deref() {
                storage::export_csv(p, &records).context("export CSV")?;
                let _ = out.send(OutputLine::Stderr(format!("Exported CSV: {}", p.display())));
            }
        }
    }
    Ok(())
}

fn emit_json<T: Serialize + ?Sized>(
    out: &mpsc::UnboundedSender<OutputLine>,
    value: &T,
) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let _ = out.send(OutputLine::Stdout(text));
    Ok(())
}

fn emit_text(out: &mpsc::UnboundedSender<OutputLine>, summary: TextSummary) {
    for line in summary.lines {
        let _ = out.send(OutputLine::Stdout(line));
    }
}
