//! Logging configuration.
//!
//! Logs go to stderr and to `<data_dir>/logs/productivity-calc.log`. The
//! terminal only shows warnings unless `--verbose` is given; the file keeps
//! debug output.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "productivity-calc.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

pub fn log_directory(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

pub fn log_file_path(data_dir: &Path) -> PathBuf {
    log_directory(data_dir).join(LOG_FILE_NAME)
}

fn term_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Initialize terminal and file logging. Returns the log file path when file
/// logging is active.
pub fn init_logging(data_dir: &Path, verbose: bool) -> Option<PathBuf> {
    let log_dir = log_directory(data_dir);
    if let Err(e) = fs::create_dir_all(&log_dir) {
        init_terminal_only(verbose);
        log::warn!("Could not create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let log_path = log_file_path(data_dir);

    if let Ok(metadata) = fs::metadata(&log_path) {
        if metadata.len() > MAX_LOG_BYTES {
            let _ = fs::rename(&log_path, log_dir.join(format!("{LOG_FILE_NAME}.old")));
        }
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            init_terminal_only(verbose);
            log::warn!("Could not open log file {}: {}", log_path.display(), e);
            return None;
        }
    };

    let config = build_config();
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            term_level(verbose),
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    log::debug!("Log file: {}", log_path.display());
    Some(log_path)
}

fn init_terminal_only(verbose: bool) {
    let term_logger = TermLogger::new(
        term_level(verbose),
        build_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    let _ = CombinedLogger::init(vec![term_logger]);
}
