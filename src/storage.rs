//! Key-value persistence and export helpers.
//!
//! History lives in a single named slot. On disk each slot is one file,
//! `<data_dir>/<key>.json`; tests substitute [`MemoryStore`].

use crate::model::CalculationRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A string-valued key-value store.
pub trait KvStore {
    /// Read a slot. A slot that was never written is `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Default directory for history and logs.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("productivity-calc")
}

/// Directory-backed store: one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create {}", self.dir.display()))?;
        let path = self.slot_path(key);
        // Write to a sibling temp file first so a crash never leaves half a slot.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).with_context(|| format!("write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path).with_context(|| format!("rename to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;


pub fn export_json(path: &Path, records: &[CalculationRecord]) -> Result<()> {
    let out = serde_json::to_string_pretty(records)?;
    std::fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn export_csv(path: &Path, records: &[CalculationRecord]) -> Result<()> {
    std::fs::write(path, render_csv(records))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn render_csv(records: &[CalculationRecord]) -> String {
    let mut out = String::from(
        "id,industry_slug,mode,output,input,productivity,break_minutes,result,timestamp_ms,is_benchmark\n",
    );
    for r in records {
        let mode = match r.mode {
            crate::model::CalculationMode::Productivity => "productivity",
            crate::model::CalculationMode::Output => "output",
            crate::model::CalculationMode::Input => "input",
        };
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            csv_field(&r.id),
            csv_field(&r.industry_slug),
            mode,
            r.values.output,
            r.values.input,
            r.values.productivity,
            r.break_minutes.map(|m| m.to_string()).unwrap_or_default(),
            r.result,
            r.timestamp,
            r.is_benchmark,
        ));
    }
    out
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
