//! JSONL run journal and QA dumps.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use common::HistogramRegistry;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Appends one JSON event per line to `hf-<run_id>.jsonl` in the output dir.
///
/// Every event carries `ts`, `kind` and the `run_id` of this process.
pub struct RunJournal {
    dir: PathBuf,
    run_id: Uuid,
    file: File,
}

impl RunJournal {
    pub fn open(dir: PathBuf) -> std::io::Result<Self> {
        create_dir_all(&dir)?;
        let run_id = Uuid::new_v4();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(Self::journal_path(&dir, run_id))?;
        Ok(Self { dir, run_id, file })
    }

    fn journal_path(dir: &Path, run_id: Uuid) -> PathBuf {
        dir.join(format!("hf-{}.jsonl", run_id))
    }

    fn envelope(&self, kind: &str, body: Value) -> Value {
        let mut event = json!({
            "ts": now_iso(),
            "kind": kind,
            "run_id": self.run_id.to_string(),
        });
        if let (Some(event), Value::Object(fields)) = (event.as_object_mut(), body) {
            for (key, value) in fields {
                event.entry(key).or_insert(value);
            }
        }
        event
    }

    /// Write a serializable record as a `kind` event.
    pub fn write_record<T: Serialize>(&mut self, kind: &str, record: &T) {
        match serde_json::to_value(record) {
            Ok(body) => self.write_event(kind, body),
            Err(e) => tracing::warn!("journal: cannot serialize {} record: {}", kind, e),
        }
    }

    pub fn write_event(&mut self, kind: &str, body: Value) {
        let event = self.envelope(kind, body);
        let write_result = (|| -> std::io::Result<()> {
            let line = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
            writeln!(self.file, "{}", line)?;
            self.file.flush()?;
            Ok(())
        })();

        if let Err(e) = write_result {
            tracing::warn!("Run journal write failed: {}", e);
        }
    }

    /// Dump a QA registry to `qa-<task>-<run_id>.json`.
    pub fn write_qa(&self, task: &str, registry: &HistogramRegistry) -> common::Result<PathBuf> {
        let path = self.dir.join(format!("qa-{}-{}.json", task, self.run_id));
        let mut writer = std::io::BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, registry)?;
        writer.flush()?;
        Ok(path)
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn path(&self) -> PathBuf {
        Self::journal_path(&self.dir, self.run_id)
    }
}
