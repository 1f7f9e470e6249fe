//! JSONL file writer for scheduling decisions.
//!
//! Every [`DecisionEvent`] becomes one [`DecisionRecord`] line:
//!
//! ```text
//! {"seq":3,"type":"speaker_selected","timestamp":"...","turn":2,"speaker":"PM",...}
//! ```
//!
//! Object payloads are flattened into the record; any other payload is kept
//! under `data`. `seq` numbers the lines written by one logger, so gaps
//! reveal lost writes when several runs append to the same file.

use floor_application::ports::decision_logger::{DecisionEvent, DecisionLogger};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// One line of the decision log.
#[derive(Debug, Serialize)]
struct DecisionRecord<'a> {
    seq: u64,
    #[serde(rename = "type")]
    event_type: &'a str,
    timestamp: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'a> DecisionRecord<'a> {
    fn new(seq: u64, event: &'a DecisionEvent) -> Self {
        let fields = match &event.payload {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other.clone());
                map
            }
        };
        Self {
            seq,
            event_type: event.event_type,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            fields,
        }
    }
}

/// JSONL decision logger that appends one record per line.
///
/// Writes never fail the conversation. A failed write is counted and the
/// first one is logged; see [`JsonlDecisionLogger::failed_writes`].
pub struct JsonlDecisionLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    next_seq: AtomicU64,
    failed_writes: AtomicU64,
}

impl JsonlDecisionLogger {
    /// Open (or create) the log at `path` in append mode.
    ///
    /// Creates parent directories if needed. Returns `None` if the file
    /// cannot be opened; callers fall back to no decision logging.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create decision log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open decision log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            next_seq: AtomicU64::new(1),
            failed_writes: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records that could not be written.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    fn write_record(&self, record: &DecisionRecord<'_>) -> Result<(), String> {
        let line = serde_json::to_string(record).map_err(|e| e.to_string())?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| "writer lock poisoned".to_string())?;
        writeln!(writer, "{}", line).map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())
    }

    fn record_failure(&self, seq: u64, reason: &str) {
        let previous = self.failed_writes.fetch_add(1, Ordering::Relaxed);
        if previous == 0 {
            warn!(
                "Failed to write decision record {} to {}: {}",
                seq,
                self.path.display(),
                reason
            );
        }
    }
}

impl DecisionLogger for JsonlDecisionLogger {
    fn log(&self, event: DecisionEvent) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let record = DecisionRecord::new(seq, &event);
        if let Err(reason) = self.write_record(&record) {
            self.record_failure(seq, &reason);
        }
    }
}

impl Drop for JsonlDecisionLogger {
    fn drop(&mut self) {
        let flushed = match self.writer.get_mut() {
            Ok(writer) => writer.flush().is_ok(),
            Err(_) => false,
        };
        if !flushed {
            warn!("Could not flush decision log {}", self.path.display());
        }
    }
}
