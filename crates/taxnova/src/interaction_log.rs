// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only JSON Lines interaction log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use taxnova_core::{InteractionLog, InteractionRecord, TaxnovaError};
use taxnova_router::TracingInteractionLog;
use tracing::warn;

/// Writes one JSON object per completed exchange to a file, and also emits
/// the usual tracing event.
pub struct JsonlInteractionLog {
    path: PathBuf,
    file: Mutex<File>,
    events: TracingInteractionLog,
}

impl JsonlInteractionLog {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn open(path: &Path) -> Result<Self, TaxnovaError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TaxnovaError::Config(format!(
                    "cannot create interaction log directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                TaxnovaError::Config(format!(
                    "cannot open interaction log {}: {e}",
                    path.display()
                ))
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
            events: TracingInteractionLog,
        })
    }

    fn append(&self, record: &InteractionRecord) -> Result<(), String> {
        let mut line = serde_json::to_string(record).map_err(|e| e.to_string())?;
        line.push('\n');
        let mut file = self.file.lock().map_err(|_| "log file lock poisoned".to_string())?;
        file.write_all(line.as_bytes()).map_err(|e| e.to_string())
    }
}

impl InteractionLog for JsonlInteractionLog {
    fn record(&self, record: &InteractionRecord) {
        self.events.record(record);
        if let Err(error) = self.append(record) {
            warn!(path = %self.path.display(), error = %error, "failed to append interaction record");
        }
    }
}
