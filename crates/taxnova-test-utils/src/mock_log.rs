// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory interaction log.

use std::sync::Mutex;

use taxnova_core::{InteractionLog, InteractionRecord};

#[derive(Debug, Default)]
pub struct RecordingLog {
    records: Mutex<Vec<InteractionRecord>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<InteractionRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl InteractionLog for RecordingLog {
    fn record(&self, record: &InteractionRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}
