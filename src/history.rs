//! Append-only analysis history.
//!
//! Owned by the orchestration layer, never by the extractors. Lifecycle is
//! process start to process end: entries accumulate in memory and are
//! dropped on exit. Append and iteration only: no mutation, no removal.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::DataKind;

/// One completed analysis.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: DataKind,
    pub original_file: Option<String>,
    pub modified_file: Option<String>,
    pub user_query: String,
    /// Extracted feature summary (peaks, surface areas, TGA values).
    pub features: serde_json::Value,
    /// Generated suggestion, when one was requested.
    pub suggestion: Option<String>,
}

impl HistoryEntry {
    /// A new entry stamped with the current time.
    pub fn new(kind: DataKind, features: serde_json::Value) -> Self {
        HistoryEntry {
            timestamp: Utc::now(),
            kind,
            original_file: None,
            modified_file: None,
            user_query: String::new(),
            features,
            suggestion: None,
        }
    }
}

/// The append-only store.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries for one data kind, oldest first.
    pub fn for_kind(&self, kind: DataKind) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
