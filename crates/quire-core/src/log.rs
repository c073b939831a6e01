//! Log viewer
//!
//! Bounded, append-only message list the UI shows to the user. Every entry
//! is mirrored to `tracing`.

use chrono::{DateTime, Local};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

use quire_export::{LogLevel, LogSink};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// `HH:MM:SS - message`
    pub fn display(&self) -> String {
        format!("{} - {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

pub struct LogViewer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogViewer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity.min(64)))),
            capacity,
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn last(&self) -> Option<LogEntry> {
        self.entries.read().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        tracing::debug!("Logs cleared");
    }
}

impl LogSink for LogViewer {
    fn log(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Info => tracing::info!(target: "quire::log", "{}", message),
            LogLevel::Warning => tracing::warn!(target: "quire::log", "{}", message),
            LogLevel::Error => tracing::error!(target: "quire::log", "{}", message),
        }

        let mut entries = self.entries.write();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: Local::now(),
            level,
            message: message.to_string(),
        });
    }
}

impl Clone for LogViewer {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            capacity: self.capacity,
        }
    }
}
