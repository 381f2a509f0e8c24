use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single history entry: when it happened and what happened.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub event: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.at.format("%Y-%m-%dT%H:%M:%S"), self.event)
    }
}

/// Append-only per-printer event history. Insertion order is preserved;
/// entries are never rewritten or removed.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn record(&mut self, event: impl Into<String>) {
        self.entries.push(LogEntry {
            at: Utc::now(),
            event: event.into(),
        });
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Read-only snapshot for reporting collaborators.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
