//! Read-only views derived from printer histories. Nothing here mutates
//! core state.

use serde::Serialize;

use crate::printer::{LogEntry, Printer, PrinterStatus};

/// Started-run count for one printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilizationEntry {
    pub printer: String,
    pub starts: usize,
}

/// Number of runs a history records. Rejections and ignored starts carry
/// different event prefixes and are not counted.
pub fn start_count(history: &[LogEntry]) -> usize {
    history
        .iter()
        .filter(|entry| entry.event.starts_with("START"))
        .count()
}

pub fn utilization(printers: &[Box<dyn Printer>]) -> Vec<UtilizationEntry> {
    printers
        .iter()
        .map(|printer| UtilizationEntry {
            printer: printer.name().to_string(),
            starts: start_count(&printer.history()),
        })
        .collect()
}

pub fn statuses(printers: &[Box<dyn Printer>]) -> Vec<PrinterStatus> {
    printers.iter().map(|printer| printer.status()).collect()
}
