use std::collections::VecDeque;

use crate::config::FarmConfig;
use crate::error::{FarmError, Result};
use crate::printer::{Admission, PrintJob, Printer, PrinterStatus};
use crate::report::{self, UtilizationEntry};

/// What a dispatch pass did with the pending pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub placed: usize,
    pub rejected: usize,
}

/// Owns a fleet of printers and a shared pending-job pool, and places
/// pending jobs onto the least-loaded printer.
pub struct PrinterFarm {
    name: String,
    printers: Vec<Box<dyn Printer>>,
    pending: VecDeque<PrintJob>,
    admin_pin: String,
}

impl PrinterFarm {
    pub fn new(config: FarmConfig) -> Self {
        Self {
            name: config.name,
            printers: Vec::new(),
            pending: VecDeque::new(),
            admin_pin: config.admin_pin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take exclusive ownership of a printer. Printers live for the process
    /// duration; there is no removal path.
    pub fn add_printer(&mut self, printer: Box<dyn Printer>) {
        tracing::info!(farm = %self.name, printer = printer.name(), "printer registered");
        self.printers.push(printer);
    }

    /// Append a job to the shared pending pool.
    pub fn submit_job(&mut self, job: PrintJob) {
        tracing::info!(farm = %self.name, job = job.id, "job submitted");
        self.pending.push_back(job);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn printers(&self) -> &[Box<dyn Printer>] {
        &self.printers
    }

    pub fn printers_mut(&mut self) -> &mut [Box<dyn Printer>] {
        &mut self.printers
    }

    /// Look up an owned printer by name.
    pub fn printer(&self, name: &str) -> Result<&dyn Printer> {
        self.printers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
            .ok_or_else(|| FarmError::PrinterNotFound(name.to_string()))
    }

    /// Look up an owned printer by name, mutably.
    pub fn printer_mut(&mut self, name: &str) -> Result<&mut (dyn Printer + 'static)> {
        self.printers
            .iter_mut()
            .find(|p| p.name() == name)
            .map(|p| p.as_mut())
            .ok_or_else(move || FarmError::PrinterNotFound(name.to_string()))
    }

    /// Drain the pending pool in FIFO order, placing each job on the printer
    /// with the shortest queue at that moment (ties go to the first printer
    /// in registration order).
    ///
    /// Placement is single-shot: a job rejected by its chosen printer is
    /// dropped, not retried elsewhere. The loop never aborts on a rejection.
    pub fn dispatch(&mut self) -> DispatchStats {
        let mut stats = DispatchStats::default();
        while let Some(job) = self.pending.pop_front() {
            let job_id = job.id;
            let target = self
                .printers
                .iter()
                .enumerate()
                .min_by_key(|(_, p)| p.queue_len())
                .map(|(idx, _)| idx);
            let Some(idx) = target else {
                tracing::warn!(farm = %self.name, job = job_id, "no printers in farm, job dropped");
                stats.rejected += 1;
                continue;
            };
            match self.printers[idx].admit(job) {
                Admission::Accepted => {
                    stats.placed += 1;
                    tracing::info!(
                        farm = %self.name,
                        job = job_id,
                        printer = self.printers[idx].name(),
                        "job placed"
                    );
                }
                Admission::Rejected { reason } => {
                    stats.rejected += 1;
                    tracing::warn!(
                        farm = %self.name,
                        job = job_id,
                        printer = self.printers[idx].name(),
                        %reason,
                        "job dropped"
                    );
                }
            }
        }
        stats
    }

    /// Compare a candidate pin against the farm's private admin pin.
    pub fn authenticate(&self, candidate_pin: &str) -> bool {
        candidate_pin == self.admin_pin
    }

    /// Started-run counts per printer, in registration order.
    pub fn utilization_report(&self) -> Vec<UtilizationEntry> {
        report::utilization(&self.printers)
    }

    /// Status of every printer, in registration order.
    pub fn statuses(&self) -> Vec<PrinterStatus> {
        report::statuses(&self.printers)
    }
}
