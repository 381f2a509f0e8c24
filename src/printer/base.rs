use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ServiceJobConfig;
use crate::error::Result;
use crate::printer::job::PrintJob;
use crate::printer::log::{EventLog, LogEntry};
use crate::printer::queue::PrintQueue;

/// Fabrication technology of a concrete printer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Technology {
    Fdm,
    Resin,
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technology::Fdm => write!(f, "FDM"),
            Technology::Resin => write!(f, "Resin"),
        }
    }
}

/// Outcome of a single admission attempt. A rejection is recoverable: the
/// queue and busy flag are untouched and the caller may try elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Rejected { reason: String },
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// Point-in-time summary of a printer, for reporting collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct PrinterStatus {
    pub technology: Technology,
    pub name: String,
    pub address: String,
    pub busy: bool,
    pub queue_depth: usize,
    pub last_event: String,
}

impl std::fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} @ {} | busy={} | queue={} | last='{}'",
            self.technology, self.name, self.address, self.busy, self.queue_depth, self.last_event
        )
    }
}

/// State shared by every printer kind: identity, busy flag, bounded queue
/// and event history. Fields are module-private; collaborators go through
/// the accessors.
#[derive(Debug)]
pub struct PrinterBase {
    name: String,
    address: String,
    busy: bool,
    queue: PrintQueue,
    log: EventLog,
    secret_key: String,
    last_calibration: Option<DateTime<Utc>>,
    service: ServiceJobConfig,
}

impl PrinterBase {
    pub fn new(name: impl Into<String>, address: impl Into<String>, capacity: usize) -> Self {
        let name = name.into();
        let secret_key = format!("{}:{}", name, rand::thread_rng().gen_range(1000..=9999));
        Self {
            name,
            address: address.into(),
            busy: false,
            queue: PrintQueue::new(capacity),
            log: EventLog::default(),
            secret_key,
            last_calibration: None,
            service: ServiceJobConfig::default(),
        }
    }

    /// Replace the queue with an empty one of the given capacity. Only
    /// meaningful at construction time, before any admission.
    pub(crate) fn with_capacity(mut self, capacity: usize) -> Self {
        self.queue = PrintQueue::new(capacity);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn queue(&self) -> &PrintQueue {
        &self.queue
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn last_calibration(&self) -> Option<DateTime<Utc>> {
        self.last_calibration
    }

    pub fn last_event(&self) -> Option<&LogEntry> {
        self.log.last()
    }

    /// Read-only snapshot of the event history.
    pub fn history(&self) -> Vec<LogEntry> {
        self.log.snapshot()
    }

    pub fn service_job_config(&self) -> &ServiceJobConfig {
        &self.service
    }

    pub(crate) fn record(&mut self, event: impl Into<String>) {
        self.log.record(event);
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Append a job iff the queue has room. Never blocks; the outcome is
    /// logged either way.
    pub(crate) fn admit(&mut self, job: PrintJob) -> Admission {
        let job_id = job.id;
        let summary = job.summary();
        if !self.queue.push(job) {
            let reason = format!("queue is full (max={})", self.queue.capacity());
            self.log.record(format!("enqueue rejected: {reason}"));
            tracing::warn!(printer = %self.name, job = job_id, %reason, "admission rejected");
            return Admission::Rejected { reason };
        }
        self.log.record(format!("enqueued {summary}"));
        tracing::info!(printer = %self.name, job = job_id, "job admitted");
        Admission::Accepted
    }

    pub(crate) fn dequeue(&mut self) -> Option<PrintJob> {
        self.queue.pop()
    }

    pub(crate) fn check_in(&mut self) {
        let token = self.issue_token();
        self.log.record(format!("check_in ok (token={token})"));
    }

    pub(crate) fn calibrate(&mut self) {
        let now = Utc::now();
        self.last_calibration = Some(now);
        self.log
            .record(format!("calibrated at {}", now.format("%Y-%m-%dT%H:%M:%S")));
    }

    fn issue_token(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.secret_key.hash(&mut hasher);
        format!("TKN-{:05}", hasher.finish() % 100_000)
    }
}

/// A fabrication device with a bounded FIFO queue and busy/idle state.
///
/// Concrete kinds supply the two pure functions ([`Printer::technology`] and
/// [`Printer::estimate_energy_kwh`]) plus access to the shared state; the
/// admission and execution machinery is provided here. Kind-specific extras
/// (releveling, cleaning cycles) are inherent methods on the concrete types,
/// not part of this interface.
pub trait Printer {
    /// Technology tag of this printer kind. Pure.
    fn technology(&self) -> Technology;

    /// Energy estimate for a job, in kWh. Pure, non-negative, never fails.
    fn estimate_energy_kwh(&self, job: &PrintJob) -> f64;

    fn base(&self) -> &PrinterBase;

    fn base_mut(&mut self) -> &mut PrinterBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn is_busy(&self) -> bool {
        self.base().is_busy()
    }

    fn queue_len(&self) -> usize {
        self.base().queue_len()
    }

    /// Admit a single job, subject to capacity.
    fn admit(&mut self, job: PrintJob) -> Admission {
        self.base_mut().admit(job)
    }

    /// Admit a batch, preserving order. All-or-nothing: every job is
    /// validated before the first admission, so an invalid element leaves
    /// the queue and history untouched.
    fn admit_batch(&mut self, jobs: Vec<PrintJob>) -> Result<Vec<Admission>> {
        for job in &jobs {
            job.validate()?;
        }
        Ok(jobs.into_iter().map(|job| self.admit(job)).collect())
    }

    /// Synthesize a short service job from raw instruction lines and admit
    /// it. Blank input uses the default instruction sequence.
    fn admit_raw(&mut self, gcode: &str) -> Admission {
        let job = self.base().service_job_config().synthesize(gcode);
        self.admit(job)
    }

    /// Run the oldest queued job to completion, synchronously.
    ///
    /// A no-op (with a logged reason) when already busy or when the queue is
    /// empty. The busy flag is true only between the START and FINISH log
    /// entries, so it is always false again by the time this returns.
    fn start(&mut self) {
        if self.base().is_busy() {
            self.base_mut().record("start ignored: printer is already busy");
            return;
        }
        let Some(job) = self.base_mut().dequeue() else {
            self.base_mut().record("start ignored: queue is empty");
            return;
        };
        let energy = self.estimate_energy_kwh(&job);
        let base = self.base_mut();
        base.set_busy(true);
        base.record(format!(
            "START {} | est_energy={energy:.2} kWh",
            job.summary()
        ));
        // Simulated execution: no suspension point between START and FINISH.
        base.record(format!("FINISH {}", job.model_name));
        base.set_busy(false);
        tracing::info!(printer = base.name(), job = job.id, "job completed");
    }

    /// Force the printer idle, whatever it was doing. The in-flight job, if
    /// any, is abandoned rather than requeued.
    fn stop(&mut self, reason: &str) {
        let base = self.base_mut();
        base.set_busy(false);
        base.record(format!("STOP reason='{reason}'"));
        tracing::info!(printer = base.name(), reason, "printer stopped");
    }

    /// Log a check-in event carrying a token derived from the private key.
    fn check_in(&mut self) {
        self.base_mut().check_in();
    }

    /// Stamp and log a calibration.
    fn calibrate(&mut self) {
        self.base_mut().calibrate();
    }

    fn status(&self) -> PrinterStatus {
        let base = self.base();
        PrinterStatus {
            technology: self.technology(),
            name: base.name().to_string(),
            address: base.address().to_string(),
            busy: base.is_busy(),
            queue_depth: base.queue_len(),
            last_event: base
                .last_event()
                .map(|entry| entry.event.clone())
                .unwrap_or_else(|| "no events".to_string()),
        }
    }

    /// Read-only snapshot of the event history.
    fn history(&self) -> Vec<LogEntry> {
        self.base().history()
    }
}
