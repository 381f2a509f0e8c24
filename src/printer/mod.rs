//! Printer abstraction: bounded-queue admission, the execution state
//! machine, and the two concrete device kinds.
//!
//! # Components
//!
//! - [`Printer`]: the device interface (admission, start/stop, status)
//! - [`PrinterBase`]: state shared by every kind (queue, busy flag, history)
//! - [`FdmPrinter`] / [`ResinPrinter`]: the concrete kinds
//! - [`PrintQueue`]: bounded FIFO of [`PrintJob`]s
//! - [`EventLog`]: append-only per-printer history

pub mod base;
pub mod fdm;
pub mod job;
pub mod log;
pub mod queue;
pub mod resin;

pub use base::{Admission, Printer, PrinterBase, PrinterStatus, Technology};
pub use fdm::FdmPrinter;
pub use job::PrintJob;
pub use log::{EventLog, LogEntry};
pub use queue::PrintQueue;
pub use resin::ResinPrinter;
