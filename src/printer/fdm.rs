use rand::Rng;

use crate::printer::base::{Printer, PrinterBase, Technology};
use crate::printer::job::PrintJob;

const DEFAULT_QUEUE_CAPACITY: usize = 4;
const MESH_SIZE: usize = 9;

/// Average draw of a heated-bed filament printer, kWh per printing hour.
const KWH_PER_HOUR: f64 = 0.08;

/// Filament-extrusion printer.
///
/// Carries a diagnostic bed mesh: a fixed-size grid of small deviation
/// values regenerated by [`FdmPrinter::relevel`]. The mesh has no effect on
/// scheduling.
#[derive(Debug)]
pub struct FdmPrinter {
    base: PrinterBase,
    nozzle_diam_mm: f64,
    bed_size_mm: (u32, u32),
    bed_mesh: Vec<Vec<f64>>,
}

impl FdmPrinter {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        nozzle_diam_mm: f64,
        bed_size_mm: (u32, u32),
    ) -> Self {
        let mut printer = Self {
            base: PrinterBase::new(name, address, DEFAULT_QUEUE_CAPACITY),
            nozzle_diam_mm,
            bed_size_mm,
            bed_mesh: Vec::new(),
        };
        printer.generate_mesh();
        printer
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.base = self.base.with_capacity(capacity);
        self
    }

    pub fn nozzle_diam_mm(&self) -> f64 {
        self.nozzle_diam_mm
    }

    pub fn bed_size_mm(&self) -> (u32, u32) {
        self.bed_size_mm
    }

    pub fn bed_mesh(&self) -> &[Vec<f64>] {
        &self.bed_mesh
    }

    /// Regenerate the bed mesh, as after a manual releveling pass.
    pub fn relevel(&mut self) {
        self.generate_mesh();
        self.base.record("relevel done");
    }

    fn generate_mesh(&mut self) {
        let mut rng = rand::thread_rng();
        // One plane offset for the whole bed, small jitter per probe point.
        let base_offset: f64 = rng.gen_range(-0.15..0.15);
        self.bed_mesh = (0..MESH_SIZE)
            .map(|_| {
                (0..MESH_SIZE)
                    .map(|_| base_offset + rng.gen_range(-0.08..0.08))
                    .collect()
            })
            .collect();
        self.base
            .record(format!("bed_mesh generated ({MESH_SIZE}x{MESH_SIZE})"));
    }
}

impl Printer for FdmPrinter {
    fn technology(&self) -> Technology {
        Technology::Fdm
    }

    fn estimate_energy_kwh(&self, job: &PrintJob) -> f64 {
        f64::from(job.est_minutes) / 60.0 * KWH_PER_HOUR
    }

    fn base(&self) -> &PrinterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PrinterBase {
        &mut self.base
    }
}
