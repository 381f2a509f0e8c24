use clap::Parser;
use tracing_subscriber::EnvFilter;

use printfarm::config::FarmConfig;
use printfarm::farm::PrinterFarm;
use printfarm::material::FilamentProfile;
use printfarm::printer::{FdmPrinter, PrintJob, Printer, ResinPrinter};

#[derive(Parser, Debug)]
#[command(name = "printfarm")]
#[command(version)]
#[command(about = "A small 3D printer farm with bounded queues and least-loaded dispatch")]
struct Args {
    /// Emit statuses and the utilization report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== printfarm demo ===\n");

    let pla = FilamentProfile::new("Generic PLA", "PLA", 205, 60, 1.24);
    let petg = FilamentProfile::new("PETG Black", "PETG", 240, 80, 1.27);

    println!("Filament profiles:");
    println!(" - {pla}");
    println!(" - {petg}");
    println!();

    let jobs = vec![
        PrintJob::new(
            1,
            "KPI_CalibrationCube.stl",
            25,
            pla.clone(),
            vec!["G28".into(), "G29".into(), "M104 S205".into()],
        ),
        PrintJob::new(
            2,
            "EnclosureFanDuct.stl",
            90,
            petg.clone(),
            vec!["G28".into(), "M104 S240".into(), "M190 S80".into()],
        ),
        PrintJob::new(
            3,
            "CaseBracket.stl",
            55,
            pla.clone(),
            vec!["G28".into(), "M104 S205".into(), "M140 S60".into()],
        ),
        PrintJob::new(
            4,
            "Resin_LogoBadge.ctb",
            75,
            FilamentProfile::new("Basic Resin", "Resin", 0, 0, 1.10),
            vec!["; sliced file".into()],
        ),
    ];

    let mut k1max = FdmPrinter::new("Creality K1 Max", "192.168.0.41", 0.4, (300, 300));
    let ender = FdmPrinter::new("Ender 3 KE", "192.168.0.42", 0.4, (220, 220));
    let mut photon = ResinPrinter::new("Anycubic Photon", "192.168.0.77", (2560, 1620));

    k1max.check_in();
    k1max.calibrate();
    k1max.relevel();
    render_bed_mesh(&k1max);

    photon.check_in();
    photon.run_cleaning(6);

    let mut farm = PrinterFarm::new(FarmConfig::new("KPI Mini-Farm"));
    farm.add_printer(Box::new(k1max));
    farm.add_printer(Box::new(ender));
    farm.add_printer(Box::new(photon));

    for job in jobs {
        farm.submit_job(job);
    }

    // Quick service macro straight onto one printer, bypassing the pool.
    farm.printer_mut("Ender 3 KE")?.admit_raw("G28\nM84");

    // Direct batch admission onto another.
    farm.printer_mut("Creality K1 Max")?.admit_batch(vec![PrintJob::new(
        10,
        "QuickClip.stl",
        12,
        pla.clone(),
        vec!["G28".into(), "M104 S205".into()],
    )])?;

    let stats = farm.dispatch();
    println!(
        "Dispatch: {} placed, {} dropped\n",
        stats.placed, stats.rejected
    );

    println!("Statuses after dispatch:");
    for status in farm.statuses() {
        println!(" - {status}");
    }
    println!();

    println!("Running jobs:");
    for printer in farm.printers_mut() {
        // Start twice to show the queue draining and the empty-queue no-op.
        printer.start();
        printer.start();
    }
    println!();

    println!("Admin auth:");
    println!(" - pin 0000: {}", farm.authenticate("0000"));
    println!(" - pin 0420: {}", farm.authenticate("0420"));

    if args.json {
        println!("\n{}", serde_json::to_string_pretty(&farm.statuses())?);
        println!(
            "{}",
            serde_json::to_string_pretty(&farm.utilization_report())?
        );
    } else {
        render_utilization(&farm);
    }

    println!("\nLast events (Creality K1 Max):");
    let history = farm.printer("Creality K1 Max")?.history();
    let tail = history.len().saturating_sub(6);
    for entry in &history[tail..] {
        println!("   {entry}");
    }

    Ok(())
}

fn render_bed_mesh(printer: &FdmPrinter) {
    println!("\nBed mesh for {} (mm):", printer.name());
    for row in printer.bed_mesh() {
        let line = row
            .iter()
            .map(|v| format!("{v:+.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }
    println!();
}

fn render_utilization(farm: &PrinterFarm) {
    println!("\nPrinter utilization:");
    for entry in farm.utilization_report() {
        let bar = "█".repeat(entry.starts);
        println!("{:20} | {} ({})", entry.printer, bar, entry.starts);
    }
}
