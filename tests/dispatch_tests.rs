use printfarm::config::FarmConfig;
use printfarm::farm::PrinterFarm;
use printfarm::material::FilamentProfile;
use printfarm::printer::{FdmPrinter, PrintJob, Printer, ResinPrinter};

fn pla() -> FilamentProfile {
    FilamentProfile::new("Generic PLA", "PLA", 205, 60, 1.24)
}

fn job(id: u32, minutes: u32) -> PrintJob {
    PrintJob::new(
        id,
        format!("model-{id}.stl"),
        minutes,
        pla(),
        vec!["G28".to_string()],
    )
}

fn fdm(name: &str) -> FdmPrinter {
    FdmPrinter::new(name, "10.0.0.2", 0.4, (300, 300))
}

fn test_farm() -> PrinterFarm {
    PrinterFarm::new(FarmConfig::new("test-farm"))
}

#[test]
fn test_dispatch_places_on_least_loaded_printer() {
    let mut farm = test_farm();
    farm.add_printer(Box::new(fdm("a")));
    farm.add_printer(Box::new(fdm("b")));
    farm.add_printer(Box::new(fdm("c")));

    // Prefill queues to lengths [2, 0, 1].
    farm.printer_mut("a").unwrap().admit(job(90, 10));
    farm.printer_mut("a").unwrap().admit(job(91, 10));
    farm.printer_mut("c").unwrap().admit(job(92, 10));

    farm.submit_job(job(1, 25));
    let stats = farm.dispatch();

    assert_eq!(stats.placed, 1);
    assert_eq!(farm.printer("a").unwrap().queue_len(), 2);
    assert_eq!(farm.printer("b").unwrap().queue_len(), 1);
    assert_eq!(farm.printer("c").unwrap().queue_len(), 1);
}

#[test]
fn test_dispatch_is_greedy_per_job() {
    let mut farm = test_farm();
    farm.add_printer(Box::new(fdm("a")));
    farm.add_printer(Box::new(fdm("b")));

    farm.submit_job(job(1, 25));
    farm.submit_job(job(2, 30));
    farm.submit_job(job(3, 40));
    farm.dispatch();

    // Lengths are recomputed after each placement: job 1 goes to a (tie, first
    // in registration order), job 2 to b, job 3 back to a.
    assert_eq!(farm.printer("a").unwrap().queue_len(), 2);
    assert_eq!(farm.printer("b").unwrap().queue_len(), 1);

    let a = farm.printer_mut("a").unwrap();
    a.start();
    a.start();
    let history = a.history();
    let starts: Vec<&str> = history
        .iter()
        .filter(|e| e.event.starts_with("START"))
        .map(|e| e.event.as_str())
        .collect();
    assert!(starts[0].contains("Job#1"), "got: {}", starts[0]);
    assert!(starts[1].contains("Job#3"), "got: {}", starts[1]);

    let b = farm.printer_mut("b").unwrap();
    b.start();
    let history = b.history();
    let start = history
        .iter()
        .find(|e| e.event.starts_with("START"))
        .unwrap();
    assert!(start.event.contains("Job#2"), "got: {}", start.event);
}

#[test]
fn test_dispatch_tie_breaks_by_registration_order() {
    let mut farm = test_farm();
    farm.add_printer(Box::new(fdm("a")));
    farm.add_printer(Box::new(fdm("b")));

    farm.submit_job(job(1, 25));
    farm.dispatch();

    assert_eq!(farm.printer("a").unwrap().queue_len(), 1);
    assert_eq!(farm.printer("b").unwrap().queue_len(), 0);
}

#[test]
fn test_rejected_job_is_dropped_not_retried() {
    let mut farm = test_farm();
    // Printer a has one slot; printer b has room but two queued jobs already.
    farm.add_printer(Box::new(fdm("a").with_queue_capacity(1)));
    farm.add_printer(Box::new(fdm("b")));
    farm.printer_mut("b").unwrap().admit(job(90, 10));
    farm.printer_mut("b").unwrap().admit(job(91, 10));

    farm.submit_job(job(1, 25));
    farm.submit_job(job(2, 30));
    let stats = farm.dispatch();

    // Job 1 fills a. Job 2 again picks a (0 < 2 became 1 < 2), which rejects
    // it; the job is dropped even though b still has room.
    assert_eq!(stats.placed, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(farm.printer("a").unwrap().queue_len(), 1);
    assert_eq!(farm.printer("b").unwrap().queue_len(), 2);
    assert_eq!(farm.pending_len(), 0);
}

#[test]
fn test_dispatch_drains_the_pool_and_respects_capacity() {
    let mut farm = test_farm();
    farm.add_printer(Box::new(fdm("a")));
    farm.add_printer(Box::new(ResinPrinter::new("r", "10.0.0.3", (2560, 1620))));

    for id in 1..=10 {
        farm.submit_job(job(id, 15));
    }
    let stats = farm.dispatch();

    assert_eq!(farm.pending_len(), 0);
    assert_eq!(stats.placed + stats.rejected, 10);
    for printer in farm.printers() {
        assert!(printer.queue_len() <= printer.base().capacity());
    }
    // Placement alternates until the resin queue is full at 2. Once the FDM
    // queue reaches 3, the full resin printer is still the shortest queue, so
    // every remaining job is sent there and dropped. The FDM printer's last
    // slot stays empty: single-shot placement, no retry.
    assert_eq!(farm.printer("a").unwrap().queue_len(), 3);
    assert_eq!(farm.printer("r").unwrap().queue_len(), 2);
    assert_eq!(stats.placed, 5);
    assert_eq!(stats.rejected, 5);
}

#[test]
fn test_dispatch_with_no_printers_drops_everything() {
    let mut farm = test_farm();
    farm.submit_job(job(1, 25));
    farm.submit_job(job(2, 30));

    let stats = farm.dispatch();

    assert_eq!(stats.placed, 0);
    assert_eq!(stats.rejected, 2);
    assert_eq!(farm.pending_len(), 0);
}

#[test]
fn test_dispatch_never_aborts_on_rejection() {
    let mut farm = test_farm();
    farm.add_printer(Box::new(fdm("a").with_queue_capacity(1)));

    for id in 1..=4 {
        farm.submit_job(job(id, 15));
    }
    let stats = farm.dispatch();

    // First job fills the single slot, the rest are rejected one by one; the
    // loop still drains the whole pool.
    assert_eq!(stats.placed, 1);
    assert_eq!(stats.rejected, 3);
    assert_eq!(farm.pending_len(), 0);
}

#[test]
fn test_submitted_jobs_wait_in_the_pool_until_dispatch() {
    let mut farm = test_farm();
    farm.add_printer(Box::new(fdm("a")));

    farm.submit_job(job(1, 25));
    assert_eq!(farm.pending_len(), 1);
    assert_eq!(farm.printer("a").unwrap().queue_len(), 0);

    farm.dispatch();
    assert_eq!(farm.pending_len(), 0);
    assert_eq!(farm.printer("a").unwrap().queue_len(), 1);
}

#[test]
fn test_printer_lookup_by_unknown_name_fails() {
    let mut farm = test_farm();
    farm.add_printer(Box::new(fdm("a")));

    assert!(farm.printer("nope").is_err());
    assert!(farm.printer_mut("nope").is_err());
    assert!(farm.printer("a").is_ok());
}
