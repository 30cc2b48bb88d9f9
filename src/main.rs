//! `ossim`: runs every scheduling and allocation policy on one workload
//! and prints the comparison.
//!
//! Usage: `ossim [config.json]`. Without a path the textbook workload is
//! used. Set `RUST_LOG=debug` to trace individual decisions.

use std::env;
use std::error::Error;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use u_ossim::comparison::{
    best_by_turnaround_time, best_by_waiting_time, compare_allocation, compare_scheduling,
    fewest_rejections, least_internal_fragmentation, AllocationSummary, SchedulingSummary,
};
use u_ossim::config::SimulationConfig;
use u_ossim::models::{Process, Timeline};
use u_ossim::snapshot::{CommandSnapshot, HostSnapshot, Snapshot};

const PREVIEW_ROWS: usize = 5;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = match env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };
    let workload = config.workload()?;
    info!(
        processes = workload.processes.len(),
        blocks = workload.blocks.len(),
        requests = workload.requests.len(),
        quantum = config.quantum,
        "Starting simulation"
    );

    print_processes(&workload.processes);
    let scheduling = compare_scheduling(&workload.processes, config.quantum)?;
    print_scheduling(&scheduling);

    let allocation = compare_allocation(&workload.blocks, &workload.requests)?;
    print_allocation(&allocation);

    let host = CommandSnapshot::new();
    print_snapshot("Host processes", &host.get_host_processes());
    print_snapshot("Host memory", &host.get_host_memory());

    Ok(())
}

fn print_processes(processes: &[Process]) {
    println!("== Processes ==");
    println!("{:<6} {:>8} {:>6} {:>9}", "ID", "Arrival", "Burst", "Priority");
    for p in processes {
        println!("{:<6} {:>8} {:>6} {:>9}", p.id, p.arrival_time, p.burst_time, p.priority);
    }
    println!();
}

fn print_scheduling(summaries: &[SchedulingSummary]) {
    println!("== CPU scheduling ==");
    for s in summaries {
        println!("-- {} --", s.policy);
        println!("{}", gantt(&s.timeline));
    }
    println!();
    println!(
        "{:<10} {:>9} {:>11} {:>9} {:>8} {:>9}",
        "Policy", "Avg wait", "Avg turn.", "Avg resp", "Util %", "Switches"
    );
    for s in summaries {
        println!(
            "{:<10} {:>9.2} {:>11.2} {:>9.2} {:>8.1} {:>9}",
            s.policy.name(),
            s.average_waiting_time,
            s.average_turnaround_time,
            s.kpi.avg_response_time,
            s.kpi.cpu_utilization * 100.0,
            s.kpi.context_switches
        );
    }
    if let Some(best) = best_by_waiting_time(summaries) {
        println!("Lowest average waiting time: {}", best.policy);
    }
    if let Some(best) = best_by_turnaround_time(summaries) {
        println!("Lowest average turnaround time: {}", best.policy);
    }
    println!();
}

fn gantt(timeline: &Timeline) -> String {
    timeline
        .segments
        .iter()
        .map(|seg| {
            let label = seg.process_id.as_deref().unwrap_or("idle");
            format!("[{} {}-{}]", label, seg.start_time, seg.end_time)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_allocation(summaries: &[AllocationSummary]) {
    println!("== Memory allocation ==");
    for s in summaries {
        println!("-- {} --", s.policy);
        println!("{:<6} {:>6} {:>6} {:>10}", "PID", "Size", "Block", "Internal");
        for r in &s.records {
            let block = r
                .allocated_block_id
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            println!(
                "{:<6} {:>6} {:>6} {:>10}",
                r.process_id, r.requested_size, block, r.internal_fragmentation
            );
        }
    }
    println!();
    println!(
        "{:<10} {:>9} {:>9} {:>9} {:>11} {:>7}",
        "Policy", "Internal", "External", "Rejected", "Rej. size", "Util %"
    );
    for s in summaries {
        println!(
            "{:<10} {:>9} {:>9} {:>9} {:>11} {:>7.1}",
            s.policy.name(),
            s.total_internal_fragmentation,
            s.total_external_fragmentation,
            s.rejected_count,
            s.metrics.rejected_size,
            s.metrics.memory_utilization * 100.0
        );
    }
    if let Some(best) = fewest_rejections(summaries) {
        println!("Fewest rejections: {}", best.policy);
    }
    if let Some(best) = least_internal_fragmentation(summaries) {
        println!("Least internal fragmentation: {}", best.policy);
    }
    println!();
}

fn print_snapshot(title: &str, snapshot: &Snapshot) {
    println!("== {title} ==");
    match snapshot.preview(PREVIEW_ROWS) {
        Some(preview) => {
            println!("{}", preview.header);
            for row in &preview.rows {
                println!("{row}");
            }
            println!("(first {} of {} rows)", preview.rows.len(), preview.total_rows);
        }
        None => match snapshot {
            Snapshot::Unavailable(reason) => println!("snapshot unavailable: {reason}"),
            Snapshot::Available(_) => println!("snapshot unavailable: empty output"),
        },
    }
    println!();
}
