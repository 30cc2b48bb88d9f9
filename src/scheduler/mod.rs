//! CPU scheduling engine and KPI evaluation.
//!
//! Simulates a single CPU serving a fixed set of processes under one of
//! four classic policies, producing per-process timing results and a
//! Gantt-style timeline.
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | no | `(arrival_time, id)` |
//! | SJF | no | `(burst_time, arrival_time, id)` among arrived |
//! | Round Robin | yes, per quantum | FIFO ready queue |
//! | Priority | yes, per tick | `(priority, remaining_time, id)` among arrived |
//!
//! # KPI
//!
//! `ScheduleKpi` computes waiting, turnaround and response averages,
//! CPU utilization, throughput and context switches.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod engine;
mod fcfs;
mod kpi;
mod priority;
mod round_robin;
mod sjf;
mod state;

pub use engine::{ScheduleOutcome, SchedulingEngine, SchedulingPolicy};
pub use kpi::ScheduleKpi;
