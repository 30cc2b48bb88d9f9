//! Operating-system resource-management simulator.
//!
//! Simulates single-CPU process scheduling and contiguous memory
//! allocation over fixed partitions, and compares the classic policies of
//! each on the same input.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ScheduleResult`, `Timeline`,
//!   `MemoryBlock`, `AllocationRequest`, `AllocationRecord`
//! - **`validation`**: Input integrity checks (duplicate IDs, zero bursts
//!   and sizes, missing quantum)
//! - **`scheduler`**: FCFS, SJF, Round Robin and preemptive Priority, plus KPIs
//! - **`allocator`**: First-, Best-, Worst- and Next-Fit, plus fragmentation metrics
//! - **`comparison`**: Every policy on one input, with best-of helpers
//! - **`snapshot`**: Host process/memory listings for display next to results
//! - **`workload`**: Textbook sample data and seeded random generation
//! - **`config`**: JSON simulation settings
//!
//! # Example
//!
//! ```
//! use u_ossim::comparison::{best_by_waiting_time, compare_scheduling};
//! use u_ossim::workload::Workload;
//!
//! let workload = Workload::textbook();
//! let summaries = compare_scheduling(&workload.processes, 2).unwrap();
//! let best = best_by_waiting_time(&summaries).unwrap();
//! assert!(best.average_waiting_time <= summaries[0].average_waiting_time);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", 10th ed.
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", 4th ed.

pub mod allocator;
pub mod comparison;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod snapshot;
pub mod validation;
pub mod workload;

pub use error::{SimError, SimResult};
