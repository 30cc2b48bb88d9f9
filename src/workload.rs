//! Workload construction: the classic textbook sample and seeded random
//! generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::models::{AllocationRequest, MemoryBlock, Process, Size, Ticks};

/// Bounds for random workload generation.
///
/// Every range is inclusive. Sizes and bursts start at 1, arrivals at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// RNG seed; the same seed always yields the same workload.
    pub seed: u64,
    /// Number of processes to schedule.
    pub process_count: usize,
    /// Latest arrival tick.
    pub max_arrival: Ticks,
    /// Longest burst.
    pub max_burst: Ticks,
    /// Priorities are drawn from `1..=max_priority`.
    pub max_priority: i32,
    /// Number of memory blocks.
    pub block_count: usize,
    /// Number of allocation requests.
    pub request_count: usize,
    /// Upper bound for block and request sizes.
    pub max_size: Size,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            process_count: 4,
            max_arrival: 10,
            max_burst: 10,
            max_priority: 5,
            block_count: 5,
            request_count: 4,
            max_size: 500,
        }
    }
}

impl WorkloadConfig {
    /// Default bounds with a specific seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn check(&self) -> SimResult<()> {
        let mut problems = Vec::new();
        if self.process_count == 0 {
            problems.push("process_count must be at least 1");
        }
        if self.block_count == 0 {
            problems.push("block_count must be at least 1");
        }
        if self.max_burst == 0 {
            problems.push("max_burst must be at least 1");
        }
        if self.max_size == 0 {
            problems.push("max_size must be at least 1");
        }
        if self.max_priority < 1 {
            problems.push("max_priority must be at least 1");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(SimError::Workload(problems.join("; ")))
        }
    }
}

/// Input for one simulation: processes for the scheduler, blocks and
/// requests for the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Scheduler input.
    pub processes: Vec<Process>,
    /// Initial partition.
    pub blocks: Vec<MemoryBlock>,
    /// Requests in service order.
    pub requests: Vec<AllocationRequest>,
}

impl Workload {
    /// The classic textbook sample.
    ///
    /// Processes P1(0,7) P2(2,4) P3(4,1) P4(5,4); blocks
    /// `[100, 500, 200, 300, 600]`; requests `[212, 417, 112, 426]`.
    pub fn textbook() -> Self {
        Self {
            processes: vec![
                Process::new("P1", 0, 7),
                Process::new("P2", 2, 4),
                Process::new("P3", 4, 1),
                Process::new("P4", 5, 4),
            ],
            blocks: MemoryBlock::from_sizes(&[100, 500, 200, 300, 600]),
            requests: AllocationRequest::from_sizes(&[212, 417, 112, 426]),
        }
    }

    /// Random workload from a seeded `StdRng`.
    ///
    /// # Errors
    /// `SimError::Workload` when a count or upper bound is zero.
    pub fn generate(config: &WorkloadConfig) -> SimResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::generate_with(config, &mut rng)
    }

    /// Random workload from a caller-supplied RNG.
    pub fn generate_with<R: Rng>(config: &WorkloadConfig, rng: &mut R) -> SimResult<Self> {
        config.check()?;

        let processes = (1..=config.process_count)
            .map(|i| {
                Process::new(
                    format!("P{i}"),
                    rng.random_range(0..=config.max_arrival),
                    rng.random_range(1..=config.max_burst),
                )
                .with_priority(rng.random_range(1..=config.max_priority))
            })
            .collect();

        let block_sizes: Vec<Size> = (0..config.block_count)
            .map(|_| rng.random_range(1..=config.max_size))
            .collect();
        let request_sizes: Vec<Size> = (0..config.request_count)
            .map(|_| rng.random_range(1..=config.max_size))
            .collect();

        debug!(
            seed = config.seed,
            processes = config.process_count,
            blocks = config.block_count,
            requests = config.request_count,
            "Generated workload"
        );

        Ok(Self {
            processes,
            blocks: MemoryBlock::from_sizes(&block_sizes),
            requests: AllocationRequest::from_sizes(&request_sizes),
        })
    }
}
