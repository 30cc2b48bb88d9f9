//! Simulation configuration loaded from JSON.
//!
//! ```json
//! {
//!   "quantum": 2,
//!   "processes": [{ "id": "P1", "arrival_time": 0, "burst_time": 7 }],
//!   "blocks": [{ "id": 1, "size": 100 }],
//!   "requests": [{ "process_id": "P1", "size": 80 }],
//!   "workload": { "seed": 42 }
//! }
//! ```
//!
//! Explicit lists win over `workload`; anything still missing comes from
//! [`Workload::textbook`]. Values are checked by the engines, not here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::models::{AllocationRequest, MemoryBlock, Process, Ticks};
use crate::workload::{Workload, WorkloadConfig};

/// Top-level simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Round Robin time slice.
    #[serde(default = "default_quantum")]
    pub quantum: Ticks,
    /// Explicit scheduler input.
    #[serde(default)]
    pub processes: Option<Vec<Process>>,
    /// Explicit initial partition.
    #[serde(default)]
    pub blocks: Option<Vec<MemoryBlock>>,
    /// Explicit allocation requests.
    #[serde(default)]
    pub requests: Option<Vec<AllocationRequest>>,
    /// Random generation for whatever is not listed explicitly.
    #[serde(default)]
    pub workload: Option<WorkloadConfig>,
}

fn default_quantum() -> Ticks {
    2
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: default_quantum(),
            processes: None,
            blocks: None,
            requests: None,
            workload: None,
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        serde_json::from_str(json).map_err(|e| SimError::Config(format!("invalid JSON: {e}")))
    }

    /// Reads and parses a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.display(), quantum = config.quantum, "Loaded configuration");
        Ok(config)
    }

    /// Resolves the input lists.
    ///
    /// # Errors
    /// `SimError::Workload` when the generator section is unusable.
    pub fn workload(&self) -> SimResult<Workload> {
        let base = match &self.workload {
            Some(cfg) => Workload::generate(cfg)?,
            None => Workload::textbook(),
        };
        Ok(Workload {
            processes: self.processes.clone().unwrap_or(base.processes),
            blocks: self.blocks.clone().unwrap_or(base.blocks),
            requests: self.requests.clone().unwrap_or(base.requests),
        })
    }
}
