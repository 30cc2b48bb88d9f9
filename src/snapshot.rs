//! Host process and memory snapshots.
//!
//! The simulator never depends on the host; snapshots are displayed next
//! to simulated results for reference only. A failing command yields
//! [`Snapshot::Unavailable`] instead of an error.

use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Text captured from the host, or the reason it could not be captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Snapshot {
    /// Raw command output.
    Available(String),
    /// Why nothing was captured.
    Unavailable(String),
}

impl Snapshot {
    /// Whether text was captured.
    pub fn is_available(&self) -> bool {
        matches!(self, Snapshot::Available(_))
    }

    /// Captured text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Snapshot::Available(text) => Some(text),
            Snapshot::Unavailable(_) => None,
        }
    }

    /// Header line plus the first `rows` data lines.
    ///
    /// `None` when unavailable or empty.
    pub fn preview(&self, rows: usize) -> Option<SnapshotPreview> {
        let mut lines = self.text()?.lines().filter(|l| !l.trim().is_empty());
        let header = lines.next()?.to_string();
        let data: Vec<&str> = lines.collect();
        Some(SnapshotPreview {
            header,
            total_rows: data.len(),
            rows: data.iter().take(rows).map(|l| l.to_string()).collect(),
        })
    }
}

/// Truncated view of a tabular snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPreview {
    /// First non-empty line (column titles).
    pub header: String,
    /// Leading data rows, at most the requested count.
    pub rows: Vec<String>,
    /// Data rows in the full snapshot.
    pub total_rows: usize,
}

/// Source of host snapshots.
pub trait HostSnapshot {
    /// Process table of the host.
    fn get_host_processes(&self) -> Snapshot;

    /// Memory usage of the host.
    fn get_host_memory(&self) -> Snapshot;
}

/// External command with arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCommand {
    /// Executable name or path.
    pub program: String,
    /// Arguments passed to `program`.
    pub args: Vec<String>,
}

impl HostCommand {
    /// Creates a command from a program and its arguments.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn capture(&self) -> Snapshot {
        let output = match Command::new(&self.program).args(&self.args).output() {
            Ok(output) => output,
            Err(e) => {
                warn!(command = %self.program, error = %e, "Snapshot command failed to start");
                return Snapshot::Unavailable(format!("{}: {}", self.program, e));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(command = %self.program, status = %output.status, "Snapshot command failed");
            return Snapshot::Unavailable(format!("{} exited with {}: {}", self.program, output.status, stderr));
        }

        Snapshot::Available(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Snapshots taken by running host commands (`ps aux`, `free -m`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSnapshot {
    processes: HostCommand,
    memory: HostCommand,
}

impl Default for CommandSnapshot {
    fn default() -> Self {
        Self {
            processes: HostCommand::new("ps", &["aux"]),
            memory: HostCommand::new("free", &["-m"]),
        }
    }
}

impl CommandSnapshot {
    /// Uses `ps aux` and `free -m`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the process listing command.
    pub fn with_process_command(mut self, command: HostCommand) -> Self {
        self.processes = command;
        self
    }

    /// Overrides the memory usage command.
    pub fn with_memory_command(mut self, command: HostCommand) -> Self {
        self.memory = command;
        self
    }
}

impl HostSnapshot for CommandSnapshot {
    fn get_host_processes(&self) -> Snapshot {
        self.processes.capture()
    }

    fn get_host_memory(&self) -> Snapshot {
        self.memory.capture()
    }
}

/// Fixed snapshots for deterministic runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSnapshot {
    /// Returned by `get_host_processes`.
    pub processes: Snapshot,
    /// Returned by `get_host_memory`.
    pub memory: Snapshot,
}

impl StaticSnapshot {
    /// Serves the given snapshots on every call.
    pub fn new(processes: Snapshot, memory: Snapshot) -> Self {
        Self { processes, memory }
    }
}

impl HostSnapshot for StaticSnapshot {
    fn get_host_processes(&self) -> Snapshot {
        self.processes.clone()
    }

    fn get_host_memory(&self) -> Snapshot {
        self.memory.clone()
    }
}
