//! Input validation for simulation runs.
//!
//! Checks structural integrity of processes, blocks and requests before
//! an engine starts. Detects:
//! - Empty inputs
//! - Duplicate IDs
//! - Zero-length bursts and zero-size blocks/requests
//! - Arrival and burst times whose schedule would overflow the tick clock
//! - Blocks whose `is_free` flag disagrees with their occupant
//! - A missing or zero Round Robin quantum
//!
//! Every problem is reported, not just the first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::{AllocationRequest, MemoryBlock, Process, Ticks};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required list is empty.
    EmptyInput,
    /// Two entities share the same ID.
    DuplicateId,
    /// A process needs zero CPU time.
    NonPositiveBurst,
    /// A block or request has zero size.
    NonPositiveSize,
    /// Round Robin was requested without a usable quantum.
    MissingQuantum,
    /// Arrival plus total burst does not fit in `Ticks`.
    TimeOverflow,
    /// A block is marked busy without an occupant, or free with one.
    InconsistentOccupancy,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a process list.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate process IDs
/// 3. Every burst is at least one tick
/// 4. The latest arrival plus the sum of all bursts fits in `Ticks`,
///    which bounds every clock value a run can reach
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "Process list is empty",
        ));
    }

    let mut ids = HashSet::new();
    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
        if p.burst_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has a zero burst time", p.id),
            ));
        }
        if p.arrival_time.checked_add(p.burst_time).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::TimeOverflow,
                format!("Process '{}' completes past the end of the clock", p.id),
            ));
        }
    }

    let horizon = processes
        .iter()
        .try_fold(0 as Ticks, |total, p| total.checked_add(p.burst_time))
        .and_then(|total| {
            let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
            last_arrival.checked_add(total)
        });
    if horizon.is_none() && errors.iter().all(|e| e.kind != ValidationErrorKind::TimeOverflow) {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time overflows the clock",
        ));
    }

    finish(errors)
}

/// Validates a Round Robin quantum, returning it when usable.
pub fn validate_quantum(quantum: Option<Ticks>) -> Result<Ticks, Vec<ValidationError>> {
    match quantum {
        Some(q) if q >= 1 => Ok(q),
        Some(_) => Err(vec![ValidationError::new(
            ValidationErrorKind::MissingQuantum,
            "Round Robin quantum must be at least 1",
        )]),
        None => Err(vec![ValidationError::new(
            ValidationErrorKind::MissingQuantum,
            "Round Robin requires a quantum",
        )]),
    }
}

/// Validates the block partition and the request list.
///
/// Checks:
/// 1. At least one block
/// 2. No duplicate block IDs
/// 3. Every block and every request has a positive size
/// 4. A block is busy exactly when it names an occupant
///
/// An empty request list is valid (nothing to allocate).
pub fn validate_memory_input(
    blocks: &[MemoryBlock],
    requests: &[AllocationRequest],
) -> ValidationResult {
    let mut errors = Vec::new();

    if blocks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "Block list is empty",
        ));
    }

    let mut ids = HashSet::new();
    for b in blocks {
        if !ids.insert(b.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate block ID: {}", b.id),
            ));
        }
        if b.size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSize,
                format!("Block {} has zero size", b.id),
            ));
        }
        if b.is_free != b.occupant_process_id.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InconsistentOccupancy,
                match &b.occupant_process_id {
                    Some(pid) => format!("Block {} is marked free but held by '{}'", b.id, pid),
                    None => format!("Block {} is marked busy without an occupant", b.id),
                },
            ));
        }
    }

    for r in requests {
        if r.size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSize,
                format!("Request from '{}' has zero size", r.process_id),
            ));
        }
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 4, 1),
        ]
    }

    #[test]
    fn test_valid_processes() {
        assert!(validate_processes(&sample_processes()).is_ok());
    }

    #[test]
    fn test_empty_processes() {
        let errors = validate_processes(&[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInput);
    }

    #[test]
    fn test_duplicate_process_id() {
        let processes = vec![Process::new("P1", 0, 1), Process::new("P1", 3, 2)];
        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_zero_burst() {
        let processes = vec![Process::new("P1", 0, 0)];
        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst && e.message.contains("P1")));
    }

    #[test]
    fn test_quantum() {
        assert_eq!(validate_quantum(Some(2)), Ok(2));
        assert_eq!(
            validate_quantum(None).unwrap_err()[0].kind,
            ValidationErrorKind::MissingQuantum
        );
        assert_eq!(
            validate_quantum(Some(0)).unwrap_err()[0].kind,
            ValidationErrorKind::MissingQuantum
        );
    }

    #[test]
    fn test_valid_memory_input() {
        let blocks = MemoryBlock::from_sizes(&[100, 500]);
        let requests = AllocationRequest::from_sizes(&[50]);
        assert!(validate_memory_input(&blocks, &requests).is_ok());
        assert!(validate_memory_input(&blocks, &[]).is_ok());
    }

    #[test]
    fn test_memory_input_errors() {
        let blocks = vec![MemoryBlock::new(1, 100), MemoryBlock::new(1, 0)];
        let requests = vec![AllocationRequest::new("P1", 0)];

        let errors = validate_memory_input(&blocks, &requests).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveSize)
                .count(),
            2
        );
    }

    #[test]
    fn test_arrival_overflow() {
        let processes = vec![Process::new("P1", Ticks::MAX, 1)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
    }

    #[test]
    fn test_total_burst_overflow() {
        // Each process fits on its own; the combined schedule does not.
        let half = Ticks::MAX / 2 + 1;
        let processes = vec![Process::new("P1", 0, half), Process::new("P2", 0, half)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);

        let late = vec![Process::new("P1", Ticks::MAX - 10, 5), Process::new("P2", 0, 6)];
        assert!(validate_processes(&late).is_err());

        let tight = vec![Process::new("P1", Ticks::MAX - 10, 5), Process::new("P2", 0, 5)];
        assert!(validate_processes(&tight).is_ok());
    }

    #[test]
    fn test_inconsistent_occupancy() {
        let mut held_but_free = MemoryBlock::new(1, 300);
        held_but_free.occupant_process_id = Some("X".into());
        let mut busy_but_empty = MemoryBlock::new(2, 300);
        busy_but_empty.is_free = false;
        let mut occupied = MemoryBlock::new(3, 300);
        occupied.occupy("Y");

        let errors =
            validate_memory_input(&[held_but_free, busy_but_empty, occupied], &[]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InconsistentOccupancy));
        assert!(errors[0].message.contains("'X'"));
    }

    #[test]
    fn test_empty_blocks() {
        let errors = validate_memory_input(&[], &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInput);
    }
}
