//! Error types.
//!
//! Only malformed input aborts a run. A rejected allocation is a record
//! status and an unavailable host snapshot is a value, so neither appears
//! here.

use thiserror::Error;

use crate::validation::ValidationError;

/// Simulation result.
pub type SimResult<T> = Result<T, SimError>;

/// Simulation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workload generation error: {0}")]
    Workload(String),
}

impl SimError {
    /// Validation errors carried by an `InvalidInput`, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SimError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimError::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
