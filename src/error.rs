//! @acp:module "Errors"
//! @acp:summary "Error taxonomy for catalog loading, selection, and generation"
//! @acp:domain cli
//! @acp:layer core
//!
//! Fatal errors (`Configuration`, `SchemaMismatch`) stop the current run.
//! `NotFound` and `Generation` are per-item and are reported inline by the
//! flow instead of aborting a batch.

use thiserror::Error;

/// Errors produced by the stratnav library
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Missing credentials, invalid config values, or a broken prompt template
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The workbook does not have the expected sheet, columns, or shape
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// An expected lookup came back empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// The completion service failed or returned unusable content
    #[error("Generation failed: {0}")]
    Generation(String),

    /// More items selected than a step allows
    #[error("Too many {kind} selected: {got} (maximum {max})")]
    SelectionLimit {
        kind: &'static str,
        max: usize,
        got: usize,
    },

    /// A selection names something that was not offered
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A step was attempted before the steps it depends on
    #[error("Step out of order: {0}")]
    StepOrder(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrategyError {
    /// Whether the flow may continue past this error with the next item
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StrategyError::NotFound(_) | StrategyError::Generation(_))
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;
