//! Error types for the allocation pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::allocator::AllocationError;
use crate::store::StoreError;

/// Stage-level failure. Any of these ends the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed line in an input file
    #[error("{path}:{line}: {reason}")]
    InputFormat {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// Input file could not be opened or read
    #[error("cannot read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inventory cannot cover every order
    #[error(transparent)]
    AllocationInfeasible(#[from] AllocationError),

    /// Record store failure
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Notification report could not be written
    #[error("report error: {0}")]
    Report(#[from] csv::Error),
}

/// Result type for stage operations
pub type PipelineResult<T> = Result<T, PipelineError>;
