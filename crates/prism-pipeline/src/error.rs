//! Pipeline error types.

use prism_core::CoreError;
use thiserror::Error;

/// A query mutation that was refused. The previous state is retained.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Rejected filter update: {0}")]
    InvalidFilter(#[source] CoreError),

    #[error("Rejected sort update: {0}")]
    InvalidSort(#[source] CoreError),
}
