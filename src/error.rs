//! Typed errors for the extraction pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while processing a single text chunk.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// The model replied, but the reply is not valid JSON
    #[error("chunk {index}: model reply is not valid JSON ({response_len} bytes): {source}")]
    Parse {
        index: usize,
        response_len: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The call to the model failed (network, auth, quota)
    #[error("chunk {index}: model call failed: {source}")]
    Transport {
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The model call exceeded the configured timeout
    #[error("chunk {index}: model call timed out after {timeout:?}")]
    Timeout { index: usize, timeout: Duration },

    /// The model response carried no candidate text at all
    #[error("chunk {index}: model returned no candidates")]
    EmptyResponse { index: usize },
}

impl ChunkError {
    /// Zero-based index of the chunk that failed.
    pub fn chunk_index(&self) -> usize {
        match self {
            Self::Parse { index, .. }
            | Self::Transport { index, .. }
            | Self::Timeout { index, .. }
            | Self::EmptyResponse { index } => *index,
        }
    }
}

/// Errors raised by the extraction orchestrator.
///
/// A chunk failure is fatal to the whole run; the first failure is
/// wrapped here with run-level context. No partial result survives.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A chunk failed during the sequential run
    #[error("extraction failed on chunk {index} of {total}: {source}")]
    Chunk {
        /// Zero-based index of the failed chunk
        index: usize,
        /// Total number of chunks in the run
        total: usize,
        #[source]
        source: ChunkError,
    },

    /// Configuration error (missing API key, zero-sized chunk budget)
    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Result type alias for orchestrator operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Result type alias for per-chunk model operations.
pub type ChunkResult<T> = std::result::Result<T, ChunkError>;
