//! ChunkModel trait: the seam between the orchestrator and the LLM.

use async_trait::async_trait;

use crate::error::ChunkResult;
use crate::types::item::RawItem;
use crate::types::usage::ChunkUsage;

/// Outcome of extracting a single text chunk.
#[derive(Debug, Clone, Default)]
pub struct ChunkOutcome {
    /// Items in the order the model reported them
    pub items: Vec<RawItem>,

    /// Token usage for the call, if the backend reports it
    pub usage: Option<ChunkUsage>,
}

impl ChunkOutcome {
    /// Create an outcome with items and no usage.
    pub fn new(items: Vec<RawItem>) -> Self {
        Self { items, usage: None }
    }

    /// Attach usage metadata.
    pub fn with_usage(mut self, usage: ChunkUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// A model that extracts budget items from one text chunk per call.
///
/// Implementations wrap a specific LLM provider and handle prompting and
/// response parsing. One call, one parse attempt: no retry lives here,
/// failures propagate to the orchestrator.
#[async_trait]
pub trait ChunkModel: Send + Sync {
    /// Extract items from a single chunk.
    ///
    /// `index` is the zero-based position of the chunk in the run; it is
    /// included in the prompt and in any error raised.
    async fn extract_chunk(&self, chunk: &str, index: usize) -> ChunkResult<ChunkOutcome>;
}
