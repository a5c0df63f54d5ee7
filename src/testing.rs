//! Testing utilities including a scripted mock model.
//!
//! Useful for testing the orchestrator and consuming applications
//! without real LLM calls.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{ChunkError, ChunkResult};
use crate::traits::model::{ChunkModel, ChunkOutcome};
use crate::types::item::RawItem;

/// A mock chunk model with scripted per-chunk outcomes.
///
/// Unscripted chunk indices echo one line item back, so the mock is
/// usable without setup. Calls are recorded for assertions; clones share
/// the same script and call log.
#[derive(Clone, Default)]
pub struct MockModel {
    outcomes: Arc<RwLock<HashMap<usize, ChunkOutcome>>>,
    failures: Arc<RwLock<HashMap<usize, MockFailure>>>,
    calls: Arc<RwLock<Vec<MockCall>>>,
}

/// Scripted failure for a chunk index.
#[derive(Debug, Clone)]
enum MockFailure {
    Parse,
    Transport(String),
}

/// Record of one call made to the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub index: usize,
    pub chunk_len: usize,
}

impl MockModel {
    /// Create a mock with default echo behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for a chunk index.
    pub fn with_outcome(self, index: usize, outcome: ChunkOutcome) -> Self {
        self.outcomes.write().unwrap().insert(index, outcome);
        self
    }

    /// Script items (without usage) for a chunk index.
    pub fn with_items(self, index: usize, items: Vec<RawItem>) -> Self {
        self.with_outcome(index, ChunkOutcome::new(items))
    }

    /// Make a chunk index fail with a JSON parse error.
    pub fn fail_parse(self, index: usize) -> Self {
        self.failures.write().unwrap().insert(index, MockFailure::Parse);
        self
    }

    /// Make a chunk index fail with a transport error.
    pub fn fail_transport(self, index: usize, message: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(index, MockFailure::Transport(message.into()));
        self
    }

    /// Get all calls made to this mock, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }

    fn default_outcome(index: usize) -> ChunkOutcome {
        ChunkOutcome::new(vec![RawItem::line(format!("Item from chunk {}", index + 1))])
    }
}

#[async_trait]
impl ChunkModel for MockModel {
    async fn extract_chunk(&self, chunk: &str, index: usize) -> ChunkResult<ChunkOutcome> {
        self.calls.write().unwrap().push(MockCall {
            index,
            chunk_len: chunk.len(),
        });

        if let Some(failure) = self.failures.read().unwrap().get(&index) {
            return Err(match failure {
                MockFailure::Parse => {
                    let source = serde_json::from_str::<serde_json::Value>("not json")
                        .expect_err("invalid JSON must not parse");
                    ChunkError::Parse {
                        index,
                        response_len: 8,
                        source,
                    }
                }
                MockFailure::Transport(message) => ChunkError::Transport {
                    index,
                    source: message.clone().into(),
                },
            });
        }

        Ok(self
            .outcomes
            .read()
            .unwrap()
            .get(&index)
            .cloned()
            .unwrap_or_else(|| Self::default_outcome(index)))
    }
}
