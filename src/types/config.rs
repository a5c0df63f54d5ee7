//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Options for one extraction run.
///
/// Passed explicitly into the orchestrator rather than read from ambient
/// state, so runs stay deterministic and testable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Maximum characters per model chunk.
    ///
    /// The segmenter targets this budget; a chunk may exceed it only when
    /// a single line is itself longer. Default: 20000.
    pub max_chunk_size: usize,

    /// Maximum characters per description display chunk.
    ///
    /// Display-oriented, independent of `max_chunk_size`. Default: 500.
    pub max_field_chunk_len: usize,

    /// Cost per 1000 tokens, in the caller's currency.
    ///
    /// Used only for the estimated-cost figure on the usage tally.
    /// Default: 0.0 (no estimate).
    pub cost_per_1k_tokens: f64,

    /// Delay between successive chunk calls in milliseconds.
    ///
    /// Rate-limit courtesy, not a correctness requirement. Not applied
    /// after the last chunk. Default: 500.
    pub inter_chunk_delay_ms: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_chunk_size: 20_000,
            max_field_chunk_len: 500,
            cost_per_1k_tokens: 0.0,
            inter_chunk_delay_ms: 500,
        }
    }
}

impl ExtractOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model chunk budget.
    pub fn with_max_chunk_size(mut self, size: usize) -> Self {
        self.max_chunk_size = size;
        self
    }

    /// Set the description display-chunk budget.
    pub fn with_max_field_chunk_len(mut self, len: usize) -> Self {
        self.max_field_chunk_len = len;
        self
    }

    /// Set the per-1000-token cost rate.
    pub fn with_cost_per_1k_tokens(mut self, rate: f64) -> Self {
        self.cost_per_1k_tokens = rate;
        self
    }

    /// Set the inter-chunk delay.
    pub fn with_inter_chunk_delay_ms(mut self, ms: u64) -> Self {
        self.inter_chunk_delay_ms = ms;
        self
    }
}
