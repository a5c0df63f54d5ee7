//! Token usage accounting for extraction runs.

use serde::{Deserialize, Serialize};

/// Token counters reported by the model for a single chunk call.
///
/// Optional in practice: not every backend reports usage metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkUsage {
    /// Tokens consumed by the prompt
    #[serde(default)]
    pub prompt_tokens: u64,

    /// Tokens produced by the model reply
    #[serde(default)]
    pub candidates_tokens: u64,

    /// Total tokens billed for the call
    #[serde(default)]
    pub total_tokens: u64,
}

impl ChunkUsage {
    pub fn new(prompt_tokens: u64, candidates_tokens: u64, total_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            candidates_tokens,
            total_tokens,
        }
    }
}

/// Accumulated token counts and estimated cost for one extraction run.
///
/// Counters only ever grow while chunks are processed; the cost is
/// derived once at the end of the run from the configured rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTally {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    /// Estimated cost in the configured currency
    pub estimated_cost: f64,
}

impl UsageTally {
    /// Fold one chunk's usage into the running tally.
    pub fn add(&mut self, usage: &ChunkUsage) {
        self.input_tokens += usage.prompt_tokens;
        self.output_tokens += usage.candidates_tokens;
        self.total_tokens += usage.total_tokens;
    }

    /// Derive the estimated cost from a per-1000-token rate.
    pub fn finalize_cost(&mut self, cost_per_1k_tokens: f64) {
        self.estimated_cost = (self.total_tokens as f64 / 1000.0) * cost_per_1k_tokens;
    }
}
