//! Construction Budget Extraction Pipeline
//!
//! Takes the raw text of a construction budget document, splits it into
//! model-sized chunks at natural boundaries, drives a sequential
//! extraction protocol against an LLM, and aggregates the structured
//! line items and token usage into a single result.
//!
//! # Design Philosophy
//!
//! - Chunks are processed strictly in order, one in-flight call at a time
//! - Loose model output is validated and defaulted at one boundary
//! - Heuristics (natural breaks) are a replaceable policy table
//! - Configuration is passed in explicitly, never read from ambient state
//!
//! # Usage
//!
//! ```rust,ignore
//! use budget_extraction::{Extractor, ExtractOptions, GeminiModel, ModelCredentials};
//!
//! let model = GeminiModel::new(ModelCredentials::new(api_key, "gemini-2.5-flash"));
//! let extractor = Extractor::with_options(
//!     model,
//!     ExtractOptions::new()
//!         .with_max_field_chunk_len(300)
//!         .with_cost_per_1k_tokens(0.002),
//! );
//!
//! let data = extractor.extract(&document_text, Some(&|status: &str| {
//!     println!("{status}");
//! })).await?;
//!
//! for item in data.line_items() {
//!     println!("{}: {:?} {:?}", item.description, item.quantity, item.unit);
//! }
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Segmenter, field chunker and orchestrator
//! - [`traits`] - ChunkModel and ProgressSink seams
//! - [`types`] - Budget items, usage tallies, options
//! - [`ai`] - Gemini implementation of ChunkModel
//! - [`security`] - Credential handling
//! - [`testing`] - Scripted mock model for tests

pub mod ai;
pub mod error;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ChunkError, ExtractError};
pub use traits::{
    model::{ChunkModel, ChunkOutcome},
    progress::ProgressSink,
};
pub use types::{
    budget::BudgetData,
    config::ExtractOptions,
    item::{BudgetItem, ItemKind, RawItem},
    usage::{ChunkUsage, UsageTally},
};

// Re-export pipeline components
pub use pipeline::{
    chunk_field, format_extract_prompt, segment, segment_with_rules, BreakRules, Extractor,
    EXTRACT_ITEMS_PROMPT,
};

// Re-export the Gemini client and credentials
pub use ai::GeminiModel;
pub use security::ModelCredentials;

// Re-export testing utilities
pub use testing::MockModel;
