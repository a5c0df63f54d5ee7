//! Extraction pipeline: segmentation, field chunking, orchestration.

pub mod chunk;
pub mod extractor;
pub mod prompts;
pub mod segment;

pub use chunk::chunk_field;
pub use extractor::Extractor;
pub use prompts::{format_extract_prompt, EXTRACT_ITEMS_PROMPT};
pub use segment::{segment, segment_with_rules, BreakRules};
