//! Core trait abstractions.

pub mod model;
pub mod progress;

pub use model::{ChunkModel, ChunkOutcome};
pub use progress::ProgressSink;
