//! Data types for the budget extraction pipeline.

pub mod budget;
pub mod config;
pub mod item;
pub mod usage;

pub use budget::BudgetData;
pub use config::ExtractOptions;
pub use item::{BudgetItem, ItemKind, RawItem};
pub use usage::{ChunkUsage, UsageTally};
