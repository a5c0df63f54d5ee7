//! The final extraction record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::item::BudgetItem;
use crate::types::usage::UsageTally;

/// Result of one extraction run.
///
/// Items appear in chunk order, then in model-reported order within each
/// chunk, separators interleaved with line items. Immutable once returned
/// except for the per-field copy flags, which a consuming UI may toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetData {
    pub items: Vec<BudgetItem>,

    pub extracted_at: DateTime<Utc>,

    pub processed_at: DateTime<Utc>,

    /// Absent only if the model never reported usage metadata
    #[serde(
        rename = "aiUsage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub usage: Option<UsageTally>,
}

impl BudgetData {
    /// Iterate over priced line items, skipping separators.
    pub fn line_items(&self) -> impl Iterator<Item = &BudgetItem> {
        self.items.iter().filter(|i| i.is_line())
    }

    /// Sum of the `total` field across line items.
    pub fn grand_total(&self) -> f64 {
        self.line_items().filter_map(|i| i.total).sum()
    }
}
