//! Extraction orchestrator - drives chunks through a model sequentially.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::{ExtractError, Result};
use crate::pipeline::chunk::chunk_field;
use crate::pipeline::segment::segment;
use crate::traits::model::ChunkModel;
use crate::traits::progress::ProgressSink;
use crate::types::budget::BudgetData;
use crate::types::config::ExtractOptions;
use crate::types::item::{coerce_number, BudgetItem, ItemKind, RawItem};
use crate::types::usage::UsageTally;

/// Description used when the model returns an item without one.
const MISSING_DESCRIPTION: &str = "No description";

/// The extraction orchestrator.
///
/// Segments the document, drives the model one chunk at a time (never
/// concurrently, to respect rate limits), accumulates items and usage,
/// and normalizes the raw items into the final record.
///
/// # Example
///
/// ```rust,ignore
/// use budget_extraction::{Extractor, ExtractOptions, GeminiModel, ModelCredentials};
///
/// let model = GeminiModel::from_api_key("AIza...");
/// let extractor = Extractor::with_options(model, ExtractOptions::new().with_cost_per_1k_tokens(0.002));
/// let data = extractor.extract(&text, Some(&|status: &str| println!("{status}"))).await?;
/// ```
pub struct Extractor<M: ChunkModel> {
    model: M,
    options: ExtractOptions,
}

impl<M: ChunkModel> Extractor<M> {
    /// Create an extractor with default options.
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: ExtractOptions::default(),
        }
    }

    /// Create an extractor with custom options.
    pub fn with_options(model: M, options: ExtractOptions) -> Self {
        Self { model, options }
    }

    /// Get a reference to the options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Run the full extraction pipeline over `text`.
    ///
    /// Chunks are processed strictly in order; the first chunk failure
    /// aborts the run with no partial result. Progress strings go to
    /// `progress` if provided. Re-running with identical input and
    /// options replays the same chunk sequence, so whole-run retries are
    /// safe.
    pub async fn extract(
        &self,
        text: &str,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<BudgetData> {
        if self.options.max_chunk_size == 0 || self.options.max_field_chunk_len == 0 {
            return Err(ExtractError::Config {
                reason: "chunk budgets must be non-zero".to_string(),
            });
        }

        let chunks = segment(text, self.options.max_chunk_size);
        let total = chunks.len();
        info!(chunks = total, "starting extraction run");
        report(progress, &format!("Processing {total} chunks with the model..."));

        let mut raw_items: Vec<RawItem> = Vec::new();
        let mut tally = UsageTally::default();
        let mut saw_usage = false;

        for (index, chunk) in chunks.iter().enumerate() {
            report(
                progress,
                &format!("Processing chunk {} of {}...", index + 1, total),
            );

            match self.model.extract_chunk(chunk, index).await {
                Ok(outcome) => {
                    let count = outcome.items.len();
                    raw_items.extend(outcome.items);
                    if let Some(usage) = outcome.usage {
                        tally.add(&usage);
                        saw_usage = true;
                    }
                    debug!(
                        chunk = index + 1,
                        items = count,
                        total_items = raw_items.len(),
                        "chunk extracted"
                    );
                    report(
                        progress,
                        &format!(
                            "Chunk {}/{}: {} items extracted (total: {})",
                            index + 1,
                            total,
                            count,
                            raw_items.len()
                        ),
                    );
                }
                Err(source) => {
                    let message = format!("Error processing chunk {}: {source}", index + 1);
                    error!(chunk = index + 1, total, "{message}");
                    report(progress, &message);
                    return Err(ExtractError::Chunk {
                        index,
                        total,
                        source,
                    });
                }
            }

            // Courtesy delay between requests, skipped after the last one
            if index + 1 < total && self.options.inter_chunk_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.options.inter_chunk_delay_ms)).await;
            }
        }

        report(
            progress,
            &format!("Organizing {} budget items...", raw_items.len()),
        );

        let items: Vec<BudgetItem> = raw_items
            .into_iter()
            .map(|raw| self.normalize(raw))
            .collect();

        tally.finalize_cost(self.options.cost_per_1k_tokens);
        info!(
            items = items.len(),
            total_tokens = tally.total_tokens,
            "extraction run complete"
        );

        let now = Utc::now();
        Ok(BudgetData {
            items,
            extracted_at: now,
            processed_at: now,
            usage: saw_usage.then_some(tally),
        })
    }

    /// Validate and default one raw item into the output record.
    ///
    /// Line items get documented defaults for missing or unparseable
    /// fields; separators carry no numeric/unit fields at all.
    fn normalize(&self, raw: RawItem) -> BudgetItem {
        let kind = match raw.kind.as_deref() {
            Some("separator") => ItemKind::Separator,
            _ => ItemKind::Line,
        };

        let description = raw
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());

        let chunks = chunk_field(&description, self.options.max_field_chunk_len);
        let copied_chunks = vec![false; chunks.len()];

        let (quantity, unit, unit_price, total) = match kind {
            ItemKind::Separator => (None, None, None, None),
            ItemKind::Line => (
                Some(coerce_number(raw.quantity.as_ref()).unwrap_or(1.0)),
                Some(
                    raw.unit
                        .filter(|u| !u.trim().is_empty())
                        .unwrap_or_else(|| "ud".to_string()),
                ),
                Some(coerce_number(raw.unit_price.as_ref()).unwrap_or(0.0)),
                Some(coerce_number(raw.total.as_ref()).unwrap_or(0.0)),
            ),
        };

        BudgetItem {
            id: Uuid::new_v4(),
            kind,
            line_id: raw.line_id.filter(|s| !s.trim().is_empty()),
            description,
            chunks,
            quantity,
            unit,
            unit_price,
            total,
            copied_chunks,
            copied_quantity: false,
            copied_unit: false,
            copied_unit_price: false,
            copied_total: false,
        }
    }
}

fn report(progress: Option<&dyn ProgressSink>, status: &str) {
    if let Some(sink) = progress {
        sink.report(status);
    }
}
