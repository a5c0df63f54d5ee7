//! Integration tests for the extraction pipeline.
//!
//! These drive the orchestrator end-to-end over the scripted mock model:
//! segmentation, sequential chunk processing, usage aggregation, failure
//! propagation and normalization.

use std::sync::Mutex;

use budget_extraction::{
    segment, testing::MockModel, ChunkOutcome, ChunkUsage, ExtractError, ExtractOptions,
    Extractor, ItemKind, RawItem,
};
use serde_json::json;

/// Nine 16-char lines; with a 50-char budget the segmenter cuts them
/// into exactly three chunks of three lines each.
fn three_chunk_text() -> String {
    (0..9)
        .map(|i| format!("fila numero {i:04}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn options() -> ExtractOptions {
    ExtractOptions::new()
        .with_max_chunk_size(50)
        .with_inter_chunk_delay_ms(0)
}

#[test]
fn test_fixture_segments_into_three_chunks() {
    let chunks = segment(&three_chunk_text(), 50);
    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert_eq!(chunk.lines().count(), 3);
        assert!(chunk.len() <= 50);
    }
}

#[tokio::test]
async fn test_items_ordered_by_chunk_then_model_order() {
    let model = MockModel::new()
        .with_items(0, vec![RawItem::line("A"), RawItem::line("B")])
        .with_items(1, vec![RawItem::line("C")])
        .with_items(2, vec![RawItem::line("D")]);
    let extractor = Extractor::with_options(model, options());

    let data = extractor.extract(&three_chunk_text(), None).await.unwrap();

    let descriptions: Vec<_> = data.items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(descriptions, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_chunks_processed_strictly_in_order() {
    let model = MockModel::new();
    let probe = model.clone(); // shares the call log
    let extractor = Extractor::with_options(model, options());

    extractor.extract(&three_chunk_text(), None).await.unwrap();

    let indices: Vec<_> = probe.calls().iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_failed_run_stops_calling_the_model() {
    let model = MockModel::new().fail_transport(1, "connection refused");
    let probe = model.clone();
    let extractor = Extractor::with_options(model, options());

    let err = extractor.extract(&three_chunk_text(), None).await.unwrap_err();
    assert!(matches!(err, ExtractError::Chunk { index: 1, .. }));

    // Chunk 3 is never attempted after the fatal failure.
    let indices: Vec<_> = probe.calls().iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[tokio::test]
async fn test_usage_aggregation_and_cost() {
    let model = MockModel::new()
        .with_outcome(
            0,
            ChunkOutcome::new(vec![RawItem::line("A")]).with_usage(ChunkUsage::new(10, 20, 30)),
        )
        .with_outcome(
            1,
            ChunkOutcome::new(vec![RawItem::line("B")]).with_usage(ChunkUsage::new(5, 5, 10)),
        )
        .with_outcome(
            2,
            ChunkOutcome::new(vec![RawItem::line("C")]).with_usage(ChunkUsage::new(0, 0, 0)),
        );
    let extractor = Extractor::with_options(model, options().with_cost_per_1k_tokens(0.5));

    let data = extractor.extract(&three_chunk_text(), None).await.unwrap();

    let usage = data.usage.expect("usage was reported");
    assert_eq!(usage.input_tokens, 15);
    assert_eq!(usage.output_tokens, 25);
    assert_eq!(usage.total_tokens, 40);
    assert!((usage.estimated_cost - 0.02).abs() < 1e-12);
}

#[tokio::test]
async fn test_usage_absent_when_never_reported() {
    let model = MockModel::new(); // default echo reports no usage
    let extractor = Extractor::with_options(model, options());

    let data = extractor.extract(&three_chunk_text(), None).await.unwrap();

    assert!(data.usage.is_none());
}

#[tokio::test]
async fn test_failure_aborts_run_and_reports_progress() {
    let model = MockModel::new().fail_parse(1);
    let extractor = Extractor::with_options(model, options());

    let messages = Mutex::new(Vec::new());
    let sink = |status: &str| messages.lock().unwrap().push(status.to_string());

    let err = extractor
        .extract(&three_chunk_text(), Some(&sink))
        .await
        .unwrap_err();

    match err {
        ExtractError::Chunk { index, total, .. } => {
            assert_eq!(index, 1);
            assert_eq!(total, 3);
        }
        other => panic!("expected chunk error, got {other:?}"),
    }

    let messages = messages.into_inner().unwrap();
    assert!(
        messages.iter().any(|m| m.contains("chunk 2")),
        "progress must mention the failed chunk: {messages:?}"
    );
    // The run aborted before the assembly stage.
    assert!(!messages.iter().any(|m| m.contains("Organizing")));
}

#[tokio::test]
async fn test_progress_message_sequence() {
    let model = MockModel::new();
    let extractor = Extractor::with_options(model, options());

    let messages = Mutex::new(Vec::new());
    let sink = |status: &str| messages.lock().unwrap().push(status.to_string());

    extractor
        .extract(&three_chunk_text(), Some(&sink))
        .await
        .unwrap();

    let messages = messages.into_inner().unwrap();
    assert!(messages[0].contains("Processing 3 chunks"));
    assert!(messages.iter().any(|m| m.contains("Processing chunk 1 of 3")));
    assert!(messages.iter().any(|m| m.contains("Chunk 3/3")));
    assert!(messages.last().unwrap().contains("Organizing 3 budget items"));
}

#[tokio::test]
async fn test_default_filling_through_pipeline() {
    let raw_line = RawItem {
        kind: Some("line".to_string()),
        description: Some("Partida sin datos".to_string()),
        quantity: Some(json!("unclear")),
        ..Default::default()
    };
    let raw_separator = RawItem::separator("ALBAÑILERÍA");

    let model = MockModel::new()
        .with_items(0, vec![raw_line, raw_separator])
        .with_items(1, vec![])
        .with_items(2, vec![]);
    let extractor = Extractor::with_options(model, options());

    let data = extractor.extract(&three_chunk_text(), None).await.unwrap();

    assert_eq!(data.items.len(), 2);

    let line = &data.items[0];
    assert_eq!(line.kind, ItemKind::Line);
    assert_eq!(line.quantity, Some(1.0));
    assert_eq!(line.unit.as_deref(), Some("ud"));
    assert_eq!(line.unit_price, Some(0.0));
    assert_eq!(line.total, Some(0.0));

    let separator = &data.items[1];
    assert_eq!(separator.kind, ItemKind::Separator);
    assert!(separator.quantity.is_none());
    assert!(separator.unit.is_none());
    assert!(separator.unit_price.is_none());
    assert!(separator.total.is_none());
}

#[tokio::test]
async fn test_empty_input_yields_empty_result() {
    let extractor = Extractor::with_options(MockModel::new(), options());

    let data = extractor.extract("", None).await.unwrap();

    assert!(data.items.is_empty());
    assert!(data.usage.is_none());
}

#[tokio::test]
async fn test_large_document_end_to_end() {
    // 45,000 characters, no blank lines: 900 lines of 49 chars.
    let line = "x".repeat(49);
    let text = std::iter::repeat(line)
        .take(900)
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(text.len(), 44_999);

    let chunks = segment(&text, 20_000);
    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(chunk.len() <= 20_000, "chunk over budget: {}", chunk.len());
    }

    let extractor = Extractor::with_options(
        MockModel::new(),
        ExtractOptions::new().with_inter_chunk_delay_ms(0),
    );
    let data = extractor.extract(&text, None).await.unwrap();

    assert_eq!(data.items.len(), 3);
    let descriptions: Vec<_> = data.items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["Item from chunk 1", "Item from chunk 2", "Item from chunk 3"]
    );

    // Fresh unique ids, copy flags all false, chunk/flag lengths match.
    let mut ids: Vec<_> = data.items.iter().map(|i| i.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    for item in &data.items {
        assert_eq!(item.chunks.len(), item.copied_chunks.len());
        assert!(item.copied_chunks.iter().all(|c| !c));
    }

    assert!(data.extracted_at <= chrono::Utc::now());
    assert_eq!(data.extracted_at, data.processed_at);
}

#[tokio::test]
async fn test_zero_chunk_budget_is_config_error() {
    let extractor = Extractor::with_options(
        MockModel::new(),
        ExtractOptions::new().with_max_chunk_size(0),
    );

    let err = extractor.extract("texto", None).await.unwrap_err();
    assert!(matches!(err, ExtractError::Config { .. }));
}
