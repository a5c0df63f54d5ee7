//! LLM prompt for budget item extraction.
//!
//! The model is asked for JSON-only output; the reply must match the
//! `{"items": [...]}` shape parsed by the extraction client.

/// Prompt for extracting line items and separators from one text chunk.
pub const EXTRACT_ITEMS_PROMPT: &str = r#"Extract budget items from this construction budget PDF text chunk {chunk}. Extract both line items and category separators:

For LINE ITEMS, identify:
- lineId: Any item number from PDF (like "1.1", "A.01", "001", etc.) or null if none
- description: Full text describing the work/item
- quantity: Numeric value (default 1 if unclear)
- unit: Unit like "m²", "ml", "ud", "h", etc. (default "ud" if unclear)
- unitPrice: Price per unit in euros (default 0 if unclear)
- total: Total cost in euros (default 0 if unclear)

For SEPARATORS (category headers, section titles), identify:
- description: The header/category text
- Set all other fields to null/0

Return JSON in this exact format:
{
  "items": [
    {
      "type": "separator",
      "lineId": null,
      "description": "Category or section header text",
      "quantity": null,
      "unit": null,
      "unitPrice": 0,
      "total": 0
    },
    {
      "type": "line",
      "lineId": "1.1",
      "description": "Line item description",
      "quantity": 5,
      "unit": "m²",
      "unitPrice": 25.50,
      "total": 127.50
    }
  ]
}

Text to process:
{text}"#;

/// Format the extraction prompt for one chunk.
///
/// `chunk_index` is zero-based; the prompt shows it one-based.
pub fn format_extract_prompt(chunk_index: usize, chunk_text: &str) -> String {
    EXTRACT_ITEMS_PROMPT
        .replace("{chunk}", &(chunk_index + 1).to_string())
        .replace("{text}", chunk_text)
}
