//! Budget item types: the loose model-reported shape and the validated record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Kind of budget entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A priced line item with quantity, unit and prices
    Line,
    /// A category header with no numeric fields
    Separator,
}

/// An item exactly as the model reported it, before validation.
///
/// Every field is optional and numerics are loosely typed: the model may
/// emit numbers, numeric strings or nulls. Coercion and defaulting happen
/// at the orchestrator boundary, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    /// `"line"` or `"separator"`; anything else is treated as a line item
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub line_id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub quantity: Option<Value>,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub unit_price: Option<Value>,

    #[serde(default)]
    pub total: Option<Value>,
}

impl RawItem {
    /// Create a raw line item with a description.
    pub fn line(description: impl Into<String>) -> Self {
        Self {
            kind: Some("line".to_string()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Create a raw separator item with a description.
    pub fn separator(description: impl Into<String>) -> Self {
        Self {
            kind: Some("separator".to_string()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Set the document line id (e.g. `"1.1"`, `"A.01"`).
    pub fn with_line_id(mut self, line_id: impl Into<String>) -> Self {
        self.line_id = Some(line_id.into());
        self
    }

    /// Set the quantity as a loose JSON value.
    pub fn with_quantity(mut self, quantity: impl Into<Value>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the unit price as a loose JSON value.
    pub fn with_unit_price(mut self, unit_price: impl Into<Value>) -> Self {
        self.unit_price = Some(unit_price.into());
        self
    }

    /// Set the total as a loose JSON value.
    pub fn with_total(mut self, total: impl Into<Value>) -> Self {
        self.total = Some(total.into());
        self
    }
}

/// A validated budget item ready for display and persistence.
///
/// Serde names match the persisted record shape (`lineId`, `unitPrice`,
/// `copiedChunks`, ...). Numeric and unit fields are `None` for
/// separators. `copied_chunks` always has the same length as `chunks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: ItemKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,

    pub description: String,

    /// Description split into display-sized chunks
    pub chunks: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// One copy flag per description chunk, all false after extraction
    pub copied_chunks: Vec<bool>,

    #[serde(default)]
    pub copied_quantity: bool,

    #[serde(default)]
    pub copied_unit: bool,

    #[serde(default)]
    pub copied_unit_price: bool,

    #[serde(default)]
    pub copied_total: bool,
}

impl BudgetItem {
    /// True for priced line items.
    pub fn is_line(&self) -> bool {
        self.kind == ItemKind::Line
    }
}

/// Coerce a loose JSON value into a number.
///
/// Accepts JSON numbers and numeric strings (`"12.5"`); everything else
/// yields `None` so the caller can apply its documented default.
pub(crate) fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_item_tolerates_missing_fields() {
        let raw: RawItem = serde_json::from_str(r#"{"description": "Hormigón"}"#).unwrap();
        assert!(raw.kind.is_none());
        assert_eq!(raw.description.as_deref(), Some("Hormigón"));
        assert!(raw.quantity.is_none());
    }

    #[test]
    fn test_raw_item_loose_numerics() {
        let raw: RawItem =
            serde_json::from_str(r#"{"quantity": "12.5", "unitPrice": 3, "total": null}"#).unwrap();
        assert_eq!(coerce_number(raw.quantity.as_ref()), Some(12.5));
        assert_eq!(coerce_number(raw.unit_price.as_ref()), Some(3.0));
        assert_eq!(coerce_number(raw.total.as_ref()), None);
    }

    #[test]
    fn test_coerce_number_rejects_garbage() {
        assert_eq!(coerce_number(Some(&json!("a few"))), None);
        assert_eq!(coerce_number(Some(&json!(true))), None);
        assert_eq!(coerce_number(Some(&json!([1, 2]))), None);
        assert_eq!(coerce_number(None), None);
    }

    #[test]
    fn test_budget_item_persisted_field_names() {
        let item = BudgetItem {
            id: Uuid::new_v4(),
            kind: ItemKind::Line,
            line_id: Some("1.1".to_string()),
            description: "Demolición de tabique".to_string(),
            chunks: vec!["Demolición de tabique".to_string()],
            quantity: Some(5.0),
            unit: Some("m²".to_string()),
            unit_price: Some(25.5),
            total: Some(127.5),
            copied_chunks: vec![false],
            copied_quantity: false,
            copied_unit: false,
            copied_unit_price: false,
            copied_total: false,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["lineId"], "1.1");
        assert_eq!(json["unitPrice"], 25.5);
        assert_eq!(json["copiedChunks"], json!([false]));
    }
}
