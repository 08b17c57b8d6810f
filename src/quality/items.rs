//! Receipt items as a dataset of their own

use super::receipts::receipt_items;
use crate::types::{id_string, present};
use serde_json::Value;

/// Name of the flattened item dataset
pub const ITEMS_DATASET: &str = "rewards_items";

/// Field linking a flattened item back to its receipt
pub const RECEIPT_ID_FIELD: &str = "receipt_id";

/// Flatten every receipt's items into standalone records
///
/// Each item gains a `receipt_id` holding its receipt's identifier (`null`
/// when the receipt has none). Items that are not mappings are dropped.
pub fn flatten_items(receipts: &[Value], item_field: &str) -> Vec<Value> {
    let mut out = Vec::new();
    for receipt in receipts {
        let receipt_id = present(receipt, "_id")
            .and_then(id_string)
            .map_or(Value::Null, Value::String);

        for item in receipt_items(receipt, item_field) {
            if let Value::Object(map) = item {
                let mut map = map.clone();
                map.insert(RECEIPT_ID_FIELD.to_string(), receipt_id.clone());
                out.push(Value::Object(map));
            }
        }
    }
    out
}

/// Items flagged `needsFetchReview: true` without a `needsFetchReviewReason`
pub fn missing_review_reasons(items: &[Value]) -> usize {
    items
        .iter()
        .filter(|item| matches!(present(item, "needsFetchReview"), Some(Value::Bool(true))))
        .filter(|item| present(item, "needsFetchReviewReason").is_none())
        .count()
}
