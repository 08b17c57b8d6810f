//! Cross-dataset checks between brands and receipt items

use super::profile::render_value;
use super::receipts::receipt_items;
use super::types::{KeyCoverage, MatchCount};
use crate::types::present;
use serde_json::Value;
use std::collections::HashSet;

/// Every item's value for `key`, `None` where the item lacks it
pub fn item_values<'a>(
    receipts: &'a [Value],
    item_field: &str,
    key: &str,
) -> Vec<Option<&'a Value>> {
    receipts
        .iter()
        .flat_map(|r| receipt_items(r, item_field))
        .map(|item| present(item, key))
        .collect()
}

fn distinct<'a, I: IntoIterator<Item = &'a Value>>(values: I) -> HashSet<String> {
    values.into_iter().map(render_value).collect()
}

/// How many distinct values of `key` in receipt items also appear in brands
pub fn join_key_coverage(
    brands: &[Value],
    receipts: &[Value],
    item_field: &str,
    key: &str,
) -> KeyCoverage {
    let brand_values = distinct(brands.iter().filter_map(|b| present(b, key)));
    let receipt_values = distinct(item_values(receipts, item_field, key).into_iter().flatten());

    KeyCoverage {
        key: key.to_string(),
        brands_unique: brand_values.len(),
        receipts_unique: receipt_values.len(),
        matched: receipt_values.intersection(&brand_values).count(),
    }
}

/// Brands whose `brandCode` equals their `name`, ignoring case
pub fn brand_code_name_matches(brands: &[Value]) -> MatchCount {
    let matches = brands
        .iter()
        .filter(|b| {
            match (
                present(b, "brandCode").and_then(Value::as_str),
                present(b, "name").and_then(Value::as_str),
            ) {
                (Some(code), Some(name)) => code.to_lowercase() == name.to_lowercase(),
                _ => false,
            }
        })
        .count();

    MatchCount {
        matches,
        total: brands.len(),
    }
}

/// Records whose `field` is neither `true` nor `false`
pub fn non_boolean_values(records: &[Value], field: &str) -> usize {
    records
        .iter()
        .filter(|r| !matches!(r.get(field), Some(Value::Bool(_))))
        .count()
}
