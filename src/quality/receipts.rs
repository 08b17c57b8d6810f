//! Receipt checks: prices, totals, dates, statuses

use super::profile::render_value;
use super::types::{
    DateConsistency, PriceMismatch, SpendDiscrepancy, SpendReconciliation, StatusMissing,
};
use crate::types::{as_datetime, as_f64_lenient, id_string, present};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field holding a receipt's scanned items
pub const ITEM_LIST_FIELD: &str = "rewardsReceiptItemList";

/// Prices closer than this are equal
const PRICE_TOLERANCE: f64 = 0.005;

/// Totals further apart than this are a discrepancy
const SPEND_TOLERANCE: f64 = 0.01;

/// Items of one receipt, empty when absent
pub fn receipt_items<'a>(receipt: &'a Value, item_field: &str) -> &'a [Value] {
    receipt
        .get(item_field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn receipt_id(receipt: &Value) -> String {
    present(receipt, "_id")
        .and_then(id_string)
        .unwrap_or_default()
}

fn price(item: &Value, field: &str) -> Option<f64> {
    present(item, field).and_then(as_f64_lenient)
}

/// Items whose `itemPrice` differs from `finalPrice`
///
/// A price present on one side only counts as a mismatch; items with
/// neither price are skipped.
pub fn price_mismatches(receipts: &[Value], item_field: &str) -> Vec<PriceMismatch> {
    let mut out = Vec::new();
    for receipt in receipts {
        for item in receipt_items(receipt, item_field) {
            let item_price = price(item, "itemPrice");
            let final_price = price(item, "finalPrice");
            let differs = match (item_price, final_price) {
                (Some(a), Some(b)) => (a - b).abs() > PRICE_TOLERANCE,
                (Some(_), None) | (None, Some(_)) => true,
                (None, None) => false,
            };
            if differs {
                out.push(PriceMismatch {
                    receipt_id: receipt_id(receipt),
                    partner_item_id: present(item, "partnerItemId").map(render_value),
                    item_price,
                    final_price,
                });
            }
        }
    }
    out
}

/// Compare each receipt's `totalSpent` with the sum of its items' `finalPrice`
pub fn spend_reconciliation(receipts: &[Value], item_field: &str) -> SpendReconciliation {
    let mut result = SpendReconciliation::default();

    for receipt in receipts {
        let Some(total_spent) = price(receipt, "totalSpent") else {
            continue;
        };
        let items = receipt_items(receipt, item_field);
        if items.is_empty() {
            continue;
        }

        result.compared += 1;
        let item_sum: f64 = items.iter().filter_map(|i| price(i, "finalPrice")).sum();
        if (item_sum - total_spent).abs() > SPEND_TOLERANCE {
            result.discrepancies.push(SpendDiscrepancy {
                receipt_id: receipt_id(receipt),
                total_spent,
                item_sum,
            });
        }
    }

    result
}

/// Number of values of `field` below zero
pub fn negative_values(records: &[Value], field: &str) -> usize {
    records
        .iter()
        .filter_map(|r| present(r, field).and_then(as_f64_lenient))
        .filter(|v| *v < 0.0)
        .count()
}

/// Compare two `$date` fields on every record carrying both
pub fn date_consistency(records: &[Value], first: &str, second: &str) -> DateConsistency {
    let mut result = DateConsistency::default();

    for record in records {
        let a = present(record, first).and_then(as_datetime);
        let b = present(record, second).and_then(as_datetime);
        let (Some(a), Some(b)) = (a, b) else {
            continue;
        };

        result.compared += 1;
        if a == b {
            result.equal += 1;
        }
        if a <= b {
            result.earlier_or_equal += 1;
        } else {
            result.later += 1;
        }
    }

    result
}

/// Per status, receipts lacking an item list or a total
pub fn missing_by_status(
    receipts: &[Value],
    status_field: &str,
    item_field: &str,
) -> Vec<StatusMissing> {
    let mut by_status: BTreeMap<String, StatusMissing> = BTreeMap::new();

    for receipt in receipts {
        let status =
            present(receipt, status_field).map_or_else(|| "null".to_string(), render_value);
        let entry = by_status
            .entry(status.clone())
            .or_insert_with(|| StatusMissing {
                status,
                receipts: 0,
                missing_items: 0,
                missing_total_spent: 0,
            });

        entry.receipts += 1;
        if present(receipt, item_field).is_none() {
            entry.missing_items += 1;
        }
        if present(receipt, "totalSpent").is_none() {
            entry.missing_total_spent += 1;
        }
    }

    by_status.into_values().collect()
}
