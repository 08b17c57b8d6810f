//! Data-quality check tests

use super::*;
use crate::types::Dataset;
use serde_json::{json, Value};

fn users() -> Vec<Value> {
    vec![
        json!({"_id": {"$oid": "u1"}, "active": true, "role": "consumer", "state": "WI"}),
        json!({"_id": {"$oid": "u1"}, "active": true, "role": "consumer", "state": "WI"}),
        json!({"_id": {"$oid": "u2"}, "active": false, "role": "fetch-staff"}),
        json!({"_id": {"$oid": "u3"}, "active": true, "role": "consumer", "state": null}),
    ]
}

fn brands() -> Vec<Value> {
    vec![
        json!({"_id": {"$oid": "b1"}, "barcode": "511111004790", "brandCode": "ALEXA", "name": "alexa", "topBrand": false}),
        json!({"_id": {"$oid": "b2"}, "barcode": "511111004790", "brandCode": "BITTEN", "name": "Bitten Dressing"}),
        json!({"_id": {"$oid": "b3"}, "barcode": "511111204923", "name": "Brand1", "topBrand": true}),
    ]
}

fn receipts() -> Vec<Value> {
    vec![
        json!({
            "_id": {"$oid": "r1"},
            "rewardsReceiptStatus": "FINISHED",
            "totalSpent": "58.00",
            "purchaseDate": {"$date": 1_609_632_000_000_i64},
            "createDate": {"$date": 1_609_687_531_000_i64},
            "rewardsReceiptItemList": [
                {"barcode": "511111004790", "brandCode": "ALEXA", "itemPrice": "29.00", "finalPrice": "29.00", "partnerItemId": "1"},
                {"barcode": "511111004790", "itemPrice": "29.00", "finalPrice": "29.00", "partnerItemId": "2"}
            ]
        }),
        json!({
            "_id": {"$oid": "r2"},
            "rewardsReceiptStatus": "FINISHED",
            "totalSpent": "10.00",
            "purchaseDate": {"$date": 1_609_700_000_000_i64},
            "createDate": {"$date": 1_609_687_531_000_i64},
            "rewardsReceiptItemList": [
                {"barcode": "999", "itemPrice": "4.99", "finalPrice": "2.88", "partnerItemId": "1213"},
                {"description": "ITEM NOT FOUND", "partnerItemId": "1214"}
            ]
        }),
        json!({
            "_id": {"$oid": "r3"},
            "rewardsReceiptStatus": "SUBMITTED",
            "purchasedItemCount": -1,
            "createDate": {"$date": 1_609_687_531_000_i64}
        }),
    ]
}

// ============================================================================
// Profile
// ============================================================================

#[test]
fn test_duplicate_records() {
    assert_eq!(duplicate_records(&users()), 1);
    assert_eq!(duplicate_records(&brands()), 0);
    assert_eq!(duplicate_records(&[]), 0);
}

#[test]
fn test_missing_values() {
    let missing = missing_values(&users());
    let state = missing.iter().find(|m| m.field == "state").unwrap();
    assert_eq!(state.missing, 2);
    assert!((state.pct - 50.0).abs() < f64::EPSILON);

    let role = missing.iter().find(|m| m.field == "role").unwrap();
    assert_eq!(role.missing, 0);
}

#[test]
fn test_id_stats() {
    let stats = id_stats(&users(), "_id");
    assert_eq!(stats.unique, 3);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.missing, 0);
    assert_eq!(
        stats.repeated,
        vec![ValueCount {
            value: "u1".to_string(),
            count: 2
        }]
    );
}

#[test]
fn test_id_stats_counts_missing_ids() {
    let records = vec![json!({"name": "x"}), json!({"_id": null}), json!({"_id": "a"})];
    let stats = id_stats(&records, "_id");
    assert_eq!(stats.missing, 2);
    assert_eq!(stats.unique, 1);
}

#[test]
fn test_profile_dataset() {
    let profile = profile_dataset("users", &users(), "_id");
    assert_eq!(profile.name, "users");
    assert_eq!(profile.total, 4);
    assert_eq!(profile.duplicate_records, 1);
    assert_eq!(profile.missing.len(), 4);
}

#[test]
fn test_profile_empty_dataset() {
    let profile = profile_dataset("brands", &[], "_id");
    assert_eq!(profile.total, 0);
    assert!(profile.missing.is_empty());
    assert_eq!(profile.ids, IdStats::default());
}

#[test]
fn test_value_counts_sorted_with_missing() {
    let counts = value_counts(&users(), "state");
    assert_eq!(
        counts,
        vec![
            ValueCount {
                value: "WI".to_string(),
                count: 2
            },
            ValueCount {
                value: "null".to_string(),
                count: 2
            },
        ]
    );

    let active = value_counts(&users(), "active");
    assert_eq!(active[0].value, "true");
    assert_eq!(active[0].count, 3);
}

#[test]
fn test_render_value() {
    assert_eq!(render_value(&json!("WI")), "WI");
    assert_eq!(render_value(&json!({"$oid": "abc"})), "abc");
    assert_eq!(render_value(&json!(12)), "12");
    assert_eq!(render_value(&json!(false)), "false");
}

#[test]
fn test_key_frequency() {
    let brands = brands();
    let freq = key_frequency(brands.iter().map(|b| b.get("barcode")));
    assert_eq!(freq.total, 3);
    assert_eq!(freq.missing, 0);
    assert_eq!(freq.unique, 2);
    assert_eq!(freq.duplicated.len(), 1);
    assert_eq!(freq.duplicated[0].value, "511111004790");

    let freq = key_frequency(brands.iter().map(|b| b.get("brandCode")));
    assert_eq!(freq.missing, 1);
    assert!(freq.duplicated.is_empty());
}

#[test]
fn test_composite_key_stats() {
    let records = vec![
        json!({"receipt_id": "r1", "barcode": "1"}),
        json!({"receipt_id": "r1", "barcode": "1"}),
        json!({"receipt_id": "r1"}),
        json!({"receipt_id": "r2", "barcode": null}),
        json!({"other": true}),
    ];
    let stats = composite_key_stats(&records, &["receipt_id", "barcode"]);
    assert_eq!(stats.unique, 3);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.missing, 1);
    assert_eq!(
        stats.repeated,
        vec![ValueCount {
            value: "r1+1".to_string(),
            count: 2
        }]
    );
}

#[test]
fn test_missing_together() {
    let records = vec![
        json!({"bonusPointsEarned": 5, "bonusPointsEarnedReason": "Receipt number 1 completed"}),
        json!({"_id": "r2"}),
        json!({"bonusPointsEarned": 10, "bonusPointsEarnedReason": null}),
    ];
    let result = missing_together(&records, "bonusPointsEarnedReason", "bonusPointsEarned");
    assert_eq!(result.field_missing, 2);
    assert_eq!(result.both_missing, 1);
    assert!(!result.always());

    let result = missing_together(&records[..2], "bonusPointsEarnedReason", "bonusPointsEarned");
    assert!(result.always());
}

// ============================================================================
// Brands
// ============================================================================

#[test]
fn test_barcodes_shared_by_several_brands() {
    let mappings = conflicting_mappings(&brands(), "barcode", "name");
    assert_eq!(
        mappings,
        vec![ConflictingMapping {
            value: "511111004790".to_string(),
            mapped: vec!["Bitten Dressing".to_string(), "alexa".to_string()],
        }]
    );
}

#[test]
fn test_names_with_several_brand_codes() {
    let brands = vec![
        json!({"name": "Pull-Ups", "brandCode": "PULL UPS"}),
        json!({"name": "Pull-Ups", "brandCode": "PULLUPS"}),
        json!({"name": "Pace", "brandCode": "PACE"}),
        json!({"name": "Pace", "brandCode": "PACE"}),
        json!({"name": "Pace"}),
    ];
    let mappings = conflicting_mappings(&brands, "name", "brandCode");
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].value, "Pull-Ups");
    assert_eq!(mappings[0].mapped, vec!["PULL UPS", "PULLUPS"]);

    let names = key_frequency(brands.iter().map(|b| b.get("name")));
    assert_eq!(names.unique, 2);
    assert_eq!(names.duplicated[0].value, "Pace");
    assert_eq!(names.duplicated[0].count, 3);
}

#[test]
fn test_categories_with_single_code_are_consistent() {
    let brands = vec![
        json!({"category": "Baking", "categoryCode": "BAKING"}),
        json!({"category": "Baking", "categoryCode": "BAKING"}),
        json!({"category": "Beverages"}),
    ];
    assert!(conflicting_mappings(&brands, "category", "categoryCode").is_empty());
}

// ============================================================================
// Joins
// ============================================================================

#[test]
fn test_join_key_coverage() {
    let coverage = join_key_coverage(&brands(), &receipts(), ITEM_LIST_FIELD, "barcode");
    assert_eq!(coverage.brands_unique, 2);
    assert_eq!(coverage.receipts_unique, 2);
    assert_eq!(coverage.matched, 1);

    let coverage = join_key_coverage(&brands(), &receipts(), ITEM_LIST_FIELD, "brandCode");
    assert_eq!(coverage.receipts_unique, 1);
    assert_eq!(coverage.matched, 1);
}

#[test]
fn test_brand_code_name_matches() {
    let result = brand_code_name_matches(&brands());
    assert_eq!(result.matches, 1);
    assert_eq!(result.total, 3);
}

#[test]
fn test_non_boolean_values() {
    assert_eq!(non_boolean_values(&brands(), "topBrand"), 1);
}

#[test]
fn test_item_values() {
    let receipts = receipts();
    let values = item_values(&receipts, ITEM_LIST_FIELD, "barcode");
    assert_eq!(values.len(), 4);
    assert_eq!(values.iter().filter(|v| v.is_none()).count(), 1);
}

// ============================================================================
// Receipts
// ============================================================================

#[test]
fn test_price_mismatches() {
    let mismatches = price_mismatches(&receipts(), ITEM_LIST_FIELD);
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].receipt_id, "r2");
    assert_eq!(mismatches[0].partner_item_id.as_deref(), Some("1213"));
    assert_eq!(mismatches[0].item_price, Some(4.99));
    assert_eq!(mismatches[0].final_price, Some(2.88));
}

#[test]
fn test_price_mismatch_one_sided() {
    let receipts = vec![json!({
        "_id": "r",
        "rewardsReceiptItemList": [{"itemPrice": 1.0}]
    })];
    assert_eq!(price_mismatches(&receipts, ITEM_LIST_FIELD).len(), 1);
}

#[test]
fn test_spend_reconciliation() {
    let result = spend_reconciliation(&receipts(), ITEM_LIST_FIELD);
    assert_eq!(result.compared, 2);
    assert_eq!(result.discrepancies.len(), 1);

    let d = &result.discrepancies[0];
    assert_eq!(d.receipt_id, "r2");
    assert!((d.total_spent - 10.0).abs() < 1e-9);
    assert!((d.item_sum - 2.88).abs() < 1e-9);
}

#[test]
fn test_negative_values() {
    assert_eq!(negative_values(&receipts(), "purchasedItemCount"), 1);
    assert_eq!(negative_values(&receipts(), "totalSpent"), 0);
}

#[test]
fn test_date_consistency() {
    let result = date_consistency(&receipts(), "purchaseDate", "createDate");
    assert_eq!(result.compared, 2);
    assert_eq!(result.equal, 0);
    assert_eq!(result.earlier_or_equal, 1);
    assert_eq!(result.later, 1);
}

#[test]
fn test_missing_by_status() {
    let result = missing_by_status(&receipts(), "rewardsReceiptStatus", ITEM_LIST_FIELD);
    assert_eq!(result.len(), 2);

    assert_eq!(result[0].status, "FINISHED");
    assert_eq!(result[0].receipts, 2);
    assert_eq!(result[0].missing_items, 0);

    assert_eq!(result[1].status, "SUBMITTED");
    assert_eq!(result[1].missing_items, 1);
    assert_eq!(result[1].missing_total_spent, 1);
}

// ============================================================================
// Items
// ============================================================================

#[test]
fn test_flatten_items_links_receipt() {
    let items = flatten_items(&receipts(), ITEM_LIST_FIELD);
    assert_eq!(items.len(), 4);
    assert_eq!(items[0][RECEIPT_ID_FIELD], "r1");
    assert_eq!(items[0]["partnerItemId"], "1");
    assert_eq!(items[3][RECEIPT_ID_FIELD], "r2");
    assert_eq!(items[3]["description"], "ITEM NOT FOUND");
}

#[test]
fn test_flatten_items_without_receipt_id() {
    let receipts = vec![json!({"rewardsReceiptItemList": [{"barcode": "1"}, "junk"]})];
    let items = flatten_items(&receipts, ITEM_LIST_FIELD);
    assert_eq!(items.len(), 1);
    assert!(items[0][RECEIPT_ID_FIELD].is_null());
}

#[test]
fn test_item_composite_keys() {
    let items = flatten_items(&receipts(), ITEM_LIST_FIELD);

    let by_barcode = composite_key_stats(&items, &[RECEIPT_ID_FIELD, "barcode"]);
    assert_eq!(by_barcode.unique, 3);
    assert_eq!(by_barcode.duplicates, 1);
    assert_eq!(by_barcode.repeated[0].value, "r1+511111004790");

    let by_partner = composite_key_stats(&items, &[RECEIPT_ID_FIELD, "partnerItemId"]);
    assert_eq!(by_partner.unique, 4);
    assert_eq!(by_partner.duplicates, 0);
}

#[test]
fn test_item_negative_values() {
    let receipts = vec![json!({
        "_id": "r",
        "rewardsReceiptItemList": [
            {"itemPrice": "-1.00", "quantityPurchased": 1},
            {"itemPrice": "2.00", "quantityPurchased": -3}
        ]
    })];
    let items = flatten_items(&receipts, ITEM_LIST_FIELD);
    assert_eq!(negative_values(&items, "itemPrice"), 1);
    assert_eq!(negative_values(&items, "quantityPurchased"), 1);
    assert_eq!(negative_values(&items, "finalPrice"), 0);
}

#[test]
fn test_missing_review_reasons() {
    let items = vec![
        json!({"needsFetchReview": true}),
        json!({"needsFetchReview": true, "needsFetchReviewReason": "USER_FLAGGED"}),
        json!({"needsFetchReview": false}),
        json!({"needsFetchReviewReason": null}),
    ];
    assert_eq!(missing_review_reasons(&items), 1);
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_build_report_all_sections() {
    let datasets = vec![
        Dataset::new("receipts", receipts()),
        Dataset::new("users", users()),
        Dataset::new("brands", brands()),
    ];
    let report = build_report(&datasets, "_id");

    assert_eq!(report.profiles.len(), 3);
    assert!(report.users.is_some());
    assert!(report.brands.is_some());
    let receipt_checks = report.receipts.as_ref().unwrap();
    assert_eq!(receipt_checks.negative_values.len(), 4);
    let joins = report.joins.as_ref().unwrap();
    assert_eq!(joins.barcode.matched, 1);

    let brand_checks = report.brands.as_ref().unwrap();
    assert_eq!(brand_checks.barcodes_with_several_names.len(), 1);
    assert!(brand_checks.names_with_several_codes.is_empty());

    let items = report.items.as_ref().unwrap();
    assert_eq!(items.profile.name, ITEMS_DATASET);
    assert_eq!(items.profile.total, 4);
    assert_eq!(items.profile.ids.duplicates, 1);
    assert_eq!(items.negative_values.len(), 3);
    assert_eq!(items.missing_review_reason, 0);
    assert_eq!(receipt_checks.bonus_reason_vs_points.field_missing, 3);
    assert!(receipt_checks.bonus_reason_vs_points.always());

    let text = report.to_string();
    assert!(text.contains("DATA QUALITY CHECKS FOR USERS"));
    assert!(text.contains("Duplicate records: 1"));
    assert!(text.contains("Matching barcode: 1 / 2 unique values in receipts"));
    assert!(text.contains("Negative purchasedItemCount values: 1"));
    assert!(text.contains("DATA QUALITY CHECKS FOR REWARDS_ITEMS"));
    assert!(text.contains("Barcodes shared by several brands: 1"));
    assert!(text.contains("  511111004790: Bitten Dressing, alexa"));
    assert!(text.contains("Missing review reasons: 0"));
}

#[test]
fn test_build_report_without_receipts() {
    let datasets = vec![Dataset::new("brands", brands())];
    let report = build_report(&datasets, "_id");

    assert!(report.brands.is_some());
    assert!(report.receipts.is_none());
    assert!(report.joins.is_none());

    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("receipts").is_none());
    assert!(value.get("items").is_none());
    assert_eq!(value["brands"]["brand_code_matches_name"]["matches"], 1);
}
