//! Report assembly and text rendering

use super::items::{flatten_items, missing_review_reasons, ITEMS_DATASET, RECEIPT_ID_FIELD};
use super::joins::{brand_code_name_matches, item_values, join_key_coverage, non_boolean_values};
use super::profile::{
    composite_key_stats, conflicting_mappings, duplicate_records, key_frequency, missing_together,
    missing_values, profile_dataset, value_counts,
};
use super::receipts::{
    date_consistency, missing_by_status, negative_values, price_mismatches, spend_reconciliation,
    ITEM_LIST_FIELD,
};
use super::types::{
    BrandChecks, ConflictingMapping, DatasetProfile, ItemChecks, JoinChecks, KeyFrequency,
    NegativeCount, QualityReport, ReceiptChecks, UserChecks, ValueCount,
};
use crate::types::{present, Dataset};
use serde_json::Value;
use std::fmt::{self, Write as _};
use tracing::debug;

/// Numeric receipt fields expected to be non-negative
const NON_NEGATIVE_RECEIPT_FIELDS: [&str; 4] = [
    "totalSpent",
    "purchasedItemCount",
    "bonusPointsEarned",
    "pointsEarned",
];

/// Numeric item fields expected to be non-negative
const NON_NEGATIVE_ITEM_FIELDS: [&str; 3] = ["itemPrice", "finalPrice", "quantityPurchased"];

/// Run every check that applies to the given datasets
///
/// Each dataset is profiled. Dataset-specific sections are filled when a
/// dataset named `users`, `brands` or `receipts` is present; receipts also
/// yield a section on their flattened items.
pub fn build_report(datasets: &[Dataset], id_field: &str) -> QualityReport {
    let find = |name: &str| {
        datasets
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.records.as_slice())
    };

    let profiles = datasets
        .iter()
        .map(|d| {
            debug!("Profiling dataset '{}' ({} records)", d.name, d.len());
            profile_dataset(&d.name, &d.records, id_field)
        })
        .collect();

    let users = find("users").map(user_checks);
    let brands = find("brands").map(brand_checks);
    let receipts = find("receipts").map(receipt_checks);
    let items = find("receipts").map(|r| item_checks(&flatten_items(r, ITEM_LIST_FIELD)));
    let joins = match (find("brands"), find("receipts")) {
        (Some(b), Some(r)) => Some(JoinChecks {
            barcode: join_key_coverage(b, r, ITEM_LIST_FIELD, "barcode"),
            brand_code: join_key_coverage(b, r, ITEM_LIST_FIELD, "brandCode"),
        }),
        _ => None,
    };

    QualityReport {
        profiles,
        users,
        brands,
        receipts,
        items,
        joins,
    }
}

fn user_checks(users: &[Value]) -> UserChecks {
    UserChecks {
        roles: value_counts(users, "role"),
        active: value_counts(users, "active"),
        sign_up_sources: value_counts(users, "signUpSource"),
        states: value_counts(users, "state"),
    }
}

fn brand_checks(brands: &[Value]) -> BrandChecks {
    BrandChecks {
        barcodes: key_frequency(brands.iter().map(|b| present(b, "barcode"))),
        names: key_frequency(brands.iter().map(|b| present(b, "name"))),
        names_with_several_codes: conflicting_mappings(brands, "name", "brandCode"),
        barcodes_with_several_names: conflicting_mappings(brands, "barcode", "name"),
        categories_with_several_codes: conflicting_mappings(brands, "category", "categoryCode"),
        brand_code_matches_name: brand_code_name_matches(brands),
        categories: value_counts(brands, "category"),
        invalid_top_brand: non_boolean_values(brands, "topBrand"),
    }
}

fn receipt_checks(receipts: &[Value]) -> ReceiptChecks {
    ReceiptChecks {
        statuses: value_counts(receipts, "rewardsReceiptStatus"),
        missing_by_status: missing_by_status(receipts, "rewardsReceiptStatus", ITEM_LIST_FIELD),
        negative_values: negative_counts(receipts, &NON_NEGATIVE_RECEIPT_FIELDS),
        purchase_vs_create: date_consistency(receipts, "purchaseDate", "createDate"),
        item_barcodes: key_frequency(item_values(receipts, ITEM_LIST_FIELD, "barcode")),
        price_mismatches: price_mismatches(receipts, ITEM_LIST_FIELD),
        spend: spend_reconciliation(receipts, ITEM_LIST_FIELD),
        bonus_reason_vs_points: missing_together(
            receipts,
            "bonusPointsEarnedReason",
            "bonusPointsEarned",
        ),
    }
}

fn item_checks(items: &[Value]) -> ItemChecks {
    debug!("Profiling {} flattened receipt items", items.len());
    ItemChecks {
        profile: DatasetProfile {
            name: ITEMS_DATASET.to_string(),
            total: items.len(),
            duplicate_records: duplicate_records(items),
            missing: missing_values(items),
            ids: composite_key_stats(items, &[RECEIPT_ID_FIELD, "barcode"]),
        },
        receipt_partner_item_key: composite_key_stats(items, &[RECEIPT_ID_FIELD, "partnerItemId"]),
        negative_values: negative_counts(items, &NON_NEGATIVE_ITEM_FIELDS),
        missing_review_reason: missing_review_reasons(items),
    }
}

fn negative_counts(records: &[Value], fields: &[&str]) -> Vec<NegativeCount> {
    fields
        .iter()
        .map(|field| NegativeCount {
            field: (*field).to_string(),
            count: negative_values(records, field),
        })
        .collect()
}

// ============================================================================
// Text rendering
// ============================================================================

fn write_counts(out: &mut String, title: &str, counts: &[ValueCount]) -> fmt::Result {
    writeln!(out, "{title}:")?;
    for c in counts {
        writeln!(out, "  {:<40} {}", c.value, c.count)?;
    }
    Ok(())
}

fn write_key_frequency(out: &mut String, title: &str, freq: &KeyFrequency) -> fmt::Result {
    writeln!(out, "{title}:")?;
    writeln!(out, "  Total entries: {}", freq.total)?;
    writeln!(out, "  Missing: {}", freq.missing)?;
    writeln!(out, "  Unique: {}", freq.unique)?;
    writeln!(out, "  Duplicated values: {}", freq.duplicated.len())?;
    for c in &freq.duplicated {
        writeln!(out, "    {}: {}", c.value, c.count)?;
    }
    Ok(())
}

fn write_mappings(out: &mut String, title: &str, mappings: &[ConflictingMapping]) -> fmt::Result {
    writeln!(out, "{title}: {}", mappings.len())?;
    for m in mappings {
        writeln!(out, "  {}: {}", m.value, m.mapped.join(", "))?;
    }
    Ok(())
}

fn write_profile(out: &mut String, profile: &DatasetProfile) -> fmt::Result {
    let title = profile.name.to_uppercase();
    writeln!(out, "{} DATA QUALITY CHECKS FOR {title} {}", "=".repeat(20), "=".repeat(20))?;
    writeln!(out, "Total records: {}", profile.total)?;
    writeln!(out, "Duplicate records: {}", profile.duplicate_records)?;
    writeln!(out, "Missing values:")?;
    for m in &profile.missing {
        writeln!(out, "  {:<40} {:>6} {:>8.2}%", m.field, m.missing, m.pct)?;
    }
    writeln!(out, "Unique IDs: {}", profile.ids.unique)?;
    writeln!(out, "Duplicate IDs: {}", profile.ids.duplicates)?;
    writeln!(out, "Records without ID: {}", profile.ids.missing)?;
    for c in profile.ids.repeated.iter().take(10) {
        writeln!(out, "  {}: {}", c.value, c.count)?;
    }
    Ok(())
}

impl QualityReport {
    fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();

        for profile in &self.profiles {
            write_profile(&mut out, profile)?;
            writeln!(out)?;
        }

        if let Some(users) = &self.users {
            write_counts(&mut out, "User roles", &users.roles)?;
            write_counts(&mut out, "Active vs. inactive users", &users.active)?;
            write_counts(&mut out, "User sign-up sources", &users.sign_up_sources)?;
            write_counts(&mut out, "Users by state", &users.states)?;
            writeln!(out)?;
        }

        if let Some(brands) = &self.brands {
            write_key_frequency(&mut out, "Brand barcodes", &brands.barcodes)?;
            writeln!(
                out,
                "brandCode equals name (ignoring case): {}/{}",
                brands.brand_code_matches_name.matches, brands.brand_code_matches_name.total
            )?;
            write_key_frequency(&mut out, "Brand names", &brands.names)?;
            write_mappings(
                &mut out,
                "Brand names with several brandCodes",
                &brands.names_with_several_codes,
            )?;
            write_mappings(
                &mut out,
                "Barcodes shared by several brands",
                &brands.barcodes_with_several_names,
            )?;
            write_counts(&mut out, "Brand categories", &brands.categories)?;
            write_mappings(
                &mut out,
                "Categories with several categoryCodes",
                &brands.categories_with_several_codes,
            )?;
            writeln!(out, "Invalid topBrand values: {}", brands.invalid_top_brand)?;
            writeln!(out)?;
        }

        if let Some(receipts) = &self.receipts {
            write_counts(&mut out, "Receipt statuses", &receipts.statuses)?;
            writeln!(out, "Missing items / totalSpent by status:")?;
            for s in &receipts.missing_by_status {
                writeln!(
                    out,
                    "  {:<12} receipts={} missing_items={} missing_total_spent={}",
                    s.status, s.receipts, s.missing_items, s.missing_total_spent
                )?;
            }
            for n in &receipts.negative_values {
                writeln!(out, "Negative {} values: {}", n.field, n.count)?;
            }
            let dates = &receipts.purchase_vs_create;
            writeln!(
                out,
                "purchaseDate vs createDate: compared={} equal={} earlier_or_equal={} later={}",
                dates.compared, dates.equal, dates.earlier_or_equal, dates.later
            )?;
            write_key_frequency(&mut out, "Receipt item barcodes", &receipts.item_barcodes)?;
            writeln!(
                out,
                "Items with itemPrice != finalPrice: {}",
                receipts.price_mismatches.len()
            )?;
            writeln!(
                out,
                "Receipts where item finalPrice sum != totalSpent: {}/{}",
                receipts.spend.discrepancies.len(),
                receipts.spend.compared
            )?;
            for d in receipts.spend.discrepancies.iter().take(10) {
                writeln!(
                    out,
                    "  {}: totalSpent={:.2} items={:.2}",
                    d.receipt_id, d.total_spent, d.item_sum
                )?;
            }
            let bonus = &receipts.bonus_reason_vs_points;
            writeln!(
                out,
                "Missing {}: {}, also missing {}: {} (always: {})",
                bonus.field,
                bonus.field_missing,
                bonus.other,
                bonus.both_missing,
                bonus.always()
            )?;
            writeln!(out)?;
        }

        if let Some(items) = &self.items {
            write_profile(&mut out, &items.profile)?;
            writeln!(
                out,
                "Duplicate receipt_id+partnerItemId keys: {}",
                items.receipt_partner_item_key.duplicates
            )?;
            for n in &items.negative_values {
                writeln!(out, "Negative {} values: {}", n.field, n.count)?;
            }
            writeln!(out, "Missing review reasons: {}", items.missing_review_reason)?;
            writeln!(out)?;
        }

        if let Some(joins) = &self.joins {
            for coverage in [&joins.barcode, &joins.brand_code] {
                writeln!(
                    out,
                    "Matching {}: {} / {} unique values in receipts, {} unique values in brands",
                    coverage.key, coverage.matched, coverage.receipts_unique, coverage.brands_unique
                )?;
            }
        }

        Ok(out)
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render()?)
    }
}
