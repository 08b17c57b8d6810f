//! Data-quality checks
//!
//! Pure functions over in-memory records. Each check returns a serializable
//! report value; nothing is cached between calls.
//!
//! # Checks
//!
//! - **Profile**: duplicate records, missing values, identifier uniqueness
//! - **Value counts**: distribution of a field's values
//! - **Join keys**: barcode / brandCode overlap between brands and receipt items
//! - **Brands**: duplicate names, names or barcodes mapped to several values
//! - **Receipts**: price mismatches, total reconciliation, date ordering
//! - **Items**: receipt items flattened and profiled on their own

mod items;
mod joins;
mod profile;
mod receipts;
mod report;
mod types;

pub use items::{flatten_items, missing_review_reasons, ITEMS_DATASET, RECEIPT_ID_FIELD};
pub use joins::{brand_code_name_matches, item_values, join_key_coverage, non_boolean_values};
pub use profile::{
    composite_key_stats, conflicting_mappings, duplicate_records, id_stats, key_frequency,
    missing_together, missing_values, profile_dataset, render_value, value_counts,
};
pub use receipts::{
    date_consistency, missing_by_status, negative_values, price_mismatches, receipt_items,
    spend_reconciliation, ITEM_LIST_FIELD,
};
pub use report::build_report;
pub use types::*;

#[cfg(test)]
mod tests;
