//! Data-quality report types

use serde::Serialize;

/// Occurrences of one distinct value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    /// Rendered value (`null` for missing)
    pub value: String,
    /// Number of occurrences
    pub count: usize,
}

/// Missing-value statistics of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMissing {
    /// Field name
    pub field: String,
    /// Records where the field is absent or null
    pub missing: usize,
    /// `missing` as a percentage of all records
    pub pct: f64,
}

/// Identifier uniqueness statistics
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IdStats {
    /// Distinct identifiers
    pub unique: usize,
    /// Occurrences beyond the first of an identifier
    pub duplicates: usize,
    /// Records without an identifier
    pub missing: usize,
    /// Identifiers occurring more than once
    pub repeated: Vec<ValueCount>,
}

/// Per-dataset profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    /// Dataset name
    pub name: String,
    /// Number of records
    pub total: usize,
    /// Records identical to an earlier record
    pub duplicate_records: usize,
    /// Missing values per field, in discovery order
    pub missing: Vec<FieldMissing>,
    /// Identifier statistics
    pub ids: IdStats,
}

/// Frequency summary of a candidate key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KeyFrequency {
    /// Entries inspected
    pub total: usize,
    /// Entries without the key
    pub missing: usize,
    /// Distinct values
    pub unique: usize,
    /// Values seen more than once
    pub duplicated: Vec<ValueCount>,
}

/// Overlap of a key between brands and receipt items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCoverage {
    /// Key name
    pub key: String,
    /// Distinct values in brands
    pub brands_unique: usize,
    /// Distinct values in receipt items
    pub receipts_unique: usize,
    /// Distinct values present in both
    pub matched: usize,
}

/// Count of records satisfying a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchCount {
    /// Matching records
    pub matches: usize,
    /// Records inspected
    pub total: usize,
}

/// A receipt item whose listed and final prices differ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMismatch {
    /// Owning receipt
    pub receipt_id: String,
    /// Item identifier within the receipt
    pub partner_item_id: Option<String>,
    /// Listed price
    pub item_price: Option<f64>,
    /// Final price
    pub final_price: Option<f64>,
}

/// A receipt whose item prices do not add up to its total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendDiscrepancy {
    /// Receipt identifier
    pub receipt_id: String,
    /// Receipt-level total
    pub total_spent: f64,
    /// Sum of item final prices
    pub item_sum: f64,
}

/// Result of reconciling item prices against receipt totals
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpendReconciliation {
    /// Receipts with both a total and an item list
    pub compared: usize,
    /// Receipts off by more than a cent
    pub discrepancies: Vec<SpendDiscrepancy>,
}

/// Ordering of two date fields on the same records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateConsistency {
    /// Records carrying both dates
    pub compared: usize,
    /// Both dates equal
    pub equal: usize,
    /// First date at or before the second
    pub earlier_or_equal: usize,
    /// First date after the second
    pub later: usize,
}

/// Missing receipt content for one review status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMissing {
    /// Review status
    pub status: String,
    /// Receipts with this status
    pub receipts: usize,
    /// Receipts without an item list
    pub missing_items: usize,
    /// Receipts without a total
    pub missing_total_spent: usize,
}

/// Number of negative values in a numeric field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegativeCount {
    /// Field name
    pub field: String,
    /// Values below zero
    pub count: usize,
}

/// A value of one field paired with several distinct values of another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictingMapping {
    /// Value of the grouping field
    pub value: String,
    /// Distinct values of the mapped field, sorted
    pub mapped: Vec<String>,
}

/// Whether one field is missing wherever another field is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTogether {
    /// Field whose missing records are inspected
    pub field: String,
    /// Field checked on those records
    pub other: String,
    /// Records missing `field`
    pub field_missing: usize,
    /// Records missing both fields
    pub both_missing: usize,
}

impl MissingTogether {
    /// Every record missing `field` also misses `other`
    pub fn always(&self) -> bool {
        self.field_missing == self.both_missing
    }
}

/// User-specific checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserChecks {
    pub roles: Vec<ValueCount>,
    pub active: Vec<ValueCount>,
    pub sign_up_sources: Vec<ValueCount>,
    pub states: Vec<ValueCount>,
}

/// Brand-specific checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandChecks {
    pub barcodes: KeyFrequency,
    pub names: KeyFrequency,
    pub names_with_several_codes: Vec<ConflictingMapping>,
    pub barcodes_with_several_names: Vec<ConflictingMapping>,
    pub categories_with_several_codes: Vec<ConflictingMapping>,
    pub brand_code_matches_name: MatchCount,
    pub categories: Vec<ValueCount>,
    pub invalid_top_brand: usize,
}

/// Receipt-specific checks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptChecks {
    pub statuses: Vec<ValueCount>,
    pub missing_by_status: Vec<StatusMissing>,
    pub negative_values: Vec<NegativeCount>,
    pub purchase_vs_create: DateConsistency,
    pub item_barcodes: KeyFrequency,
    pub price_mismatches: Vec<PriceMismatch>,
    pub spend: SpendReconciliation,
    pub bonus_reason_vs_points: MissingTogether,
}

/// Checks on receipt items flattened into their own dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemChecks {
    /// Profile keyed by `receipt_id` + `barcode`
    pub profile: DatasetProfile,
    /// Uniqueness of `receipt_id` + `partnerItemId`
    pub receipt_partner_item_key: IdStats,
    pub negative_values: Vec<NegativeCount>,
    /// Items flagged for review without a reason
    pub missing_review_reason: usize,
}

/// Checks spanning brands and receipts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinChecks {
    pub barcode: KeyCoverage,
    pub brand_code: KeyCoverage,
}

/// Full data-quality report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub profiles: Vec<DatasetProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<UserChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<BrandChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipts: Option<ReceiptChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joins: Option<JoinChecks>,
}
