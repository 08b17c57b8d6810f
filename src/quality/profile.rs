//! Single-dataset checks: duplicates, missing values, value counts

use super::types::{
    ConflictingMapping, DatasetProfile, FieldMissing, IdStats, KeyFrequency, MissingTogether,
    ValueCount,
};
use crate::schema::FieldCatalog;
use crate::types::{id_string, present};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Render a value for counting and display
///
/// Strings are shown bare, `{"$oid": ..}` by its inner id, anything else as JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) if map.contains_key("$oid") => {
            id_string(value).unwrap_or_else(|| value.to_string())
        }
        other => other.to_string(),
    }
}

/// Count occurrences and sort by count descending, then value
fn tally<I: IntoIterator<Item = String>>(values: I) -> Vec<ValueCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut out: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    out
}

/// Frequency of each distinct value of `field`; missing values count as `null`
pub fn value_counts(records: &[Value], field: &str) -> Vec<ValueCount> {
    tally(records.iter().map(|r| {
        present(r, field).map_or_else(|| "null".to_string(), render_value)
    }))
}

/// Records identical to an earlier record
pub fn duplicate_records(records: &[Value]) -> usize {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !seen.insert(r.to_string()))
        .count()
}

/// Missing count and percentage for every field seen in the dataset
pub fn missing_values(records: &[Value]) -> Vec<FieldMissing> {
    let catalog = FieldCatalog::discover(records);
    let total = records.len();

    catalog
        .fields()
        .map(|field| {
            let missing = records
                .iter()
                .filter(|r| present(r, field).is_none())
                .count();
            FieldMissing {
                field: field.to_string(),
                missing,
                pct: percentage(missing, total),
            }
        })
        .collect()
}

/// Identifier uniqueness within a dataset
pub fn id_stats(records: &[Value], id_field: &str) -> IdStats {
    let mut missing = 0;
    let mut ids = Vec::with_capacity(records.len());
    for record in records {
        match present(record, id_field).and_then(id_string) {
            Some(id) => ids.push(id),
            None => missing += 1,
        }
    }

    key_stats(ids, missing)
}

/// Uniqueness of a key built from several fields
///
/// Parts are joined with `+`; an absent part renders as `null`. Records
/// lacking every part count as missing.
pub fn composite_key_stats(records: &[Value], fields: &[&str]) -> IdStats {
    let mut missing = 0;
    let mut keys = Vec::with_capacity(records.len());
    for record in records {
        let parts: Vec<Option<String>> = fields
            .iter()
            .map(|f| present(record, f).map(render_value))
            .collect();
        if parts.iter().all(Option::is_none) {
            missing += 1;
            continue;
        }
        let key: Vec<String> = parts
            .into_iter()
            .map(|p| p.unwrap_or_else(|| "null".to_string()))
            .collect();
        keys.push(key.join("+"));
    }

    key_stats(keys, missing)
}

fn key_stats(keys: Vec<String>, missing: usize) -> IdStats {
    let counts = tally(keys);
    let unique = counts.len();
    let duplicates = counts.iter().map(|c| c.count - 1).sum();
    let repeated = counts.into_iter().filter(|c| c.count > 1).collect();

    IdStats {
        unique,
        duplicates,
        missing,
        repeated,
    }
}

/// Values of `from` that map to more than one distinct value of `to`
///
/// Records missing either field are ignored. Output is sorted by value.
pub fn conflicting_mappings(records: &[Value], from: &str, to: &str) -> Vec<ConflictingMapping> {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for record in records {
        if let (Some(a), Some(b)) = (present(record, from), present(record, to)) {
            groups
                .entry(render_value(a))
                .or_default()
                .insert(render_value(b));
        }
    }

    groups
        .into_iter()
        .filter(|(_, mapped)| mapped.len() > 1)
        .map(|(value, mapped)| ConflictingMapping {
            value,
            mapped: mapped.into_iter().collect(),
        })
        .collect()
}

/// Among records missing `field`, how many also miss `other`
pub fn missing_together(records: &[Value], field: &str, other: &str) -> MissingTogether {
    let without_field: Vec<&Value> = records
        .iter()
        .filter(|r| present(r, field).is_none())
        .collect();
    let both_missing = without_field
        .iter()
        .filter(|r| present(r, other).is_none())
        .count();

    MissingTogether {
        field: field.to_string(),
        other: other.to_string(),
        field_missing: without_field.len(),
        both_missing,
    }
}

/// Full profile of one dataset
pub fn profile_dataset(name: &str, records: &[Value], id_field: &str) -> DatasetProfile {
    DatasetProfile {
        name: name.to_string(),
        total: records.len(),
        duplicate_records: duplicate_records(records),
        missing: missing_values(records),
        ids: id_stats(records, id_field),
    }
}

/// Frequency summary of a candidate key; `None` entries count as missing
pub fn key_frequency<'a, I>(values: I) -> KeyFrequency
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    let mut total = 0;
    let mut missing = 0;
    let mut rendered = Vec::new();
    for value in values {
        total += 1;
        match value.filter(|v| !v.is_null()) {
            Some(v) => rendered.push(render_value(v)),
            None => missing += 1,
        }
    }

    let counts = tally(rendered);
    KeyFrequency {
        total,
        missing,
        unique: counts.len(),
        duplicated: counts.into_iter().filter(|c| c.count > 1).collect(),
    }
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
