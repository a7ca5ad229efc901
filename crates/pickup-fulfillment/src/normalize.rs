//! Normalization of raw fulfilment payloads into [`AvailabilityRecord`]s.
//!
//! The payload is vendor-controlled and loosely shaped, so it stays an
//! untyped [`serde_json::Value`] and every lookup is fallible. A missing
//! level yields no records, and a malformed store or part entry is skipped
//! on its own. Nothing in this module returns an error.

use std::collections::HashSet;

use pickup_core::AvailabilityRecord;
use serde_json::{Map, Value};

/// Path from the payload root to the list of stores.
const STORES_PATH: [&str; 4] = ["body", "content", "pickupMessage", "stores"];

const STORE_NAME_KEYS: &[&str] = &["storeName", "retailStoreName"];
const UNKNOWN_STORE: &str = "Unknown store";

/// Status field spellings, highest priority first.
const STATUS_KEYS: &[&str] = &["pickupDisplay", "storePickupLabel"];
const UNKNOWN_STATUS: &str = "unknown";

const QUOTE_KEYS: &[&str] = &[
    "pickupSearchQuote",
    "storePickupQuote",
    "productAvailabilityText",
    "storePickupQuoteShort",
];

const TITLE_KEYS: &[&str] = &["storePickupProductTitle", "title"];

/// Whitespace-free statuses that count as available.
const AVAILABLE_STATUSES: &[&str] = &["available", "availabletoday", "availablesoon"];

/// Substrings that negate availability wherever they appear.
const NEGATION_MARKERS: &[&str] = &["not", "unavailable"];

/// Walks a fulfilment payload and returns one record per (store, part) pair.
///
/// When `part_filter` is `Some`, only part numbers in the set are kept; an
/// empty set keeps nothing. Records follow payload order: stores in list
/// order, then parts in the order the store's map lists them.
#[must_use]
pub fn normalize_availability(
    payload: &Value,
    model_label: &str,
    part_filter: Option<&HashSet<String>>,
) -> Vec<AvailabilityRecord> {
    let Some(stores) = stores_list(payload) else {
        tracing::debug!(model = model_label, "payload has no stores list");
        return Vec::new();
    };

    let mut records = Vec::new();
    for (index, store) in stores.iter().enumerate() {
        let Some(store) = store.as_object() else {
            tracing::debug!(index, "skipping store entry that is not an object");
            continue;
        };
        collect_store_records(store, model_label, part_filter, &mut records);
    }
    records
}

/// Decides availability from a vendor status string.
///
/// The whitespace-stripped, lowercased status must be one of the known
/// available values, and the status must not contain a negation marker.
/// The negation check wins: `"not available today"` is unavailable.
#[must_use]
pub fn is_pickup_available(status: &str) -> bool {
    let lowered = status.to_lowercase();
    let compact: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();
    let listed = AVAILABLE_STATUSES.contains(&compact.as_str());
    listed && !NEGATION_MARKERS.iter().any(|marker| lowered.contains(marker))
}

fn stores_list(payload: &Value) -> Option<&Vec<Value>> {
    STORES_PATH
        .iter()
        .try_fold(payload, |node, key| node.get(key))?
        .as_array()
}

fn collect_store_records(
    store: &Map<String, Value>,
    model_label: &str,
    part_filter: Option<&HashSet<String>>,
    records: &mut Vec<AvailabilityRecord>,
) {
    let Some(parts) = store.get("partsAvailability").and_then(Value::as_object) else {
        return;
    };

    let store_name = first_text(store, STORE_NAME_KEYS).unwrap_or_else(|| UNKNOWN_STORE.to_owned());
    let store_number = store.get("storeNumber").and_then(coerce_text);
    let city = first_text(store, &["city"]).or_else(|| {
        store
            .get("address")
            .and_then(Value::as_object)
            .and_then(|address| first_text(address, &["city"]))
    });

    for (part_number, info) in parts {
        if part_number.is_empty() {
            continue;
        }
        if part_filter.is_some_and(|filter| !filter.contains(part_number)) {
            continue;
        }
        let Some(info) = info.as_object() else {
            tracing::debug!(part = %part_number, store = %store_name, "skipping part entry that is not an object");
            continue;
        };

        let pickup_status = first_text(info, STATUS_KEYS)
            .unwrap_or_else(|| UNKNOWN_STATUS.to_owned())
            .to_lowercase();
        let pickup_available = is_pickup_available(&pickup_status);

        records.push(AvailabilityRecord {
            model_label: model_label.to_owned(),
            store_name: store_name.clone(),
            store_number: store_number.clone(),
            city: city.clone(),
            part_number: part_number.clone(),
            product_title: first_text(info, TITLE_KEYS),
            pickup_status,
            pickup_available,
            pickup_quote: first_text(info, QUOTE_KEYS),
        });
    }
}

/// Returns the text of the first candidate key holding a non-blank value.
///
/// Candidates are tried strictly in slice order; `null`, `""`, `false`, `0`
/// and empty containers count as blank and fall through to the next key.
fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !is_blank(value))
        .and_then(coerce_text)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Renders a JSON value as text; `null` has no text.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
