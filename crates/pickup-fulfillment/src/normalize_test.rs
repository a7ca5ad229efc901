use serde_json::json;

use super::*;

fn wrap_stores(stores: Value) -> Value {
    json!({ "body": { "content": { "pickupMessage": { "stores": stores } } } })
}

fn filter_of(parts: &[&str]) -> HashSet<String> {
    parts.iter().map(|p| (*p).to_owned()).collect()
}

// -----------------------------------------------------------------------
// Missing or malformed structure
// -----------------------------------------------------------------------

#[test]
fn missing_stores_path_at_any_level_yields_nothing() {
    let payloads = [
        json!({}),
        json!({ "body": {} }),
        json!({ "body": { "content": {} } }),
        json!({ "body": { "content": { "pickupMessage": {} } } }),
        json!({ "body": null }),
        json!({ "body": { "content": "oops" } }),
        json!({ "body": { "content": { "pickupMessage": { "stores": {} } } } }),
        json!({ "body": { "content": { "pickupMessage": { "stores": "none" } } } }),
        json!([1, 2, 3]),
        Value::Null,
    ];
    for payload in &payloads {
        assert!(
            normalize_availability(payload, "iPhone 17 Pro", None).is_empty(),
            "expected no records for {payload}"
        );
    }
}

#[test]
fn non_object_store_entries_are_skipped() {
    let payload = wrap_stores(json!([
        "garbage",
        42,
        null,
        {
            "storeName": "Apple Wangfujing",
            "partsAvailability": { "MG8G4CH/A": { "pickupDisplay": "available" } }
        }
    ]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].store_name, "Apple Wangfujing");
}

#[test]
fn store_without_parts_map_yields_nothing() {
    let payload = wrap_stores(json!([
        { "storeName": "Apple Sanlitun" },
        { "storeName": "Apple Sanlitun", "partsAvailability": ["MG8G4CH/A"] }
    ]));
    assert!(normalize_availability(&payload, "iPhone 17 Pro", None).is_empty());
}

#[test]
fn non_object_part_info_is_skipped() {
    let payload = wrap_stores(json!([{
        "storeName": "Apple Sanlitun",
        "partsAvailability": {
            "MG8G4CH/A": "available",
            "MG8H4CH/A": { "pickupDisplay": "available" }
        }
    }]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].part_number, "MG8H4CH/A");
}

// -----------------------------------------------------------------------
// Field resolution
// -----------------------------------------------------------------------

#[test]
fn sanlitun_not_available_today_example() {
    let payload = json!({"body":{"content":{"pickupMessage":{"stores":[{"storeName":"Apple Sanlitun","city":"Beijing","partsAvailability":{"MTUV3CH/A":{"pickupDisplay":"Not Available Today"}}}]}}}});
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(!record.pickup_available);
    assert_eq!(record.pickup_status, "not available today");
    assert_eq!(record.store_name, "Apple Sanlitun");
    assert_eq!(record.city.as_deref(), Some("Beijing"));
    assert_eq!(record.part_number, "MTUV3CH/A");
    assert_eq!(record.model_label, "iPhone 17 Pro");
    assert!(record.store_number.is_none());
    assert!(record.product_title.is_none());
    assert!(record.pickup_quote.is_none());
}

#[test]
fn store_name_falls_back_to_retail_name_then_literal() {
    let payload = wrap_stores(json!([
        { "storeName": "", "retailStoreName": "Apple Parc Central", "partsAvailability": { "A": {} } },
        { "storeName": null, "partsAvailability": { "A": {} } }
    ]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    assert_eq!(records[0].store_name, "Apple Parc Central");
    assert_eq!(records[1].store_name, "Unknown store");
}

#[test]
fn city_falls_back_to_address_city() {
    let payload = wrap_stores(json!([
        { "storeName": "Apple Nanjing East", "address": { "city": "Shanghai" }, "partsAvailability": { "A": {} } },
        { "storeName": "Apple Pudong", "address": "Lujiazui", "partsAvailability": { "A": {} } }
    ]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    assert_eq!(records[0].city.as_deref(), Some("Shanghai"));
    assert!(records[1].city.is_none());
}

#[test]
fn store_number_is_coerced_to_text() {
    let payload = wrap_stores(json!([
        { "storeName": "Apple Sanlitun", "storeNumber": 320, "partsAvailability": { "A": {} } },
        { "storeName": "Apple Wangfujing", "storeNumber": "R448", "partsAvailability": { "A": {} } }
    ]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    assert_eq!(records[0].store_number.as_deref(), Some("320"));
    assert_eq!(records[1].store_number.as_deref(), Some("R448"));
}

#[test]
fn status_prefers_pickup_display_over_store_pickup_label() {
    let payload = wrap_stores(json!([{
        "storeName": "Apple Sanlitun",
        "partsAvailability": {
            "A": { "pickupDisplay": "Available", "storePickupLabel": "Unavailable" },
            "B": { "storePickupLabel": "Available Today" },
            "C": {}
        }
    }]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    let statuses: Vec<&str> = records.iter().map(|r| r.pickup_status.as_str()).collect();
    assert_eq!(statuses, vec!["available", "available today", "unknown"]);
    let available: Vec<bool> = records.iter().map(|r| r.pickup_available).collect();
    assert_eq!(available, vec![true, true, false]);
}

#[test]
fn quote_uses_first_present_candidate() {
    let payload = wrap_stores(json!([{
        "storeName": "Apple Sanlitun",
        "partsAvailability": {
            "A": { "storePickupQuote": "Today at Apple Sanlitun", "storePickupQuoteShort": "Today" },
            "B": { "pickupSearchQuote": null, "productAvailabilityText": "Ships in 2 weeks" },
            "C": { "storePickupQuoteShort": "Tomorrow" }
        }
    }]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    let quotes: Vec<Option<&str>> = records.iter().map(|r| r.pickup_quote.as_deref()).collect();
    assert_eq!(
        quotes,
        vec![
            Some("Today at Apple Sanlitun"),
            Some("Ships in 2 weeks"),
            Some("Tomorrow")
        ]
    );
}

#[test]
fn product_title_falls_back_to_title_field() {
    let payload = wrap_stores(json!([{
        "storeName": "Apple Sanlitun",
        "partsAvailability": {
            "A": { "storePickupProductTitle": "iPhone 17 Pro 256GB Cosmic Orange", "title": "ignored" },
            "B": { "title": "iPhone 17 Pro 512GB Silver" }
        }
    }]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    assert_eq!(
        records[0].product_title.as_deref(),
        Some("iPhone 17 Pro 256GB Cosmic Orange")
    );
    assert_eq!(
        records[1].product_title.as_deref(),
        Some("iPhone 17 Pro 512GB Silver")
    );
}

#[test]
fn records_follow_store_then_part_order() {
    let payload = wrap_stores(json!([
        { "storeName": "S1", "partsAvailability": { "Z": {}, "A": {} } },
        { "storeName": "S2", "partsAvailability": { "M": {} } }
    ]));
    let records = normalize_availability(&payload, "iPhone 17 Pro", None);
    let pairs: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.store_name.as_str(), r.part_number.as_str()))
        .collect();
    assert_eq!(pairs, vec![("S1", "Z"), ("S1", "A"), ("S2", "M")]);
}

#[test]
fn empty_part_number_key_is_skipped() {
    let payload = wrap_stores(json!([{
        "storeName": "Apple Sanlitun",
        "partsAvailability": { "": { "pickupDisplay": "available" } }
    }]));
    assert!(normalize_availability(&payload, "iPhone 17 Pro", None).is_empty());
}

// -----------------------------------------------------------------------
// Part filter
// -----------------------------------------------------------------------

#[test]
fn part_filter_keeps_only_listed_parts() {
    let payload = wrap_stores(json!([{
        "storeName": "Apple Sanlitun",
        "partsAvailability": { "A": {}, "B": {}, "C": {} }
    }]));
    let filter = filter_of(&["B", "C", "Q"]);
    let records = normalize_availability(&payload, "iPhone 17 Pro", Some(&filter));
    let parts: Vec<&str> = records.iter().map(|r| r.part_number.as_str()).collect();
    assert_eq!(parts, vec!["B", "C"]);
}

#[test]
fn empty_part_filter_keeps_nothing() {
    let payload = wrap_stores(json!([{
        "storeName": "Apple Sanlitun",
        "partsAvailability": { "A": {} }
    }]));
    let filter = HashSet::new();
    assert!(normalize_availability(&payload, "iPhone 17 Pro", Some(&filter)).is_empty());
}

// -----------------------------------------------------------------------
// is_pickup_available
// -----------------------------------------------------------------------

#[test]
fn listed_statuses_are_available() {
    for status in [
        "available",
        "Available Today",
        "available soon",
        "AVAILABLE\tTODAY",
        " available ",
    ] {
        assert!(is_pickup_available(status), "{status:?} should be available");
    }
}

#[test]
fn negated_statuses_are_never_available() {
    for status in [
        "not available today",
        "Not Available",
        "unavailable",
        "currently unavailable",
        "NOT AVAILABLE SOON",
    ] {
        assert!(!is_pickup_available(status), "{status:?} should be unavailable");
    }
}

#[test]
fn unlisted_statuses_are_not_available() {
    for status in ["unknown", "ineligible", "available tomorrow", "", "今天可取货"] {
        assert!(!is_pickup_available(status), "{status:?} should be unavailable");
    }
}
