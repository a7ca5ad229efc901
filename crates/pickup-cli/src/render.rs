//! Console presentation of query outcomes.

use pickup_core::AvailabilityRecord;
use pickup_fulfillment::QueryOutcome;

const AVAILABLE_GLYPH: &str = "\u{2705}";
const UNAVAILABLE_GLYPH: &str = "\u{274c}";

pub(crate) const NO_OVERLAP_MESSAGE: &str =
    "No overlapping part numbers between the model defaults and --part filter.";
pub(crate) const NO_STORES_MESSAGE: &str = "No stores returned by the API for this query.";

/// Lines to print for one model's outcome.
pub(crate) fn render_outcome(outcome: &QueryOutcome) -> Vec<String> {
    match outcome {
        QueryOutcome::NoOverlap => vec![NO_OVERLAP_MESSAGE.to_owned()],
        QueryOutcome::Records(records) if records.is_empty() => {
            vec![NO_STORES_MESSAGE.to_owned()]
        }
        QueryOutcome::Records(records) => records.iter().map(format_record).collect(),
    }
}

/// `<glyph> <store> - <city> - #<number> | <product> (<part>) | <quote or status>`
///
/// Empty optional fields are left out, as if absent.
pub(crate) fn format_record(record: &AvailabilityRecord) -> String {
    let glyph = if record.pickup_available {
        AVAILABLE_GLYPH
    } else {
        UNAVAILABLE_GLYPH
    };

    let mut location_bits = vec![record.store_name.clone()];
    if let Some(city) = non_empty(record.city.as_deref()) {
        location_bits.push(city.to_owned());
    }
    if let Some(number) = non_empty(record.store_number.as_deref()) {
        location_bits.push(format!("#{number}"));
    }

    let product = non_empty(record.product_title.as_deref()).unwrap_or(&record.model_label);
    let extra = non_empty(record.pickup_quote.as_deref()).unwrap_or(&record.pickup_status);

    format!(
        "{glyph} {} | {product} ({}) | {extra}",
        location_bits.join(" - "),
        record.part_number
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
