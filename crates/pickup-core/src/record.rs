/// One (store, part) availability datapoint produced by the normalizer.
///
/// `part_number` is always present: it is the key under which the entry was
/// found in the store's `partsAvailability` map. Every other store or product
/// attribute is optional because the vendor payload does not guarantee it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    /// Label of the [`crate::ModelQuery`] that produced this record.
    pub model_label: String,
    pub store_name: String,
    pub store_number: Option<String>,
    pub city: Option<String>,
    pub part_number: String,
    pub product_title: Option<String>,
    /// Vendor status text, lowercased but otherwise untouched.
    pub pickup_status: String,
    pub pickup_available: bool,
    pub pickup_quote: Option<String>,
}
