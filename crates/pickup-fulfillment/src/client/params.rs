/// Query parameters for a single fulfilment request.
///
/// Empty strings are treated the same as `None` and are left out of the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchParams<'a> {
    /// City or postal code to search near.
    pub location: Option<&'a str>,
    /// Store code (e.g. `R320`) to query directly.
    pub store_code: Option<&'a str>,
    pub search_term: Option<&'a str>,
    /// Part numbers sent as `parts.0`, `parts.1`, ... in order.
    pub parts: &'a [String],
}

impl<'a> FetchParams<'a> {
    /// The named parameters that carry a non-empty value, in URL order.
    pub(crate) fn optional_pairs(&self) -> impl Iterator<Item = (&'static str, &'a str)> {
        [
            ("location", self.location),
            ("store", self.store_code),
            ("search", self.search_term),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
    }
}
