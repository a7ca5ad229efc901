//! Per-model query orchestration: part-number planning, fetch, normalize.
//!
//! Requested parts and filtered parts are merged differently. The request
//! takes the union of the model's fixed parts and the caller's parts, while
//! the post-fetch filter takes their intersection.

use std::collections::HashSet;

use pickup_core::{AvailabilityRecord, ModelQuery};

use crate::client::{FetchParams, FulfillmentClient};
use crate::error::FulfillmentError;
use crate::normalize::normalize_availability;
use crate::retry::RetryPolicy;

/// Which discovered part numbers survive normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartFilter {
    /// Neither side restricts parts.
    All,
    /// Only these part numbers are kept.
    Only(HashSet<String>),
    /// Fixed and caller parts were both given but share nothing.
    NoOverlap,
}

/// Part numbers to request and the filter to apply to the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartPlan {
    /// Sent as `parts.<i>`; empty means no part scoping.
    pub requested: Vec<String>,
    pub filter: PartFilter,
}

/// Merges a model's fixed parts with caller-supplied parts.
///
/// `requested` is `fixed` followed by `caller`, de-duplicated in first-seen
/// order. The filter is the intersection when both sides are non-empty,
/// whichever side is non-empty otherwise, and [`PartFilter::All`] when
/// neither is.
#[must_use]
pub fn plan_parts(fixed: &[String], caller: &[String]) -> PartPlan {
    let mut seen = HashSet::new();
    let requested = fixed
        .iter()
        .chain(caller)
        .filter(|part| seen.insert(part.as_str()))
        .cloned()
        .collect();

    let fixed_set: HashSet<String> = fixed.iter().cloned().collect();
    let caller_set: HashSet<String> = caller.iter().cloned().collect();

    let filter = match (fixed_set.is_empty(), caller_set.is_empty()) {
        (true, true) => PartFilter::All,
        (false, true) => PartFilter::Only(fixed_set),
        (true, false) => PartFilter::Only(caller_set),
        (false, false) => {
            let overlap: HashSet<String> = fixed_set.intersection(&caller_set).cloned().collect();
            if overlap.is_empty() {
                PartFilter::NoOverlap
            } else {
                PartFilter::Only(overlap)
            }
        }
    };

    PartPlan { requested, filter }
}

/// Caller-level settings shared by every model in a run.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub location: Option<String>,
    pub store_code: Option<String>,
    /// Extra part numbers from the command line.
    pub parts: Vec<String>,
    pub retry: RetryPolicy,
}

/// What a single model query produced after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Surviving records; may be empty when the store list was empty.
    Records(Vec<AvailabilityRecord>),
    /// Fixed and caller part numbers do not intersect; nothing was normalized.
    NoOverlap,
}

impl QueryOutcome {
    /// Records produced, or an empty slice for [`QueryOutcome::NoOverlap`].
    #[must_use]
    pub fn records(&self) -> &[AvailabilityRecord] {
        match self {
            QueryOutcome::Records(records) => records,
            QueryOutcome::NoOverlap => &[],
        }
    }
}

/// The raw payload together with the filtered outcome.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub payload: serde_json::Value,
    pub outcome: QueryOutcome,
}

/// Fetches and normalizes availability for one model.
///
/// The payload is always fetched, even when the part plan has no overlap,
/// so that callers can still dump it.
///
/// # Errors
///
/// Returns the fetch error once retries under `options.retry` are used up.
pub async fn run_query(
    client: &FulfillmentClient,
    query: &ModelQuery,
    options: &QueryOptions,
) -> Result<QueryReport, FulfillmentError> {
    let plan = plan_parts(query.fixed_parts(), &options.parts);

    let params = FetchParams {
        location: options.location.as_deref(),
        store_code: options.store_code.as_deref(),
        search_term: Some(&query.search_term),
        parts: &plan.requested,
    };
    let payload = client.fetch_with_retry(&params, options.retry).await?;

    let outcome = match &plan.filter {
        PartFilter::NoOverlap => {
            tracing::info!(model = %query.label, "fixed and requested part numbers do not overlap");
            QueryOutcome::NoOverlap
        }
        PartFilter::All => {
            QueryOutcome::Records(normalize_availability(&payload, &query.label, None))
        }
        PartFilter::Only(parts) => {
            QueryOutcome::Records(normalize_availability(&payload, &query.label, Some(parts)))
        }
    };

    tracing::info!(
        model = %query.label,
        records = outcome.records().len(),
        "model query complete"
    );

    Ok(QueryReport { payload, outcome })
}
