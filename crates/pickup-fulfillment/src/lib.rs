pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod retry;

pub use client::{FetchParams, FulfillmentClient};
pub use error::FulfillmentError;
pub use normalize::{is_pickup_available, normalize_availability};
pub use query::{plan_parts, run_query, PartFilter, PartPlan, QueryOptions, QueryOutcome, QueryReport};
pub use retry::RetryPolicy;
