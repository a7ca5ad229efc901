//! Fixed-delay retry for fulfilment requests.
//!
//! The wait between attempts is constant: the endpoint's throttling is short
//! lived, and the user chooses both the attempt count and the delay.

use std::future::Future;
use std::time::Duration;

use crate::error::FulfillmentError;

/// How many extra attempts to make and how long to sleep between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }
}

/// Returns `true` for errors that are worth retrying after the delay.
///
/// **Retriable:** [`FulfillmentError::Http`] (connect failures, resets,
/// timeouts) and [`FulfillmentError::UnexpectedStatus`] (rate limiting and
/// other non-2xx answers).
///
/// **Not retriable:** a body that is not JSON, a body that is not an object,
/// or a bad base URL. Retrying returns the same result.
pub(crate) fn is_retriable(err: &FulfillmentError) -> bool {
    match err {
        FulfillmentError::Http(_) | FulfillmentError::UnexpectedStatus { .. } => true,
        FulfillmentError::Deserialize { .. }
        | FulfillmentError::UnexpectedShape { .. }
        | FulfillmentError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation`, retrying retriable errors up to `policy.max_retries`
/// more times with `policy.delay` between attempts.
///
/// With `max_retries = 2` the operation runs at most 3 times. The last error
/// is returned once attempts are exhausted.
pub(crate) async fn retry_with_fixed_delay<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, FulfillmentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FulfillmentError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = u64::try_from(policy.delay.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms,
                    error = %err,
                    "fulfilment request failed, retrying after delay"
                );
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
