//! HTTP client for the Apple Store `fulfillment-messages` endpoint.

mod params;

use std::time::Duration;

use pickup_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::FulfillmentError;
use crate::retry::{retry_with_fixed_delay, RetryPolicy};

pub use params::FetchParams;

/// Client for the store-pickup fulfilment endpoint.
///
/// Every fetch is a single blocking-style GET: the caller awaits each request
/// before issuing the next. Non-2xx statuses and non-object bodies are
/// surfaced as typed errors; nothing in the body is interpreted here.
pub struct FulfillmentClient {
    client: Client,
    base_url: Url,
}

impl FulfillmentClient {
    /// Creates a client pointed at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FulfillmentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FulfillmentError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FulfillmentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| FulfillmentError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the resolved [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`FulfillmentClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FulfillmentError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            config.connect_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches the raw fulfilment payload for one query.
    ///
    /// # Errors
    ///
    /// - [`FulfillmentError::Http`] on network failure or timeout.
    /// - [`FulfillmentError::UnexpectedStatus`] for any non-2xx status.
    /// - [`FulfillmentError::Deserialize`] if the body is not valid JSON.
    /// - [`FulfillmentError::UnexpectedShape`] if the top level is not an object.
    pub async fn fetch(
        &self,
        params: &FetchParams<'_>,
    ) -> Result<serde_json::Value, FulfillmentError> {
        let url = self.build_url(params);
        tracing::debug!(url = %url, "requesting fulfilment messages");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FulfillmentError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FulfillmentError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        if !payload.is_object() {
            return Err(FulfillmentError::UnexpectedShape {
                url: url.to_string(),
                found: json_kind(&payload),
            });
        }

        Ok(payload)
    }

    /// Like [`Self::fetch`], retrying transient failures per `policy`.
    ///
    /// # Errors
    ///
    /// Returns the last error once `policy.max_retries` additional attempts
    /// are used up, or the first non-retriable error immediately.
    pub async fn fetch_with_retry(
        &self,
        params: &FetchParams<'_>,
        policy: RetryPolicy,
    ) -> Result<serde_json::Value, FulfillmentError> {
        retry_with_fixed_delay(policy, || self.fetch(params)).await
    }

    /// Builds the request URL: `pl=true&mt=regular`, then each present
    /// parameter, then one `parts.<i>` pair per requested part.
    pub(crate) fn build_url(&self, params: &FetchParams<'_>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("pl", "true");
            pairs.append_pair("mt", "regular");
            for (key, value) in params.optional_pairs() {
                pairs.append_pair(key, value);
            }
            for (index, part) in params.parts.iter().enumerate() {
                pairs.append_pair(&format!("parts.{index}"), part);
            }
        }
        url
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
