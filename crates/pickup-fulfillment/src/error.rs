use thiserror::Error;

/// Errors returned by the fulfilment-messages client.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body is not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed, but the top level is not a JSON object.
    #[error("unexpected payload shape from {url}: expected an object, found {found}")]
    UnexpectedShape { url: String, found: &'static str },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
