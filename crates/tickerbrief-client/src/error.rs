use thiserror::Error;

/// Failure of a single fetch against the brief API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-2xx status. The body is not inspected.
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
