//! Error types for flowsync-client.
//!
//! Only faults the flow API contract does not describe end up here. A non-200
//! answer is a [`crate::RemoteOutcome::Failure`], not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or DNS failure; no HTTP status was received.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be read.
    #[error("failed to read response from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// A 200 response whose body is not the expected JSON shape.
    #[error("malformed JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
