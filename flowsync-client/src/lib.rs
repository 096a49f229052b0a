//! # flowsync-client
//!
//! Remote side of a sync run: the JSON payloads of the flow API, the
//! [`RemoteApi`] seam the orchestrator talks through, and [`HttpApi`], its
//! blocking HTTPS implementation.

pub mod api;
pub mod error;
pub mod http;
pub mod payload;

pub use api::{RemoteApi, RemoteOutcome};
pub use error::ClientError;
pub use http::HttpApi;
pub use payload::{GraphRequest, ListFlowsRequest, PatchRequest};
