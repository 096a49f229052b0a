//! The seam between the orchestrator and the flow API.

use flowsync_core::{FlowId, NodeDescriptor};

use crate::error::ClientError;
use crate::payload::{GraphRequest, ListFlowsRequest, PatchRequest};

/// Result of a call that reached the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome<T> {
    /// HTTP 200 with a decoded body.
    Success(T),
    /// Any other status, with the raw response body.
    Failure { status: u16, body: String },
}

impl<T> RemoteOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteOutcome<U> {
        match self {
            Self::Success(v) => RemoteOutcome::Success(f(v)),
            Self::Failure { status, body } => RemoteOutcome::Failure { status, body },
        }
    }
}

/// The three calls a sync run makes.
///
/// `Err` is reserved for faults outside the API contract (transport failure,
/// undecodable body); callers propagate it instead of logging and moving on.
pub trait RemoteApi {
    /// List every flow of the configured organization, in server order.
    fn list_flows(
        &self,
        request: &ListFlowsRequest,
    ) -> Result<RemoteOutcome<Vec<FlowId>>, ClientError>;

    /// Fetch the full node listing of one flow.
    fn fetch_graph(
        &self,
        request: &GraphRequest,
    ) -> Result<RemoteOutcome<Vec<NodeDescriptor>>, ClientError>;

    /// Overwrite the source text of one code node.
    fn patch_node(&self, request: &PatchRequest) -> Result<RemoteOutcome<()>, ClientError>;
}

impl<A: RemoteApi + ?Sized> RemoteApi for &A {
    fn list_flows(
        &self,
        request: &ListFlowsRequest,
    ) -> Result<RemoteOutcome<Vec<FlowId>>, ClientError> {
        (**self).list_flows(request)
    }

    fn fetch_graph(
        &self,
        request: &GraphRequest,
    ) -> Result<RemoteOutcome<Vec<NodeDescriptor>>, ClientError> {
        (**self).fetch_graph(request)
    }

    fn patch_node(&self, request: &PatchRequest) -> Result<RemoteOutcome<()>, ClientError> {
        (**self).patch_node(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_failure() {
        let failed: RemoteOutcome<u8> = RemoteOutcome::Failure {
            status: 401,
            body: "denied".into(),
        };
        assert_eq!(
            failed.map(|v| v + 1),
            RemoteOutcome::Failure {
                status: 401,
                body: "denied".into()
            }
        );
        assert!(RemoteOutcome::Success(1).map(|v| v + 1).is_success());
    }
}
