//! Per-flow code-node lookup.

use flowsync_client::{GraphRequest, RemoteApi, RemoteOutcome};
use flowsync_core::{Config, FlowId, NodeMap, NodeMapError};

use crate::error::SyncError;
use crate::journal::Journal;

/// Result of fetching one flow's graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphFetch {
    /// Code nodes of the flow, keyed by name. May be empty.
    Nodes(NodeMap),
    /// The graph endpoint rejected the call.
    Rejected { status: u16, body: String },
    /// The flow has two code nodes with the same name.
    Ambiguous(NodeMapError),
}

/// Fetch `flow_id`'s graph and index its code nodes by name.
///
/// Both failure variants are logged here; the flow should then be skipped.
pub fn fetch<A: RemoteApi>(
    api: &A,
    config: &Config,
    journal: &mut Journal,
    flow_id: &FlowId,
) -> Result<GraphFetch, SyncError> {
    let descriptors = match api.fetch_graph(&GraphRequest::graph(config, flow_id))? {
        RemoteOutcome::Success(descriptors) => descriptors,
        RemoteOutcome::Failure { status, body } => {
            journal.log(&format!(
                "Error fetching decision graph for flow {flow_id}: {body}"
            ))?;
            return Ok(GraphFetch::Rejected { status, body });
        }
    };

    let total = descriptors.len();
    match NodeMap::from_descriptors(descriptors) {
        Ok(nodes) => {
            tracing::debug!("flow {flow_id}: {} code node(s) of {total}", nodes.len());
            Ok(GraphFetch::Nodes(nodes))
        }
        Err(err) => {
            journal.log(&format!(
                "Error fetching decision graph for flow {flow_id}: {err}"
            ))?;
            Ok(GraphFetch::Ambiguous(err))
        }
    }
}
