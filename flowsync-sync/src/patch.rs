//! Code-node update.

use flowsync_client::{payload, PatchRequest, RemoteApi, RemoteOutcome};
use flowsync_core::{Config, FlowId, NodeId};

use crate::error::SyncError;
use crate::journal::Journal;

/// What happened to one patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Updated,
    Failed { status: u16, body: String },
    /// Dry run: the payload was logged but not sent.
    Skipped,
}

/// Overwrite the source of `node_id` in `flow_id` with `src_code`.
///
/// The complete payload, source included, is logged before sending.
pub fn push<A: RemoteApi>(
    api: &A,
    config: &Config,
    journal: &mut Journal,
    flow_id: &FlowId,
    node_id: &NodeId,
    src_code: String,
    dry_run: bool,
) -> Result<PatchOutcome, SyncError> {
    let request = PatchRequest::patch(config, flow_id, node_id, src_code);
    journal.log(&format!(
        "Sending POST request with payload:\n{}",
        payload::to_audit_json(&request)?
    ))?;

    if dry_run {
        journal.log(&format!(
            "[dry-run] Skipped update of node {node_id} in flow {flow_id}."
        ))?;
        return Ok(PatchOutcome::Skipped);
    }

    match api.patch_node(&request)? {
        RemoteOutcome::Success(()) => {
            journal.log(&format!(
                "Successfully updated node with id {node_id} in flow {flow_id}."
            ))?;
            Ok(PatchOutcome::Updated)
        }
        RemoteOutcome::Failure { status, body } => {
            journal.log(&format!("Failed to update node with id {node_id}: {body}"))?;
            Ok(PatchOutcome::Failed { status, body })
        }
    }
}
