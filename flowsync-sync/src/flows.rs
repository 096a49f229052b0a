//! Flow listing.

use flowsync_client::{ListFlowsRequest, RemoteApi, RemoteOutcome};
use flowsync_core::{Config, FlowId};

use crate::error::SyncError;
use crate::journal::Journal;

/// List every flow of the configured organization.
///
/// A rejected call is logged with the raw response body and handed back as
/// [`RemoteOutcome::Failure`]; the caller decides what that means for the run.
pub fn list<A: RemoteApi>(
    api: &A,
    config: &Config,
    journal: &mut Journal,
) -> Result<RemoteOutcome<Vec<FlowId>>, SyncError> {
    let outcome = api.list_flows(&ListFlowsRequest::list_flows(config))?;
    match &outcome {
        RemoteOutcome::Success(ids) => {
            journal.log(&format!("Retrieved {} decision flow(s).", ids.len()))?;
        }
        RemoteOutcome::Failure { status, body } => {
            tracing::debug!("flow listing rejected with status {status}");
            journal.log(&format!("Error fetching decision flows: {body}"))?;
        }
    }
    Ok(outcome)
}
