//! One sync run, start to finish.
//!
//! Strictly sequential: list flows once, then for every flow fetch its code
//! nodes and patch each changed script that matches a node name. A script
//! matched in several flows is read and pushed once per flow.

use std::io;

use flowsync_client::{RemoteApi, RemoteOutcome};
use flowsync_core::{changed_files, ChangedFile, Config, FlowId, NodeId, NodeMap};

use crate::error::{io_err, SyncError};
use crate::graph::{self, GraphFetch};
use crate::journal::Journal;
use crate::patch::{self, PatchOutcome};

pub const START_BANNER: &str =
    "\n================== GitHub to Taktile Sync Started ==================\n";
pub const FINISH_BANNER: &str =
    "\n================== Script Execution Finished ==================\n";

/// Run-wide switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Log patch payloads without sending them.
    pub dry_run: bool,
}

/// Per (flow, changed script) result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Patched { node_id: NodeId },
    PatchFailed { node_id: NodeId, status: u16 },
    /// Dry run: the patch was logged but not sent.
    WouldPatch { node_id: NodeId },
    /// The flow has a matching node but the local script is missing.
    Missing { node_id: NodeId },
    /// The flow has no code node with this name.
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub flow_id: FlowId,
    pub file: String,
    pub status: FileStatus,
}

/// Summary of a run. The journal is the user-facing report; this is for
/// callers that need to inspect what happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub changed: Vec<ChangedFile>,
    /// Flows returned by the listing, in server order.
    pub flows: Vec<FlowId>,
    /// `true` when the listing call itself was rejected.
    pub listing_failed: bool,
    /// Flows whose graph could not be used.
    pub skipped_flows: Vec<FlowId>,
    pub files: Vec<FileOutcome>,
}

impl SyncReport {
    pub fn patched(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Patched { .. }))
    }
}

/// Sync the scripts named by `args` (paths; basename without extension is
/// the match key) into every flow that has a code node of the same name.
pub fn run<A, I, S>(
    args: I,
    config: &Config,
    api: &A,
    journal: &mut Journal,
    options: SyncOptions,
) -> Result<SyncReport, SyncError>
where
    A: RemoteApi,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    journal.log(START_BANNER)?;

    let mut report = SyncReport {
        changed: changed_files(args, &config.script_extension),
        ..SyncReport::default()
    };

    if report.changed.is_empty() {
        journal.log("No changed scripts detected")?;
        return Ok(report);
    }

    journal.log(&format!(
        "Detecting changes for: {}",
        quoted_list(&report.changed)
    ))?;

    report.flows = match crate::flows::list(api, config, journal)? {
        RemoteOutcome::Success(ids) => ids,
        RemoteOutcome::Failure { .. } => {
            report.listing_failed = true;
            Vec::new()
        }
    };

    if report.flows.is_empty() {
        journal.log("No decision flows have been found")?;
        return Ok(report);
    }

    for flow_id in report.flows.clone() {
        let nodes = match graph::fetch(api, config, journal, &flow_id)? {
            GraphFetch::Nodes(nodes) => nodes,
            // A rejected fetch means no matches here; every file is still
            // reported as unmatched for this flow.
            GraphFetch::Rejected { .. } => {
                report.skipped_flows.push(flow_id.clone());
                NodeMap::default()
            }
            GraphFetch::Ambiguous(_) => {
                report.skipped_flows.push(flow_id);
                continue;
            }
        };

        for file in &report.changed {
            let status = sync_file(api, config, journal, &flow_id, &nodes, file, options)?;
            report.files.push(FileOutcome {
                flow_id: flow_id.clone(),
                file: file.name.clone(),
                status,
            });
        }
    }

    journal.log(FINISH_BANNER)?;
    tracing::debug!(
        "sync finished: {} flow(s), {} patched",
        report.flows.len(),
        report.patched().count()
    );
    Ok(report)
}

/// Match one changed script against one flow's code nodes and push it.
fn sync_file<A: RemoteApi>(
    api: &A,
    config: &Config,
    journal: &mut Journal,
    flow_id: &FlowId,
    nodes: &NodeMap,
    file: &ChangedFile,
    options: SyncOptions,
) -> Result<FileStatus, SyncError> {
    let display_name = display_name(config, &file.name);

    let Some(node_id) = nodes.get(&file.name) else {
        journal.log(&format!(
            "No matching node found for {display_name} in flow {flow_id}"
        ))?;
        return Ok(FileStatus::Unmatched);
    };
    let node_id = node_id.clone();

    // Read fresh for every flow; the file may change between pushes.
    let script_path = config.script_path(&file.name);
    let src_code = match std::fs::read_to_string(&script_path) {
        Ok(src) => src,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            journal.log(&format!("Error: {} not found.", script_path.display()))?;
            return Ok(FileStatus::Missing { node_id });
        }
        Err(err) => return Err(io_err(&script_path, err)),
    };

    journal.log(&format!(
        "Updating {display_name} in Taktile (Flow ID: {flow_id}, Node ID: {node_id})..."
    ))?;

    let outcome = patch::push(
        api,
        config,
        journal,
        flow_id,
        &node_id,
        src_code,
        options.dry_run,
    )?;
    Ok(match outcome {
        PatchOutcome::Updated => FileStatus::Patched { node_id },
        PatchOutcome::Failed { status, .. } => FileStatus::PatchFailed { node_id, status },
        PatchOutcome::Skipped => FileStatus::WouldPatch { node_id },
    })
}

/// `['a', 'b']`, the list form the run log has always used.
fn quoted_list(files: &[ChangedFile]) -> String {
    let quoted: Vec<String> = files.iter().map(|f| format!("'{}'", f.name)).collect();
    format!("[{}]", quoted.join(", "))
}

fn display_name(config: &Config, name: &str) -> String {
    if config.script_extension.is_empty() {
        name.to_owned()
    } else {
        format!("{name}.{}", config.script_extension)
    }
}
