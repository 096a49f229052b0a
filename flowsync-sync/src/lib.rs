//! # flowsync-sync
//!
//! Push changed local scripts into the code nodes of remote decision flows.
//!
//! [`pipeline::run`] drives one sync: it lists flows ([`flows::list`]),
//! fetches each flow's code nodes ([`graph::fetch`]) and patches every node
//! whose name matches a changed script ([`patch::push`]). Every step reports
//! through the run [`Journal`].

pub mod error;
pub mod flows;
pub mod graph;
pub mod journal;
pub mod patch;
pub mod pipeline;

pub use error::SyncError;
pub use journal::Journal;
pub use pipeline::{run, FileOutcome, FileStatus, SyncOptions, SyncReport};
