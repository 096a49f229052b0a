//! flowsync core library — domain types, configuration, errors.
//!
//! - [`types`] — newtypes for flows, nodes and changed files, plus [`NodeMap`]
//! - [`config`] — YAML configuration and the API credential
//! - [`error`] — [`ConfigError`], [`NodeMapError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, Credential};
pub use error::{ConfigError, NodeMapError};
pub use types::{
    changed_files, ChangedFile, FlowId, NodeDescriptor, NodeId, NodeMap, NodeName, CODE_NODE_TYPE,
};
