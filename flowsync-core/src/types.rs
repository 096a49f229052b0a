//! Domain types for flowsync.
//!
//! Flows and nodes are opaque to this crate: their identifiers come from the
//! remote graph API and are only ever echoed back to it.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NodeMapError;

/// `node_type` value marking a node that stores editable source text.
pub const CODE_NODE_TYPE: &str = "code_node";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a remote decision flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowId(pub String);

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FlowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FlowId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of a node inside one flow's graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Human-readable node name; the key changed files are matched against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeName(pub String);

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NodeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Changed files
// ---------------------------------------------------------------------------

/// A locally modified script, identified by its basename without extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangedFile {
    pub name: String,
}

impl ChangedFile {
    /// Derive the match name from one command-line argument.
    ///
    /// The directory prefix is dropped and a single trailing `.<extension>` is
    /// removed; any other suffix is left alone.
    pub fn from_arg(arg: &str, extension: &str) -> Self {
        let base = Path::new(arg)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(arg);

        let name = if extension.is_empty() {
            base
        } else {
            base.strip_suffix(extension)
                .and_then(|rest| rest.strip_suffix('.'))
                .unwrap_or(base)
        };

        Self {
            name: name.to_owned(),
        }
    }
}

impl fmt::Display for ChangedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// Map every argument to a [`ChangedFile`], keeping order and duplicates.
pub fn changed_files<I, S>(args: I, extension: &str) -> Vec<ChangedFile>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| ChangedFile::from_arg(arg.as_ref(), extension))
        .collect()
}

// ---------------------------------------------------------------------------
// Graph nodes
// ---------------------------------------------------------------------------

/// One node as described by the graph endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub node_id: NodeId,
    pub node_name: NodeName,
    pub node_type: String,
}

impl NodeDescriptor {
    pub fn is_code_node(&self) -> bool {
        self.node_type == CODE_NODE_TYPE
    }
}

/// Code-node name → node id for a single flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMap {
    nodes: HashMap<String, NodeId>,
}

impl NodeMap {
    /// Build the map from a graph listing, keeping only code nodes.
    ///
    /// # Errors
    /// [`NodeMapError::DuplicateNodeName`] when two code nodes share a name.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, NodeMapError>
    where
        I: IntoIterator<Item = NodeDescriptor>,
    {
        let mut nodes: HashMap<String, NodeId> = HashMap::new();
        for node in descriptors.into_iter().filter(NodeDescriptor::is_code_node) {
            let NodeDescriptor {
                node_id, node_name, ..
            } = node;
            if let Some(first) = nodes.get(&node_name.0) {
                return Err(NodeMapError::DuplicateNodeName {
                    name: node_name.0,
                    first: first.0.clone(),
                    second: node_id.0,
                });
            }
            nodes.insert(node_name.0, node_id);
        }
        Ok(Self { nodes })
    }

    pub fn get(&self, name: &str) -> Option<&NodeId> {
        self.nodes.get(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
