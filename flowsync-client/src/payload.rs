//! Request and response bodies of the flow API.
//!
//! Every request shares one envelope:
//!
//! ```json
//! { "data": { .. }, "metadata": { "version": "v1.0" }, "control": { "execution_mode": "sync" } }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

use flowsync_core::{Config, FlowId, NodeDescriptor, NodeId};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<D> {
    pub data: D,
    pub metadata: Metadata,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub execution_mode: String,
}

impl<D> Envelope<D> {
    fn new(config: &Config, data: D) -> Self {
        Self {
            data,
            metadata: Metadata {
                version: config.api_version.clone(),
                entity_id: None,
            },
            control: Control {
                execution_mode: config.execution_mode.clone(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFlowsData {
    pub organization_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphData {
    pub flow_id: FlowId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchData {
    pub flow_id: FlowId,
    pub node_id: NodeId,
    pub src_code: String,
}

pub type ListFlowsRequest = Envelope<ListFlowsData>;
pub type GraphRequest = Envelope<GraphData>;
pub type PatchRequest = Envelope<PatchData>;

impl ListFlowsRequest {
    pub fn list_flows(config: &Config) -> Self {
        Envelope::new(
            config,
            ListFlowsData {
                organization_name: config.organization_name.clone(),
            },
        )
    }
}

impl GraphRequest {
    pub fn graph(config: &Config, flow_id: &FlowId) -> Self {
        Envelope::new(
            config,
            GraphData {
                flow_id: flow_id.clone(),
            },
        )
    }
}

impl PatchRequest {
    /// The patch request is the only one carrying the placeholder `entity_id`.
    pub fn patch(config: &Config, flow_id: &FlowId, node_id: &NodeId, src_code: String) -> Self {
        let mut envelope = Envelope::new(
            config,
            PatchData {
                flow_id: flow_id.clone(),
                node_id: node_id.clone(),
                src_code,
            },
        );
        envelope.metadata.entity_id = Some(config.entity_id.clone());
        envelope
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListFlowsResponse {
    #[serde(default)]
    pub data: ListFlowsBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListFlowsBody {
    #[serde(default)]
    pub flows: Vec<FlowDescriptor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlowDescriptor {
    pub flow_id: FlowId,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GraphResponse {
    #[serde(default)]
    pub data: GraphBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GraphBody {
    #[serde(default)]
    pub graph: Vec<NodeDescriptor>,
}

impl ListFlowsResponse {
    pub(crate) fn into_flow_ids(self) -> Vec<FlowId> {
        self.data.flows.into_iter().map(|f| f.flow_id).collect()
    }
}

// ---------------------------------------------------------------------------
// Audit rendering
// ---------------------------------------------------------------------------

/// Render a payload for the audit log: pretty JSON, four-space indent, and
/// every character outside printable ASCII written as a `\uXXXX` escape.
pub fn to_audit_json<T: Serialize>(payload: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = AsciiPretty(PrettyFormatter::with_indent(b"    "));
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    payload.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// [`PrettyFormatter`] layout with ASCII-only string contents.
struct AsciiPretty<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiPretty<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    // Quotes, backslashes and control characters never reach this method;
    // serde_json escapes them itself.
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (at, ch) in fragment.char_indices() {
            if ch <= '~' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..at])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = at + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
