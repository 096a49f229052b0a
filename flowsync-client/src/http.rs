//! Blocking HTTPS implementation of [`RemoteApi`].
//!
//! One `ureq` agent per run; every call is a JSON `POST`. No timeouts are set,
//! so a stalled server blocks the run.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;

use flowsync_core::{Config, Credential, FlowId, NodeDescriptor};

use crate::api::{RemoteApi, RemoteOutcome};
use crate::error::ClientError;
use crate::payload::{GraphRequest, GraphResponse, ListFlowsRequest, ListFlowsResponse, PatchRequest};

pub const LIST_ENDPOINT: &str = "list-decision-graphs";
pub const GRAPH_ENDPOINT: &str = "get-decision-graph";
pub const PATCH_ENDPOINT: &str = "patch-decision-graph";

const API_KEY_HEADER: &str = "X-Api-Key";

/// Flow API client bound to one base URL and one credential.
pub struct HttpApi {
    agent: ureq::Agent,
    credential: Credential,
    list_url: String,
    graph_url: String,
    patch_url: String,
}

impl HttpApi {
    pub fn new(config: &Config, credential: Credential) -> Self {
        if credential.is_empty() {
            tracing::warn!(
                env = %config.api_key_env,
                "API key variable is unset; requests will carry an empty key"
            );
        }
        Self {
            agent: ureq::AgentBuilder::new().build(),
            credential,
            list_url: config.endpoint_url(LIST_ENDPOINT),
            graph_url: config.endpoint_url(GRAPH_ENDPOINT),
            patch_url: config.endpoint_url(PATCH_ENDPOINT),
        }
    }

    /// POST `payload`, returning the status and raw body of any HTTP answer.
    fn post<T: Serialize>(&self, url: &str, payload: &T) -> Result<(u16, String), ClientError> {
        tracing::debug!(url, "POST");
        let response = self
            .agent
            .post(url)
            .set("accept", "application/json")
            .set("Content-Type", "application/json")
            .set(API_KEY_HEADER, self.credential.expose())
            .send_json(payload);

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => {
                return Err(ClientError::Transport {
                    url: url.to_owned(),
                    source: Box::new(err),
                })
            }
        };

        let status = response.status();
        // `into_string` caps bodies at 10 MB; graph listings can be larger.
        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|source| ClientError::Read {
                url: url.to_owned(),
                source,
            })?;
        tracing::debug!(url, status, bytes = body.len(), "response received");
        Ok((status, body))
    }

    fn call<T, R>(&self, url: &str, payload: &T) -> Result<RemoteOutcome<R>, ClientError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let (status, body) = self.post(url, payload)?;
        if status != 200 {
            return Ok(RemoteOutcome::Failure { status, body });
        }
        let decoded = serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url: url.to_owned(),
            source,
        })?;
        Ok(RemoteOutcome::Success(decoded))
    }
}

impl RemoteApi for HttpApi {
    fn list_flows(
        &self,
        request: &ListFlowsRequest,
    ) -> Result<RemoteOutcome<Vec<FlowId>>, ClientError> {
        let outcome: RemoteOutcome<ListFlowsResponse> = self.call(&self.list_url, request)?;
        Ok(outcome.map(ListFlowsResponse::into_flow_ids))
    }

    fn fetch_graph(
        &self,
        request: &GraphRequest,
    ) -> Result<RemoteOutcome<Vec<NodeDescriptor>>, ClientError> {
        let outcome: RemoteOutcome<GraphResponse> = self.call(&self.graph_url, request)?;
        Ok(outcome.map(|r| r.data.graph))
    }

    fn patch_node(&self, request: &PatchRequest) -> Result<RemoteOutcome<()>, ClientError> {
        // The patch response body is not inspected beyond its status.
        let (status, body) = self.post(&self.patch_url, request)?;
        if status == 200 {
            Ok(RemoteOutcome::Success(()))
        } else {
            Ok(RemoteOutcome::Failure { status, body })
        }
    }
}
