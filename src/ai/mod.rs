// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! LLM-backed generation: whole flows, page component lists and improvement suggestions.
//!
//! The model is reached through the [`LlmClient`] port, which takes a prompt plus a JSON schema
//! and returns JSON matching it. Response types derive [`JsonSchema`] so the schema sent is the
//! one the decoder expects.

mod http;

use std::fmt;
use std::fmt::Write as _;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{Graph, IconKey, IdAllocator, Node, NodeId, NodeKind};
use crate::ops::GraphOp;

pub use http::HttpLlmClient;

/// Horizontal gap before the first generated node, right of the existing graph.
pub const FLOW_X_GAP: f64 = 250.0;
/// X of the first generated node when the graph is empty.
pub const FLOW_X_START: f64 = 100.0;
pub const FLOW_X_STEP: f64 = 200.0;
pub const FLOW_Y_BASE: f64 = 200.0;
pub const FLOW_Y_JITTER: f64 = 80.0;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends `prompt` and returns a JSON value shaped by `response_schema`.
    async fn invoke(&self, prompt: &str, response_schema: &Value) -> Result<Value, AiError>;
}

#[derive(Debug)]
pub enum AiError {
    MissingApiKey { var: String },
    Transport(String),
    Http { status: u16, body: String },
    Decode(serde_json::Error),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey { var } => write!(f, "missing api key: {var} is not set"),
            Self::Transport(message) => write!(f, "network error: {message}"),
            Self::Http { status, body } => write!(f, "http {status}: {body}"),
            Self::Decode(source) => write!(f, "unexpected response: {source}"),
        }
    }
}

impl std::error::Error for AiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(source) => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFlow {
    pub nodes: Vec<GeneratedNode>,
    /// Edges between `nodes`, by position in that list.
    #[serde(default)]
    pub connections: Vec<GeneratedConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedNode {
    pub name: String,
    /// One of `start`, `end`, `decision`, `page`, `text`, `note`.
    #[serde(rename = "type", default = "default_generated_kind")]
    pub kind: String,
    /// Icon name such as `LogIn` or `ShoppingCart`.
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
}

fn default_generated_kind() -> String {
    NodeKind::Page.as_str().to_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedConnection {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentList {
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    pub title: String,
    pub detail: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionList {
    pub suggestions: Vec<Suggestion>,
}

pub fn response_schema<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

async fn invoke_typed<T>(client: &dyn LlmClient, prompt: &str) -> Result<T, AiError>
where
    T: JsonSchema + DeserializeOwned,
{
    let schema = response_schema::<T>();
    let value = client.invoke(prompt, &schema).await?;
    serde_json::from_value(value).map_err(AiError::Decode)
}

pub fn flow_prompt(description: &str) -> String {
    format!(
        "Design a user flow for the following product: {}\n\
         Return the screens as nodes (type start, end, decision or page) with a short name and \
         an icon name, and the connections between them by node index. Start with one start \
         node and finish with at least one end node.",
        description.trim()
    )
}

pub fn components_prompt(page_name: &str, description: &str) -> String {
    format!(
        "List the UI components a wireframe of the \"{}\" page needs. Context: {}\n\
         Return short component names such as \"Email input\" or \"Primary button\".",
        page_name.trim(),
        description.trim()
    )
}

/// Describes the graph's nodes and connections for a review prompt.
pub fn suggestions_prompt(graph: &Graph) -> String {
    let mut prompt = String::from(
        "Review this user flow and suggest UX improvements (missing screens, dead ends, \
         confusing branches). Give each a title, a detail and a priority.\n\nNodes:\n",
    );
    for node in graph.nodes() {
        let _ = write!(prompt, "- {} ({}", node.name(), node.kind().as_str());
        if let Some(status) = node.status() {
            let _ = write!(prompt, ", {}", status.as_str());
        }
        prompt.push_str(")\n");
    }
    prompt.push_str("\nConnections:\n");
    for (_, from, to) in graph.resolved_connections() {
        let _ = writeln!(prompt, "- {} -> {}", from.name(), to.name());
    }
    prompt
}

pub async fn generate_flow(
    client: &dyn LlmClient,
    description: &str,
) -> Result<GeneratedFlow, AiError> {
    let flow: GeneratedFlow = invoke_typed(client, &flow_prompt(description)).await?;
    debug!(nodes = flow.nodes.len(), connections = flow.connections.len(), "generated flow");
    Ok(flow)
}

pub async fn generate_components(
    client: &dyn LlmClient,
    page_name: &str,
    description: &str,
) -> Result<Vec<String>, AiError> {
    let list: ComponentList =
        invoke_typed(client, &components_prompt(page_name, description)).await?;
    Ok(list
        .components
        .into_iter()
        .map(|component| component.trim().to_owned())
        .filter(|component| !component.is_empty())
        .collect())
}

pub async fn suggest_improvements(
    client: &dyn LlmClient,
    graph: &Graph,
) -> Result<Vec<Suggestion>, AiError> {
    let prompt = suggestions_prompt(graph);
    let list: SuggestionList = invoke_typed(client, &prompt).await?;
    Ok(list.suggestions)
}

/// Turns a generated flow into one batch of graph ops.
///
/// Nodes are laid out left to right after the rightmost existing node, with a sinusoidal
/// vertical offset. Icon names go through the loose registry lookup. Connections that point
/// outside the node list are dropped.
pub fn flow_to_ops(flow: &GeneratedFlow, graph: &Graph, ids: &mut IdAllocator) -> Vec<GraphOp> {
    let base_x = graph.max_x().map_or(FLOW_X_START, |max_x| max_x + FLOW_X_GAP);
    let mut node_ids = Vec::<NodeId>::with_capacity(flow.nodes.len());
    let mut ops = Vec::with_capacity(flow.nodes.len() + flow.connections.len());

    for (index, generated) in flow.nodes.iter().enumerate() {
        let kind = generated.kind.parse().unwrap_or_else(|_| {
            warn!(kind = %generated.kind, "unknown generated node type; using page");
            NodeKind::Page
        });
        let name = match generated.name.trim() {
            "" => kind.default_name().to_owned(),
            name => name.to_owned(),
        };
        let icon = generated
            .icon_name
            .as_deref()
            .map_or_else(|| kind.default_icon(), IconKey::resolve_loose);

        let i = index as f64;
        let x = base_x + i * FLOW_X_STEP;
        let y = FLOW_Y_BASE + (i * 0.9).sin() * FLOW_Y_JITTER;

        let node_id = ids.next_unused("node", |candidate| {
            graph.contains_node(candidate) || node_ids.contains(candidate)
        });
        let mut node = Node::new(node_id.clone(), kind, name, x, y).with_icon(icon);
        if !generated.components.is_empty() {
            *node.components_mut() = generated.components.clone();
        }
        node_ids.push(node_id);
        ops.push(GraphOp::AddNode(node));
    }

    for connection in &flow.connections {
        let (Some(from), Some(to)) = (node_ids.get(connection.from), node_ids.get(connection.to))
        else {
            debug!(from = connection.from, to = connection.to, "dropping out-of-range connection");
            continue;
        };
        ops.push(GraphOp::AddConnection { from: from.clone(), to: to.clone() });
    }
    ops
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiTask {
    Flow,
    Components(NodeId),
    Suggestions,
}

impl AiTask {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flow => "flow generation",
            Self::Components(_) => "component generation",
            Self::Suggestions => "suggestions",
        }
    }
}

/// Results coming back from an AI request.
#[derive(Debug)]
pub enum AiOutcome {
    Flow(Result<GeneratedFlow, AiError>),
    Components { node_id: NodeId, result: Result<Vec<String>, AiError> },
    Suggestions(Result<Vec<Suggestion>, AiError>),
}

/// At most one AI request in flight; triggers are refused while one is pending.
#[derive(Debug, Clone, Default)]
pub struct AiTracker {
    pending: Option<AiTask>,
}

impl AiTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&AiTask> {
        self.pending.as_ref()
    }

    /// Marks `task` as in flight. Returns `false` (and changes nothing) when busy.
    pub fn try_begin(&mut self, task: AiTask) -> bool {
        if self.pending.is_some() {
            debug!(task = task.label(), "ai request already pending; ignoring trigger");
            return false;
        }
        self.pending = Some(task);
        true
    }

    pub fn finish(&mut self) -> Option<AiTask> {
        self.pending.take()
    }
}
