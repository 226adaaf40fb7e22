// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::{
    Connection, Graph, IconKey, Id, Node, NodeId, NodeKind, PageStatus, ProjectId,
};
use crate::templates::Template;

use super::{StorageKey, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeJson {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    x: f64,
    y: f64,
    #[serde(default)]
    icon_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    components: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConnectionJson {
    from: String,
    to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateJson {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    icon_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    components: Vec<String>,
}

pub fn encode_nodes(nodes: &[Node]) -> Result<String, serde_json::Error> {
    let nodes_json = nodes.iter().map(node_to_json).collect::<Vec<_>>();
    serde_json::to_string(&nodes_json)
}

pub fn encode_connections(connections: &[Connection]) -> Result<String, serde_json::Error> {
    let connections_json = connections
        .iter()
        .map(|connection| ConnectionJson {
            from: connection.from().to_string(),
            to: connection.to().to_string(),
        })
        .collect::<Vec<_>>();
    serde_json::to_string(&connections_json)
}

pub fn encode_templates(templates: &[Template]) -> Result<String, serde_json::Error> {
    let templates_json = templates.iter().map(template_to_json).collect::<Vec<_>>();
    serde_json::to_string(&templates_json)
}

/// Rebuilds a graph from its stored node and connection lists.
///
/// Icon keys are resolved through the registry (unknown keys fall back to the default icon). A
/// missing connection list is read as "no connections". Any other malformed content is an
/// error; callers decide whether to fall back.
pub fn decode_graph(
    project: &ProjectId,
    nodes_json: &str,
    connections_json: Option<&str>,
) -> Result<Graph, StoreError> {
    let nodes_raw: Vec<NodeJson> = serde_json::from_str(nodes_json)
        .map_err(|source| StoreError::Json { key: StorageKey::nodes(project), source })?;
    let connections_raw: Vec<ConnectionJson> = match connections_json {
        Some(json) => serde_json::from_str(json)
            .map_err(|source| StoreError::Json { key: StorageKey::connections(project), source })?,
        None => Vec::new(),
    };

    let mut nodes = Vec::with_capacity(nodes_raw.len());
    for node_json in nodes_raw {
        let node = node_from_json(node_json)?;
        if nodes.iter().any(|existing: &Node| existing.node_id() == node.node_id()) {
            continue;
        }
        nodes.push(node);
    }

    let mut connections = Vec::with_capacity(connections_raw.len());
    for ConnectionJson { from, to } in connections_raw {
        let connection = Connection::new(parse_id("from", from)?, parse_id("to", to)?);
        if !connections.contains(&connection) {
            connections.push(connection);
        }
    }

    Ok(Graph::from_parts(nodes, connections))
}

pub fn decode_templates(json: &str) -> Result<Vec<Template>, StoreError> {
    let templates_raw: Vec<TemplateJson> = serde_json::from_str(json)
        .map_err(|source| StoreError::Json { key: StorageKey::templates(), source })?;
    templates_raw.into_iter().map(template_from_json).collect()
}

fn node_to_json(node: &Node) -> NodeJson {
    NodeJson {
        id: node.node_id().to_string(),
        name: node.name().to_owned(),
        kind: node.kind().as_str().to_owned(),
        x: node.x(),
        y: node.y(),
        icon_key: Some(node.icon().as_str().to_owned()),
        status: node.status().map(|status| status.as_str().to_owned()),
        font_size: node.font_size(),
        text_color: node.text_color().map(str::to_owned),
        color: node.color().map(str::to_owned),
        components: node.components().to_vec(),
    }
}

fn node_from_json(node_json: NodeJson) -> Result<Node, StoreError> {
    let NodeJson {
        id,
        name,
        kind,
        x,
        y,
        icon_key,
        status,
        font_size,
        text_color,
        color,
        components,
    } = node_json;

    let node_id: NodeId = parse_id("node.id", id)?;
    let kind = parse_kind(kind)?;
    let mut node = Node::new(node_id, kind, name, x, y)
        .with_icon(icon_key.as_deref().map(IconKey::resolve).unwrap_or_else(|| kind.default_icon()))
        .with_status(parse_status(status)?);
    node.set_font_size(font_size);
    node.set_text_color(text_color);
    node.set_color(color);
    *node.components_mut() = components;
    Ok(node)
}

fn template_to_json(template: &Template) -> TemplateJson {
    TemplateJson {
        id: template.template_id.to_string(),
        name: template.name.clone(),
        kind: template.kind.as_str().to_owned(),
        icon_key: Some(template.icon.as_str().to_owned()),
        status: template.status.map(|status| status.as_str().to_owned()),
        font_size: template.font_size,
        text_color: template.text_color.clone(),
        color: template.color.clone(),
        components: template.components.clone(),
    }
}

fn template_from_json(template_json: TemplateJson) -> Result<Template, StoreError> {
    let TemplateJson {
        id,
        name,
        kind,
        icon_key,
        status,
        font_size,
        text_color,
        color,
        components,
    } = template_json;

    let kind = parse_kind(kind)?;
    Ok(Template {
        template_id: parse_id("template.id", id)?,
        name,
        kind,
        icon: icon_key.as_deref().map(IconKey::resolve).unwrap_or_else(|| kind.default_icon()),
        status: parse_status(status)?,
        font_size,
        text_color,
        color,
        components,
    })
}

fn parse_id<T>(field: &'static str, value: String) -> Result<Id<T>, StoreError> {
    Id::new(value.clone()).map_err(|source| StoreError::InvalidId { field, value, source })
}

fn parse_kind(value: String) -> Result<NodeKind, StoreError> {
    value.parse().map_err(|source| StoreError::InvalidNodeKind { value, source })
}

fn parse_status(value: Option<String>) -> Result<Option<PageStatus>, StoreError> {
    value
        .map(|value| value.parse::<PageStatus>().map_err(|_| StoreError::InvalidStatus { value }))
        .transpose()
}
