// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph mutation operations.
//!
//! Every operation is total: unknown ids, duplicate connections and self-loops are ignored
//! rather than reported. Applying ops yields a [`Delta`]; an empty delta means nothing changed
//! and the graph revision stays put, which is what the editor keys persistence off.

use std::collections::BTreeSet;

use crate::model::{Connection, Graph, Node, NodeId, NodePatch};

#[derive(Debug, Clone, PartialEq)]
pub enum GraphOp {
    AddNode(Node),
    MoveNode { node_id: NodeId, x: f64, y: f64 },
    UpdateNode { node_id: NodeId, patch: NodePatch },
    DeleteNode { node_id: NodeId },
    AddConnection { from: NodeId, to: NodeId },
    DeleteConnection { from: NodeId, to: NodeId },
}

/// What changed as the result of applying ops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub updated_nodes: Vec<NodeId>,
    pub added_connections: Vec<Connection>,
    pub removed_connections: Vec<Connection>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.updated_nodes.is_empty()
            && self.added_connections.is_empty()
            && self.removed_connections.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added_nodes: BTreeSet<NodeId>,
    removed_nodes: BTreeSet<NodeId>,
    updated_nodes: BTreeSet<NodeId>,
    added_connections: BTreeSet<Connection>,
    removed_connections: BTreeSet<Connection>,
}

impl DeltaBuilder {
    fn record_node_added(&mut self, node_id: NodeId) {
        self.removed_nodes.remove(&node_id);
        self.updated_nodes.remove(&node_id);
        self.added_nodes.insert(node_id);
    }

    fn record_node_removed(&mut self, node_id: NodeId) {
        self.updated_nodes.remove(&node_id);
        if !self.added_nodes.remove(&node_id) {
            self.removed_nodes.insert(node_id);
        }
    }

    fn record_node_updated(&mut self, node_id: NodeId) {
        if self.added_nodes.contains(&node_id) || self.removed_nodes.contains(&node_id) {
            return;
        }
        self.updated_nodes.insert(node_id);
    }

    fn record_connection_added(&mut self, connection: Connection) {
        if !self.removed_connections.remove(&connection) {
            self.added_connections.insert(connection);
        }
    }

    fn record_connection_removed(&mut self, connection: Connection) {
        if !self.added_connections.remove(&connection) {
            self.removed_connections.insert(connection);
        }
    }

    fn finish(self) -> Delta {
        Delta {
            added_nodes: self.added_nodes.into_iter().collect(),
            removed_nodes: self.removed_nodes.into_iter().collect(),
            updated_nodes: self.updated_nodes.into_iter().collect(),
            added_connections: self.added_connections.into_iter().collect(),
            removed_connections: self.removed_connections.into_iter().collect(),
        }
    }
}

/// Applies `ops` in order and bumps the graph revision once if anything changed.
pub fn apply_ops(graph: &mut Graph, ops: &[GraphOp]) -> Delta {
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_graph_op(graph, op, &mut delta);
    }

    let delta = delta.finish();
    if !delta.is_empty() {
        graph.bump_rev();
    }
    delta
}

pub fn apply_op(graph: &mut Graph, op: GraphOp) -> Delta {
    apply_ops(graph, std::slice::from_ref(&op))
}

impl Graph {
    /// Appends `node` unless a node with the same id exists.
    pub fn add_node(&mut self, node: Node) -> Delta {
        apply_op(self, GraphOp::AddNode(node))
    }

    /// Replaces the node's position. No bounds checks.
    pub fn move_node(&mut self, node_id: &NodeId, x: f64, y: f64) -> Delta {
        apply_op(self, GraphOp::MoveNode { node_id: node_id.clone(), x, y })
    }

    pub fn update_node(&mut self, node_id: &NodeId, patch: NodePatch) -> Delta {
        apply_op(self, GraphOp::UpdateNode { node_id: node_id.clone(), patch })
    }

    /// Removes the node and every connection touching it.
    pub fn delete_node(&mut self, node_id: &NodeId) -> Delta {
        apply_op(self, GraphOp::DeleteNode { node_id: node_id.clone() })
    }

    /// Adds `from -> to` unless it already exists or `from == to`.
    pub fn add_connection(&mut self, from: &NodeId, to: &NodeId) -> Delta {
        apply_op(self, GraphOp::AddConnection { from: from.clone(), to: to.clone() })
    }

    pub fn delete_connection(&mut self, from: &NodeId, to: &NodeId) -> Delta {
        apply_op(self, GraphOp::DeleteConnection { from: from.clone(), to: to.clone() })
    }
}

// Per-op application, kept apart from the public op types.
include!("ops_impl.rs");
