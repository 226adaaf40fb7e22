// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;
use super::node::Node;

/// Directed edge between two nodes, identified by its ordered endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Connection {
    from: NodeId,
    to: NodeId,
}

impl Connection {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.from == node_id || &self.to == node_id
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// All nodes and connections of one editing session.
///
/// Node order is paint order: later nodes are drawn on top and win hit tests. Mutations go
/// through [`crate::ops`], which keeps node ids unique and removes incident connections when a
/// node is deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    rev: u64,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from stored parts without validation (used by persistence).
    pub fn from_parts(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self { rev: 0, nodes, connections }
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub(crate) fn connections_mut(&mut self) -> &mut Vec<Connection> {
        &mut self.connections
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.node_id() == node_id)
    }

    pub(crate) fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.node_id() == node_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    pub fn contains_connection(&self, from: &NodeId, to: &NodeId) -> bool {
        self.connections.iter().any(|c| c.from() == from && c.to() == to)
    }

    /// Connections whose endpoints both exist, paired with the endpoint nodes.
    pub fn resolved_connections(&self) -> impl Iterator<Item = (&Connection, &Node, &Node)> {
        self.connections.iter().filter_map(move |connection| {
            let from = self.node(connection.from())?;
            let to = self.node(connection.to())?;
            Some((connection, from, to))
        })
    }

    pub fn outgoing<'a>(&'a self, node_id: &'a NodeId) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.from() == node_id)
    }

    pub fn incoming<'a>(&'a self, node_id: &'a NodeId) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.to() == node_id)
    }

    /// Largest top-left `x` among the nodes, used to place new content beside them.
    pub fn max_x(&self) -> Option<f64> {
        self.nodes.iter().map(Node::x).reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::{Connection, Graph};
    use crate::model::{Node, NodeId, NodeKind};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn resolved_connections_skip_dangling_endpoints() {
        let graph = Graph::from_parts(
            vec![
                Node::new(nid("a"), NodeKind::Start, "A", 0.0, 0.0),
                Node::new(nid("b"), NodeKind::End, "B", 100.0, 0.0),
            ],
            vec![Connection::new(nid("a"), nid("b")), Connection::new(nid("a"), nid("gone"))],
        );

        let resolved = graph
            .resolved_connections()
            .map(|(connection, _, _)| connection.clone())
            .collect::<Vec<_>>();
        assert_eq!(resolved, vec![Connection::new(nid("a"), nid("b"))]);
        assert_eq!(graph.connections().len(), 2);
    }

    #[test]
    fn max_x_is_none_for_empty_graph() {
        assert_eq!(Graph::new().max_x(), None);
    }
}
