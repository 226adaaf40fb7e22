// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Single-op mutation used by `apply_ops`.
fn apply_graph_op(graph: &mut Graph, op: &GraphOp, delta: &mut DeltaBuilder) {
    match op {
        GraphOp::AddNode(node) => {
            if graph.contains_node(node.node_id()) {
                return;
            }
            delta.record_node_added(node.node_id().clone());
            graph.nodes_mut().push(node.clone());
        }
        GraphOp::MoveNode { node_id, x, y } => {
            let Some(existing) = graph.node_mut(node_id) else {
                return;
            };
            if existing.position() == (*x, *y) {
                return;
            }
            existing.set_position(*x, *y);
            delta.record_node_updated(node_id.clone());
        }
        GraphOp::UpdateNode { node_id, patch } => {
            let Some(existing) = graph.node_mut(node_id) else {
                return;
            };
            if patch.apply_to(existing) {
                delta.record_node_updated(node_id.clone());
            }
        }
        GraphOp::DeleteNode { node_id } => {
            let before_len = graph.nodes().len();
            graph.nodes_mut().retain(|node| node.node_id() != node_id);
            if graph.nodes().len() == before_len {
                return;
            }

            let removed = graph
                .connections()
                .iter()
                .filter(|connection| connection.touches(node_id))
                .cloned()
                .collect::<Vec<_>>();
            graph.connections_mut().retain(|connection| !connection.touches(node_id));
            for connection in removed {
                delta.record_connection_removed(connection);
            }
            delta.record_node_removed(node_id.clone());
        }
        GraphOp::AddConnection { from, to } => {
            if from == to || graph.contains_connection(from, to) {
                return;
            }
            if !graph.contains_node(from) || !graph.contains_node(to) {
                return;
            }
            let connection = Connection::new(from.clone(), to.clone());
            graph.connections_mut().push(connection.clone());
            delta.record_connection_added(connection);
        }
        GraphOp::DeleteConnection { from, to } => {
            let before_len = graph.connections().len();
            graph
                .connections_mut()
                .retain(|connection| !(connection.from() == from && connection.to() == to));
            if graph.connections().len() != before_len {
                delta.record_connection_removed(Connection::new(from.clone(), to.clone()));
            }
        }
    }
}
