// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use flowboard::model::{Connection, Graph, Node, NodeId, NodeKind, PageStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn node_count(self) -> usize {
        match self {
            Self::Small => 16,
            Self::Medium => 120,
            Self::Large => 600,
        }
    }
}

pub fn node_id(idx: usize) -> NodeId {
    NodeId::new(format!("bench-{idx:05}")).expect("bench node id")
}

fn kind_for(idx: usize) -> NodeKind {
    match idx % 7 {
        0 => NodeKind::Decision,
        5 => NodeKind::Note,
        6 => NodeKind::Text,
        _ => NodeKind::Page,
    }
}

/// Pages on a 12-column grid, each wired to its right and lower neighbour.
pub fn graph(case: Case) -> Graph {
    let count = case.node_count();
    let nodes = (0..count)
        .map(|idx| {
            let x = (idx % 12) as f64 * 240.0;
            let y = (idx / 12) as f64 * 160.0;
            let kind = kind_for(idx);
            let node = Node::new(node_id(idx), kind, format!("Screen {idx}"), x, y);
            if kind == NodeKind::Page {
                node.with_status(Some(PageStatus::Designed))
            } else {
                node
            }
        })
        .collect::<Vec<_>>();

    let mut connections = Vec::new();
    for idx in 0..count {
        if idx % 12 != 11 && idx + 1 < count {
            connections.push(Connection::new(node_id(idx), node_id(idx + 1)));
        }
        if idx + 12 < count {
            connections.push(Connection::new(node_id(idx), node_id(idx + 12)));
        }
    }
    Graph::from_parts(nodes, connections)
}
