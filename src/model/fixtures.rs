// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::graph::{Connection, Graph};
use super::icon::IconKey;
use super::ids::NodeId;
use super::node::{Node, NodeKind, PageStatus};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("static node id")
}

fn page(id: &str, name: &str, icon: &str, x: f64, y: f64, status: PageStatus) -> Node {
    Node::new(nid(id), NodeKind::Page, name, x, y)
        .with_icon(IconKey::resolve(icon))
        .with_status(Some(status))
}

/// The example graph shown when nothing has been persisted yet: a short
/// login / sign-up / dashboard flow with 8 nodes and 7 connections.
pub fn default_graph() -> Graph {
    let nodes = vec![
        Node::new(nid("start"), NodeKind::Start, "Start", 40.0, 200.0),
        page("login", "Login", "log-in", 160.0, 176.0, PageStatus::Designed),
        page("signup", "Sign Up", "user-plus", 400.0, 48.0, PageStatus::Progress),
        page("forgot", "Forgot Password", "key", 400.0, 304.0, PageStatus::Pending),
        page("reset", "Reset Password", "lock", 640.0, 304.0, PageStatus::Pending),
        page("verify", "Verify Email", "mail", 640.0, 48.0, PageStatus::Pending),
        Node::new(nid("decision"), NodeKind::Decision, "Verified?", 864.0, 32.0),
        Node::new(nid("end"), NodeKind::End, "Dashboard", 1008.0, 48.0)
            .with_icon(IconKey::resolve("layout-dashboard")),
    ];

    let connections = [
        ("start", "login"),
        ("login", "signup"),
        ("login", "forgot"),
        ("forgot", "reset"),
        ("signup", "verify"),
        ("verify", "decision"),
        ("decision", "end"),
    ]
    .into_iter()
    .map(|(from, to)| Connection::new(nid(from), nid(to)))
    .collect();

    Graph::from_parts(nodes, connections)
}

#[cfg(test)]
pub(crate) fn two_page_graph() -> Graph {
    Graph::from_parts(
        vec![
            Node::new(nid("a"), NodeKind::Page, "A", 0.0, 0.0),
            Node::new(nid("b"), NodeKind::Page, "B", 320.0, 0.0),
        ],
        Vec::new(),
    )
}
