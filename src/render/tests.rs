// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{
    hit_test, node_anchors, render_canvas, render_node, Anchor, CanvasOptions, CellMetrics,
    CellRole, HitTarget, NodeShape,
};
use crate::model::{default_graph, Connection, Graph, Node, NodeId, NodeKind};
use crate::viewport::{ScreenPoint, Viewport, WorldPoint};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

#[rstest]
#[case(NodeKind::Start, NodeShape::Circle, 2)]
#[case(NodeKind::End, NodeShape::Circle, 2)]
#[case(NodeKind::Decision, NodeShape::Diamond, 4)]
#[case(NodeKind::Page, NodeShape::RoundedRect, 4)]
#[case(NodeKind::Text, NodeShape::FreeText, 4)]
#[case(NodeKind::Note, NodeShape::StickyNote, 4)]
fn render_node_dispatches_on_kind(
    #[case] kind: NodeKind,
    #[case] shape: NodeShape,
    #[case] anchors: usize,
) {
    let node = Node::new(nid("n"), kind, "Label", 10.0, 20.0);
    let visual = render_node(&node, false, &Viewport::new());

    assert_eq!(visual.shape, shape);
    assert_eq!(visual.anchors.len(), anchors);
    assert_eq!(visual.top_left, ScreenPoint::new(10.0, 20.0));
    assert_eq!(visual.affordances.inline_text, matches!(kind, NodeKind::Text | NodeKind::Note));
    assert_eq!(visual.affordances.icon_swap, kind == NodeKind::Page);
}

#[test]
fn circular_nodes_only_expose_side_anchors() {
    let node = Node::new(nid("s"), NodeKind::Start, "Start", 0.0, 0.0);
    let sides = node_anchors(&node).iter().map(|(anchor, _)| *anchor).collect::<Vec<_>>();
    assert_eq!(sides, vec![Anchor::East, Anchor::West]);
}

#[test]
fn render_node_scales_with_zoom() {
    let mut viewport = Viewport::new();
    viewport.set_zoom_percent(200);
    viewport.set_pan(10.0, 0.0);
    let node = Node::new(nid("p"), NodeKind::Page, "Page", 100.0, 50.0);

    let visual = render_node(&node, true, &viewport);
    assert_eq!(visual.top_left, ScreenPoint::new(210.0, 100.0));
    assert_eq!(visual.screen_width, 352.0);
    assert!(visual.selected);
}

#[rstest]
#[case(ScreenPoint::new(250.0, 220.0), HitTarget::Body(nid("login")))]
#[case(ScreenPoint::new(160.0, 224.0), HitTarget::Anchor(nid("login"), Anchor::West))]
#[case(ScreenPoint::new(336.0, 224.0), HitTarget::Anchor(nid("login"), Anchor::East))]
#[case(ScreenPoint::new(248.0, 176.0), HitTarget::Anchor(nid("login"), Anchor::North))]
#[case(ScreenPoint::new(50.0, 50.0), HitTarget::Canvas)]
fn hit_test_on_default_graph(#[case] point: ScreenPoint, #[case] expected: HitTarget) {
    assert_eq!(hit_test(&default_graph(), &Viewport::new(), point), expected);
}

#[test]
fn hit_test_prefers_topmost_node() {
    let graph = Graph::from_parts(
        vec![
            Node::new(nid("below"), NodeKind::Page, "Below", 0.0, 0.0),
            Node::new(nid("above"), NodeKind::Note, "Above", 40.0, 20.0),
        ],
        Vec::new(),
    );
    let hit = hit_test(&graph, &Viewport::new(), ScreenPoint::new(100.0, 60.0));
    assert_eq!(hit, HitTarget::Body(nid("above")));
}

#[test]
fn hit_test_follows_pan_and_zoom() {
    let mut viewport = Viewport::new();
    viewport.set_origin(ScreenPoint::new(0.0, 16.0));
    viewport.set_pan(-100.0, 0.0);
    viewport.set_zoom_percent(50);

    // login spans world x 160..336 -> screen x -20..68 at 50% with pan -100.
    let hit = hit_test(&default_graph(), &viewport, ScreenPoint::new(30.0, 16.0 + 110.0));
    assert_eq!(hit, HitTarget::Body(nid("login")));
}

#[test]
fn cell_metrics_map_cells_to_screen_centres() {
    let metrics = CellMetrics::TERMINAL;
    assert_eq!(metrics.cell_center(20, 14), ScreenPoint::new(164.0, 232.0));
    assert_eq!(metrics.cell_at(ScreenPoint::new(164.0, 232.0)), (20, 14));
    assert_eq!(metrics.cell_origin(1, 1), ScreenPoint::new(8.0, 16.0));
}

#[test]
fn canvas_draws_nodes_labels_and_arrows() {
    let options = CanvasOptions::default();
    let canvas = render_canvas(&default_graph(), &Viewport::new(), &options, 140, 30);
    let lines = canvas.to_lines();

    let corner = canvas.get(20, 11).expect("login corner");
    assert_eq!(corner.ch, '╭');
    assert_eq!(corner.role, CellRole::Border);
    assert_eq!(corner.kind, Some(NodeKind::Page));

    assert!(lines[12].contains("Login"), "{}", lines[12]);
    assert!(lines[13].contains("designed"), "{}", lines[13]);
    assert!(lines[4].contains("Verified?"), "{}", lines[4]);
    assert!(lines[17].contains("Start"), "{}", lines[17]);

    let arrow = canvas.get(19, 14).expect("arrow into login");
    assert_eq!((arrow.ch, arrow.role), ('▶', CellRole::Arrow));
    let wire = canvas.get(15, 14).expect("wire");
    assert_eq!((wire.ch, wire.role), ('─', CellRole::Connection));
}

#[test]
fn canvas_skips_dangling_connections() {
    let graph = Graph::from_parts(
        vec![Node::new(nid("a"), NodeKind::Page, "A", 0.0, 0.0)],
        vec![Connection::new(nid("a"), nid("gone"))],
    );
    let canvas = render_canvas(&graph, &Viewport::new(), &CanvasOptions::default(), 60, 20);
    for row in 0..canvas.height() {
        for col in 0..canvas.width() {
            let role = canvas.get(col, row).map(|cell| cell.role);
            assert!(!matches!(role, Some(CellRole::Connection | CellRole::Arrow)));
        }
    }
}

#[test]
fn canvas_marks_selection_and_rubber_band() {
    let options = CanvasOptions {
        selected: Some(nid("login")),
        rubber_band: Some((WorldPoint::new(0.0, 0.0), WorldPoint::new(80.0, 0.0))),
        ..CanvasOptions::default()
    };
    let canvas = render_canvas(&default_graph(), &Viewport::new(), &options, 140, 30);

    assert!(canvas.get(20, 11).is_some_and(|cell| cell.selected));
    assert!(canvas.get(20, 14).is_some_and(|cell| cell.ch == '●'));
    assert!(canvas.get(5, 12).is_some_and(|cell| !cell.selected));

    let band = (0..=10)
        .filter(|&col| canvas.get(col, 0).is_some_and(|cell| cell.role == CellRole::RubberBand))
        .count();
    assert_eq!(band, 11);
}

#[test]
fn canvas_clips_offscreen_geometry() {
    let mut graph = default_graph();
    graph.move_node(&nid("end"), 1e9, -1e9);
    let canvas = render_canvas(&graph, &Viewport::new(), &CanvasOptions::default(), 40, 10);
    assert_eq!(canvas.to_lines().len(), 10);
}
