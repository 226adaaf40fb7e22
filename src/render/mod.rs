// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node rendering and hit testing.
//!
//! [`render_node`] is a pure mapping from a node (plus selection and viewport) to a
//! [`NodeVisual`]: its shape, bounds, label and connection anchors. [`canvas`] rasterizes those
//! visuals into terminal cells; [`hit_test`] answers what lies under a screen point.

use smallvec::SmallVec;

use crate::model::{Graph, Node, NodeId, NodeKind, PageStatus};
use crate::viewport::{ScreenPoint, Viewport, WorldPoint};

pub mod canvas;

pub use canvas::{render_canvas, CanvasBuffer, CanvasCell, CanvasOptions, CellRole};

pub const CIRCLE_DIAMETER: f64 = 64.0;
pub const DECISION_SIZE: f64 = 96.0;
pub const PAGE_WIDTH: f64 = 176.0;
pub const PAGE_HEIGHT: f64 = 96.0;
pub const NOTE_WIDTH: f64 = 160.0;
pub const NOTE_HEIGHT: f64 = 96.0;
pub const DEFAULT_FONT_SIZE: u16 = 16;

/// Half-size of an anchor's hit box, in screen pixels.
pub const ANCHOR_HIT_RADIUS: f64 = 8.0;

/// How world pixels map onto terminal cells at 100% zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f64,
    pub height: f64,
}

impl CellMetrics {
    pub const TERMINAL: Self = Self { width: 8.0, height: 16.0 };

    /// Screen position of the centre of cell `(col, row)`.
    pub fn cell_center(self, col: u16, row: u16) -> ScreenPoint {
        ScreenPoint::new(
            (f64::from(col) + 0.5) * self.width,
            (f64::from(row) + 0.5) * self.height,
        )
    }

    /// Top-left screen position of cell `(col, row)`.
    pub fn cell_origin(self, col: u16, row: u16) -> ScreenPoint {
        ScreenPoint::new(f64::from(col) * self.width, f64::from(row) * self.height)
    }

    /// Cell containing `point`, possibly negative or out of range.
    pub fn cell_at(self, point: ScreenPoint) -> (i64, i64) {
        ((point.x / self.width).floor() as i64, (point.y / self.height).floor() as i64)
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::TERMINAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Circle,
    Diamond,
    RoundedRect,
    FreeText,
    StickyNote,
}

impl NodeShape {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Start | NodeKind::End => Self::Circle,
            NodeKind::Decision => Self::Diamond,
            NodeKind::Page => Self::RoundedRect,
            NodeKind::Text => Self::FreeText,
            NodeKind::Note => Self::StickyNote,
        }
    }
}

/// Connection anchor on a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anchor {
    North,
    East,
    South,
    West,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit step (in cells) pointing away from the node.
    pub fn outward(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::East | Self::West)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldRect {
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn anchor_point(&self, anchor: Anchor) -> WorldPoint {
        let center = self.center();
        match anchor {
            Anchor::North => WorldPoint::new(center.x, self.y),
            Anchor::East => WorldPoint::new(self.x + self.width, center.y),
            Anchor::South => WorldPoint::new(center.x, self.y + self.height),
            Anchor::West => WorldPoint::new(self.x, center.y),
        }
    }
}

/// What the user can edit in place on a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub inline_text: bool,
    pub icon_swap: bool,
    pub status_cycle: bool,
}

/// Render-ready description of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub node_id: NodeId,
    pub kind: NodeKind,
    pub shape: NodeShape,
    pub bounds: WorldRect,
    pub top_left: ScreenPoint,
    pub screen_width: f64,
    pub screen_height: f64,
    pub label: String,
    pub glyph: char,
    pub status: Option<PageStatus>,
    pub components: usize,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub selected: bool,
    pub anchors: SmallVec<[(Anchor, WorldPoint); 4]>,
    pub affordances: Affordances,
}

/// Size of a node's bounding box in world pixels.
pub fn node_size(node: &Node) -> (f64, f64) {
    match NodeShape::for_kind(node.kind()) {
        NodeShape::Circle => (CIRCLE_DIAMETER, CIRCLE_DIAMETER),
        NodeShape::Diamond => (DECISION_SIZE, DECISION_SIZE),
        NodeShape::RoundedRect => (PAGE_WIDTH, PAGE_HEIGHT),
        NodeShape::StickyNote => (NOTE_WIDTH, NOTE_HEIGHT),
        NodeShape::FreeText => {
            let scale = f64::from(node.font_size().unwrap_or(DEFAULT_FONT_SIZE))
                / f64::from(DEFAULT_FONT_SIZE);
            let chars = node.name().chars().count().max(4) as f64;
            ((chars * 8.0 + 16.0) * scale, 32.0 * scale)
        }
    }
}

pub fn node_bounds(node: &Node) -> WorldRect {
    let (width, height) = node_size(node);
    WorldRect { x: node.x(), y: node.y(), width, height }
}

/// Anchors of a node: left/right for circular nodes, all four compass points otherwise.
pub fn node_anchors(node: &Node) -> SmallVec<[(Anchor, WorldPoint); 4]> {
    let bounds = node_bounds(node);
    let sides: &[Anchor] = if node.kind().is_circular() {
        &[Anchor::East, Anchor::West]
    } else {
        &Anchor::ALL
    };
    sides.iter().map(|&anchor| (anchor, bounds.anchor_point(anchor))).collect()
}

pub fn render_node(node: &Node, selected: bool, viewport: &Viewport) -> NodeVisual {
    let bounds = node_bounds(node);
    let kind = node.kind();
    NodeVisual {
        node_id: node.node_id().clone(),
        kind,
        shape: NodeShape::for_kind(kind),
        bounds,
        top_left: viewport.world_to_screen(WorldPoint::new(bounds.x, bounds.y)),
        screen_width: viewport.world_len_to_screen(bounds.width),
        screen_height: viewport.world_len_to_screen(bounds.height),
        label: node.name().to_owned(),
        glyph: node.icon().glyph(),
        status: node.status(),
        components: node.components().len(),
        color: node.color().map(str::to_owned),
        text_color: node.text_color().map(str::to_owned),
        selected,
        anchors: node_anchors(node),
        affordances: Affordances {
            inline_text: kind.is_inline_editable(),
            icon_swap: kind == NodeKind::Page,
            status_cycle: kind.supports_status(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Canvas,
    Body(NodeId),
    Anchor(NodeId, Anchor),
}

impl HitTarget {
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Canvas => None,
            Self::Body(node_id) | Self::Anchor(node_id, _) => Some(node_id),
        }
    }
}

/// What lies under `point`: the topmost node's anchor, then its body, then the canvas.
pub fn hit_test(graph: &Graph, viewport: &Viewport, point: ScreenPoint) -> HitTarget {
    let world = viewport.screen_to_world(point);
    for node in graph.nodes().iter().rev() {
        for (anchor, anchor_point) in node_anchors(node) {
            let screen = viewport.world_to_screen(anchor_point);
            if (screen.x - point.x).abs() <= ANCHOR_HIT_RADIUS
                && (screen.y - point.y).abs() <= ANCHOR_HIT_RADIUS
            {
                return HitTarget::Anchor(node.node_id().clone(), anchor);
            }
        }
        if node_bounds(node).contains(world) {
            return HitTarget::Body(node.node_id().clone());
        }
    }
    HitTarget::Canvas
}

/// The anchor pair used to draw `from -> to`: the closest pair by squared distance.
pub fn connection_anchors(from: &Node, to: &Node) -> ((Anchor, WorldPoint), (Anchor, WorldPoint)) {
    let from_anchors = node_anchors(from);
    let to_anchors = node_anchors(to);
    let mut best = (from_anchors[0], to_anchors[0]);
    let mut best_dist = f64::INFINITY;
    for &source in &from_anchors {
        for &target in &to_anchors {
            let dx = source.1.x - target.1.x;
            let dy = source.1.y - target.1.y;
            let dist = dx * dx + dy * dy;
            if dist < best_dist {
                best_dist = dist;
                best = (source, target);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests;
