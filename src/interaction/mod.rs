// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer gesture state machine.
//!
//! At most one gesture is active at a time; the [`Gesture`] value *is* the state, so panning,
//! dragging and connecting cannot overlap. [`Interaction::handle`] is the single transition
//! function. It mutates the viewport directly (panning is presentation only) and reports graph
//! changes as [`Effect`]s for the editor to apply.

mod click;

use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::model::{Graph, NodeId};
use crate::ops::GraphOp;
use crate::render::{node_anchors, Anchor, HitTarget};
use crate::viewport::{ScreenPoint, Viewport, WorldPoint};

pub use click::{DoubleClickDetector, DOUBLE_CLICK_WINDOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Pointer input, already hit-tested against the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down { button: PointerButton, point: ScreenPoint, target: HitTarget },
    Move { point: ScreenPoint },
    Up { point: ScreenPoint, target: HitTarget },
    Leave,
    DoubleClick { point: ScreenPoint, target: HitTarget },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning {
        last: ScreenPoint,
    },
    /// `grab_offset` is pointer minus node position (world units) at grab time.
    DraggingNode {
        node_id: NodeId,
        grab_offset: (f64, f64),
    },
    ConnectingFrom {
        source: NodeId,
        anchor: Anchor,
        origin: WorldPoint,
        pointer: WorldPoint,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DraggingNode { .. } => "dragging",
            Self::ConnectingFrom { .. } => "connecting",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Apply(GraphOp),
    Select(Option<NodeId>),
    /// Ask which node type to create; `world` is where it will be placed.
    OpenNodePicker { screen: ScreenPoint, world: WorldPoint },
    BeginInlineEdit(NodeId),
}

pub type Effects = SmallVec<[Effect; 2]>;

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    gesture: Gesture,
    pan_modifier: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn pan_modifier(&self) -> bool {
        self.pan_modifier
    }

    /// The pan modifier is a precondition for panning, tracked apart from the gesture.
    pub fn set_pan_modifier(&mut self, active: bool) {
        self.pan_modifier = active;
    }

    pub fn toggle_pan_modifier(&mut self) -> bool {
        self.pan_modifier = !self.pan_modifier;
        self.pan_modifier
    }

    /// Rubber band endpoints while connecting.
    pub fn rubber_band(&self) -> Option<(WorldPoint, WorldPoint)> {
        match &self.gesture {
            Gesture::ConnectingFrom { origin, pointer, .. } => Some((*origin, *pointer)),
            _ => None,
        }
    }

    /// Drops any active gesture without side effects.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        graph: &Graph,
        viewport: &mut Viewport,
    ) -> Effects {
        let before = self.gesture.name();
        let effects = match event {
            PointerEvent::Down { button, point, target } => {
                self.pointer_down(button, point, target, graph, viewport)
            }
            PointerEvent::Move { point } => self.pointer_move(point, viewport),
            PointerEvent::Up { target, .. } => self.pointer_up(target),
            PointerEvent::Leave => {
                self.gesture = Gesture::Idle;
                Effects::new()
            }
            PointerEvent::DoubleClick { point, target } => {
                self.double_click(point, target, graph, viewport)
            }
        };
        if before != self.gesture.name() {
            trace!(from = before, to = self.gesture.name(), "gesture transition");
        }
        effects
    }

    fn pointer_down(
        &mut self,
        button: PointerButton,
        point: ScreenPoint,
        target: HitTarget,
        graph: &Graph,
        viewport: &Viewport,
    ) -> Effects {
        if !self.gesture.is_idle() {
            return Effects::new();
        }

        let pans = button == PointerButton::Middle
            || (button == PointerButton::Primary && self.pan_modifier);
        if pans {
            self.gesture = Gesture::Panning { last: point };
            return Effects::new();
        }
        if button != PointerButton::Primary {
            return Effects::new();
        }

        let world = viewport.screen_to_world(point);
        match target {
            HitTarget::Anchor(node_id, anchor) => {
                let Some(node) = graph.node(&node_id) else {
                    return Effects::new();
                };
                let origin = node_anchors(node)
                    .into_iter()
                    .find(|(side, _)| *side == anchor)
                    .map_or(world, |(_, point)| point);
                self.gesture =
                    Gesture::ConnectingFrom { source: node_id, anchor, origin, pointer: world };
                Effects::new()
            }
            HitTarget::Body(node_id) => {
                let Some(node) = graph.node(&node_id) else {
                    return Effects::new();
                };
                let grab_offset = (world.x - node.x(), world.y - node.y());
                self.gesture = Gesture::DraggingNode { node_id: node_id.clone(), grab_offset };
                smallvec![Effect::Select(Some(node_id))]
            }
            HitTarget::Canvas => smallvec![Effect::Select(None)],
        }
    }

    fn pointer_move(&mut self, point: ScreenPoint, viewport: &mut Viewport) -> Effects {
        match &mut self.gesture {
            Gesture::Idle => Effects::new(),
            Gesture::Panning { last } => {
                viewport.pan_by(point.x - last.x, point.y - last.y);
                *last = point;
                Effects::new()
            }
            Gesture::DraggingNode { node_id, grab_offset } => {
                let world = viewport.screen_to_world(point);
                smallvec![Effect::Apply(GraphOp::MoveNode {
                    node_id: node_id.clone(),
                    x: world.x - grab_offset.0,
                    y: world.y - grab_offset.1,
                })]
            }
            Gesture::ConnectingFrom { pointer, .. } => {
                *pointer = viewport.screen_to_world(point);
                Effects::new()
            }
        }
    }

    fn pointer_up(&mut self, target: HitTarget) -> Effects {
        let gesture = std::mem::take(&mut self.gesture);
        let Gesture::ConnectingFrom { source, .. } = gesture else {
            return Effects::new();
        };
        match target {
            HitTarget::Anchor(to, _) | HitTarget::Body(to) if to != source => {
                smallvec![Effect::Apply(GraphOp::AddConnection { from: source, to })]
            }
            _ => Effects::new(),
        }
    }

    fn double_click(
        &mut self,
        point: ScreenPoint,
        target: HitTarget,
        graph: &Graph,
        viewport: &Viewport,
    ) -> Effects {
        if !self.gesture.is_idle() {
            return Effects::new();
        }
        match target {
            HitTarget::Canvas => smallvec![Effect::OpenNodePicker {
                screen: point,
                world: viewport.screen_to_world(point),
            }],
            HitTarget::Body(node_id) | HitTarget::Anchor(node_id, _) => {
                match graph.node(&node_id) {
                    Some(node) if node.kind().is_inline_editable() => smallvec![
                        Effect::Select(Some(node_id.clone())),
                        Effect::BeginInlineEdit(node_id),
                    ],
                    Some(_) => smallvec![Effect::Select(Some(node_id))],
                    None => Effects::new(),
                }
            }
        }
    }
}
