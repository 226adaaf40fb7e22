// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session: graph, viewport, gesture state, selection and modal state, wired to
//! persistence.
//!
//! Every graph change goes through [`Editor::apply_ops`]; a non-empty delta (re)schedules the
//! debounced save, so bursts of moves collapse into one write. Time is passed in explicitly.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::ai::{flow_to_ops, AiError, AiOutcome, AiTask, AiTracker, Suggestion};
use crate::interaction::{Effect, Interaction, PointerEvent};
use crate::model::{
    Connection, Graph, IdAllocator, Node, NodeId, NodeKind, NodePatch, PageStatus, TemplateId,
};
use crate::ops::{self, Delta, GraphOp};
use crate::store::{Debouncer, GraphStorage, KeyValueStore, StoreError};
use crate::templates::{Template, TemplateLibrary};
use crate::viewport::{ScreenPoint, Viewport, WorldPoint};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Node-type picker opened by a double-click on empty canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePicker {
    pub screen: ScreenPoint,
    pub world: WorldPoint,
}

/// A destructive action waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteNode(NodeId),
    DeleteConnection { from: NodeId, to: NodeId },
    DeleteTemplate(TemplateId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    pub node_id: NodeId,
    pub buffer: String,
}

/// What an AI result did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiApplied {
    Flow { nodes: usize, connections: usize },
    Components { node_id: NodeId, count: usize },
    Suggestions { count: usize },
}

#[derive(Debug)]
pub struct Editor<S> {
    graph: Graph,
    viewport: Viewport,
    interaction: Interaction,
    selected: Option<NodeId>,
    picker: Option<NodePicker>,
    confirmation: Option<Confirmation>,
    inline_edit: Option<InlineEdit>,
    templates: TemplateLibrary,
    storage: GraphStorage<S>,
    debouncer: Debouncer,
    ids: IdAllocator,
    ai: AiTracker,
    suggestions: Vec<Suggestion>,
}

impl<S: KeyValueStore> Editor<S> {
    /// Loads the project's graph (or the example graph) and the custom templates.
    pub fn open(storage: GraphStorage<S>, debounce: Duration) -> Self {
        let graph = storage.load_graph();
        let templates = TemplateLibrary::new(storage.load_templates());
        info!(
            project = %storage.project(),
            nodes = graph.nodes().len(),
            templates = templates.custom().len(),
            "editor opened"
        );
        Self {
            graph,
            viewport: Viewport::new(),
            interaction: Interaction::new(),
            selected: None,
            picker: None,
            confirmation: None,
            inline_edit: None,
            templates,
            storage,
            debouncer: Debouncer::new(debounce),
            ids: IdAllocator::new(),
            ai: AiTracker::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_id_allocator(mut self, ids: IdAllocator) -> Self {
        self.ids = ids;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn toggle_pan_modifier(&mut self) -> bool {
        self.interaction.toggle_pan_modifier()
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_ref().and_then(|node_id| self.graph.node(node_id))
    }

    pub fn select(&mut self, node_id: Option<NodeId>) {
        let node_id = node_id.filter(|node_id| self.graph.contains_node(node_id));
        if self.inline_edit.as_ref().is_some_and(|edit| Some(&edit.node_id) != node_id.as_ref()) {
            self.inline_edit = None;
        }
        self.selected = node_id;
    }

    pub fn picker(&self) -> Option<&NodePicker> {
        self.picker.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn inline_edit(&self) -> Option<&InlineEdit> {
        self.inline_edit.as_ref()
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    pub fn storage(&self) -> &GraphStorage<S> {
        &self.storage
    }

    pub fn ai(&self) -> &AiTracker {
        &self.ai
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    /// A modal (picker, confirmation or inline edit) owns the input.
    pub fn is_modal(&self) -> bool {
        self.picker.is_some() || self.confirmation.is_some() || self.inline_edit.is_some()
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn time_until_save(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    /// Applies `ops` as one batch and schedules a save if anything changed.
    pub fn apply_ops(&mut self, ops: &[GraphOp], now: Instant) -> Delta {
        let delta = ops::apply_ops(&mut self.graph, ops);
        if delta.is_empty() {
            return delta;
        }

        if let Some(selected) = &self.selected {
            if delta.removed_nodes.contains(selected) {
                self.selected = None;
            }
        }
        if let Some(edit) = &self.inline_edit {
            if delta.removed_nodes.contains(&edit.node_id) {
                self.inline_edit = None;
            }
        }
        self.debouncer.schedule(now);
        delta
    }

    pub fn apply_op(&mut self, op: GraphOp, now: Instant) -> Delta {
        self.apply_ops(std::slice::from_ref(&op), now)
    }

    /// Feeds a hit-tested pointer event through the gesture state machine and applies the effects.
    ///
    /// Pointer input is ignored while a picker or confirmation is open.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        if self.picker.is_some() || self.confirmation.is_some() {
            return;
        }
        let effects = self.interaction.handle(event, &self.graph, &mut self.viewport);
        for effect in effects {
            match effect {
                Effect::Apply(op) => {
                    self.apply_op(op, now);
                }
                Effect::Select(node_id) => self.select(node_id),
                Effect::OpenNodePicker { screen, world } => {
                    self.select(None);
                    self.picker = Some(NodePicker { screen, world });
                }
                Effect::BeginInlineEdit(node_id) => self.begin_inline_edit(&node_id),
            }
        }
    }

    /// Drops any active gesture, e.g. when the pointer leaves the canvas.
    pub fn cancel_gesture(&mut self) {
        self.interaction.cancel();
    }

    /// Adds a node of `kind` where the picker was opened and selects it.
    pub fn choose_node_kind(&mut self, kind: NodeKind, now: Instant) -> Option<NodeId> {
        let picker = self.picker.take()?;
        let node_id = self.fresh_node_id();
        let node = Node::new(
            node_id.clone(),
            kind,
            kind.default_name(),
            picker.world.x,
            picker.world.y,
        );
        self.apply_op(GraphOp::AddNode(node), now);
        self.select(Some(node_id.clone()));
        Some(node_id)
    }

    pub fn dismiss_picker(&mut self) {
        self.picker = None;
    }

    fn fresh_node_id(&mut self) -> NodeId {
        let graph = &self.graph;
        self.ids.next_unused("node", |candidate| graph.contains_node(candidate))
    }

    /// Asks to delete the selected node. Refused while editing text or with nothing selected.
    pub fn request_delete_selected(&mut self) -> bool {
        if self.inline_edit.is_some() {
            return false;
        }
        let Some(node_id) = self.selected_node().map(|node| node.node_id().clone()) else {
            return false;
        };
        self.confirmation = Some(Confirmation::DeleteNode(node_id));
        true
    }

    pub fn request_delete_connection(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.graph.contains_connection(&from, &to) {
            return false;
        }
        self.confirmation = Some(Confirmation::DeleteConnection { from, to });
        true
    }

    /// Built-in templates cannot be deleted, so they never reach confirmation.
    pub fn request_delete_template(&mut self, template_id: TemplateId) -> bool {
        if self.templates.is_builtin(&template_id) || self.templates.find(&template_id).is_none() {
            return false;
        }
        self.confirmation = Some(Confirmation::DeleteTemplate(template_id));
        true
    }

    /// Carries out the pending confirmation.
    pub fn confirm(&mut self, now: Instant) -> Result<Option<Confirmation>, StoreError> {
        let Some(confirmation) = self.confirmation.take() else {
            return Ok(None);
        };
        match &confirmation {
            Confirmation::DeleteNode(node_id) => {
                let delta = self.apply_op(GraphOp::DeleteNode { node_id: node_id.clone() }, now);
                debug!(
                    node = %node_id,
                    connections = delta.removed_connections.len(),
                    "deleted node"
                );
            }
            Confirmation::DeleteConnection { from, to } => {
                let op = GraphOp::DeleteConnection { from: from.clone(), to: to.clone() };
                self.apply_op(op, now);
            }
            Confirmation::DeleteTemplate(template_id) => {
                if self.templates.delete_template(template_id).is_some() {
                    self.storage.save_templates(self.templates.custom())?;
                }
            }
        }
        Ok(Some(confirmation))
    }

    /// Drops the pending confirmation without side effects.
    pub fn decline(&mut self) -> Option<Confirmation> {
        self.confirmation.take()
    }

    /// Outgoing connections of the selected node.
    pub fn selected_connections(&self) -> Vec<Connection> {
        let Some(node_id) = &self.selected else {
            return Vec::new();
        };
        self.graph.outgoing(node_id).cloned().collect()
    }

    /// Advances the selected page's icon through the registry.
    pub fn cycle_icon(&mut self, now: Instant) -> bool {
        let Some(node) = self.selected_node().filter(|node| node.kind() == NodeKind::Page) else {
            return false;
        };
        let patch = NodePatch { icon: Some(node.icon().next()), ..NodePatch::default() };
        let node_id = node.node_id().clone();
        !self.apply_op(GraphOp::UpdateNode { node_id, patch }, now).is_empty()
    }

    /// Advances the selected page's status; a page without status starts at `pending`.
    pub fn cycle_status(&mut self, now: Instant) -> bool {
        let Some(node) = self.selected_node().filter(|node| node.kind().supports_status()) else {
            return false;
        };
        let status = node.status().map_or(PageStatus::Pending, PageStatus::next);
        let patch = NodePatch { status: Some(status), ..NodePatch::default() };
        let node_id = node.node_id().clone();
        !self.apply_op(GraphOp::UpdateNode { node_id, patch }, now).is_empty()
    }

    /// Places a node from `template_id` at `at` and selects it.
    pub fn instantiate_template(
        &mut self,
        template_id: &TemplateId,
        at: WorldPoint,
        now: Instant,
    ) -> Option<NodeId> {
        let template = self.templates.find(template_id)?.clone();
        let node = template.instantiate(at, &mut self.ids, &self.graph);
        let node_id = node.node_id().clone();
        self.apply_op(GraphOp::AddNode(node), now);
        self.select(Some(node_id.clone()));
        Some(node_id)
    }

    /// Saves the selected node as a custom template and persists the library right away.
    pub fn save_selected_as_template(
        &mut self,
        name: &str,
    ) -> Result<Option<Template>, StoreError> {
        let Some(node) = self.selected_node().cloned() else {
            return Ok(None);
        };
        let template = self.templates.save_as_template(&node, name, &mut self.ids).clone();
        self.storage.save_templates(self.templates.custom())?;
        info!(template = %template.template_id, name = %template.name, "saved template");
        Ok(Some(template))
    }

    pub fn begin_inline_edit(&mut self, node_id: &NodeId) {
        let Some(node) = self.graph.node(node_id).filter(|node| node.kind().is_inline_editable())
        else {
            return;
        };
        self.selected = Some(node_id.clone());
        let buffer = node.name().to_owned();
        self.inline_edit = Some(InlineEdit { node_id: node_id.clone(), buffer });
    }

    pub fn inline_insert(&mut self, ch: char) {
        if let Some(edit) = &mut self.inline_edit {
            edit.buffer.push(ch);
        }
    }

    pub fn inline_backspace(&mut self) {
        if let Some(edit) = &mut self.inline_edit {
            edit.buffer.pop();
        }
    }

    /// Writes the buffer back as the node's name.
    pub fn commit_inline_edit(&mut self, now: Instant) -> bool {
        let Some(edit) = self.inline_edit.take() else {
            return false;
        };
        let op = GraphOp::UpdateNode { node_id: edit.node_id, patch: NodePatch::name(edit.buffer) };
        !self.apply_op(op, now).is_empty()
    }

    pub fn cancel_inline_edit(&mut self) {
        self.inline_edit = None;
    }

    /// Saves the graph once the debounce delay has passed since the last change.
    ///
    /// A failed save stays pending and is retried one debounce delay later.
    pub fn tick(&mut self, now: Instant) -> Result<bool, StoreError> {
        if !self.debouncer.poll(now) {
            return Ok(false);
        }
        let saved = self.save();
        if saved.is_err() {
            self.debouncer.schedule(now);
        }
        saved
    }

    /// Saves a pending change immediately (used on quit). The change stays pending on failure.
    pub fn flush(&mut self) -> Result<bool, StoreError> {
        if !self.debouncer.is_pending() {
            return Ok(false);
        }
        self.save()?;
        self.debouncer.cancel();
        Ok(true)
    }

    fn save(&mut self) -> Result<bool, StoreError> {
        if let Err(err) = self.storage.save_graph(&self.graph) {
            warn!(error = %err, "saving graph failed");
            return Err(err);
        }
        debug!(rev = self.graph.rev(), "flushed graph");
        Ok(true)
    }

    /// Starts an AI task unless one is already running.
    pub fn begin_ai(&mut self, task: AiTask) -> bool {
        self.ai.try_begin(task)
    }

    /// Applies a finished AI request. Failures are logged and leave the graph untouched.
    pub fn finish_ai(&mut self, outcome: AiOutcome, now: Instant) -> Result<AiApplied, AiError> {
        self.ai.finish();
        let applied = match outcome {
            AiOutcome::Flow(result) => result.map(|flow| {
                let ops = flow_to_ops(&flow, &self.graph, &mut self.ids);
                let delta = self.apply_ops(&ops, now);
                AiApplied::Flow {
                    nodes: delta.added_nodes.len(),
                    connections: delta.added_connections.len(),
                }
            }),
            AiOutcome::Components { node_id, result } => result.map(|components| {
                let count = components.len();
                let patch = NodePatch { components: Some(components), ..NodePatch::default() };
                let delta =
                    self.apply_op(GraphOp::UpdateNode { node_id: node_id.clone(), patch }, now);
                let count = if delta.is_empty() { 0 } else { count };
                AiApplied::Components { node_id, count }
            }),
            AiOutcome::Suggestions(result) => result.map(|suggestions| {
                self.suggestions = suggestions;
                AiApplied::Suggestions { count: self.suggestions.len() }
            }),
        };
        if let Err(err) = &applied {
            warn!(error = %err, "ai request failed");
        }
        applied
    }
}

#[cfg(test)]
mod tests;
