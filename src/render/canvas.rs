// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rasterization of the visible graph into a grid of terminal cells.
//!
//! Paint order: connections, then nodes in graph order (later nodes cover earlier ones), then
//! connection arrowheads and the rubber band. Every cell carries a [`CellRole`] so the front-end
//! can style it without re-deriving geometry.

use crate::model::{Graph, NodeId, NodeKind, PageStatus};
use crate::viewport::{Viewport, WorldPoint};

use super::{connection_anchors, render_node, Anchor, CellMetrics, NodeShape, NodeVisual};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellRole {
    #[default]
    Empty,
    Border,
    Fill,
    Label,
    Icon,
    Status,
    Anchor,
    Connection,
    Arrow,
    RubberBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasCell {
    pub ch: char,
    pub role: CellRole,
    pub kind: Option<NodeKind>,
    pub status: Option<PageStatus>,
    pub selected: bool,
}

impl Default for CanvasCell {
    fn default() -> Self {
        Self { ch: ' ', role: CellRole::Empty, kind: None, status: None, selected: false }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CanvasOptions {
    pub selected: Option<NodeId>,
    /// Pending connection line: source anchor and live pointer, both in world coordinates.
    pub rubber_band: Option<(WorldPoint, WorldPoint)>,
    pub metrics: CellMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasBuffer {
    width: u16,
    height: u16,
    cells: Vec<CanvasCell>,
}

impl CanvasBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![CanvasCell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&CanvasCell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(usize::from(row) * usize::from(self.width) + usize::from(col))
    }

    /// Plain text rows, trailing spaces trimmed.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                let line = (0..self.width)
                    .filter_map(|col| self.get(col, row).map(|cell| cell.ch))
                    .collect::<String>();
                line.trim_end().to_owned()
            })
            .collect()
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 || col >= i64::from(self.width) || row >= i64::from(self.height) {
            return None;
        }
        usize::try_from(row * i64::from(self.width) + col).ok()
    }

    fn put(&mut self, col: i64, row: i64, cell: CanvasCell) {
        if let Some(index) = self.index(col, row) {
            self.cells[index] = cell;
        }
    }

    fn clamp_col(&self, col: i64) -> i64 {
        col.clamp(-1, i64::from(self.width))
    }

    fn clamp_row(&self, row: i64) -> i64 {
        row.clamp(-1, i64::from(self.height))
    }
}

/// Renders the graph as seen through `viewport` into a `width` x `height` cell grid whose
/// top-left cell sits at the viewport origin.
pub fn render_canvas(
    graph: &Graph,
    viewport: &Viewport,
    options: &CanvasOptions,
    width: u16,
    height: u16,
) -> CanvasBuffer {
    let mut painter = Painter {
        buffer: CanvasBuffer::new(width, height),
        viewport,
        metrics: options.metrics,
    };

    let visuals = graph
        .nodes()
        .iter()
        .map(|node| {
            let selected = options.selected.as_ref() == Some(node.node_id());
            render_node(node, selected, viewport)
        })
        .collect::<Vec<_>>();

    let mut arrows = Vec::new();
    for (_, from, to) in graph.resolved_connections() {
        let (source, target) = connection_anchors(from, to);
        let (Some(from_visual), Some(to_visual)) = (
            visuals.iter().find(|v| &v.node_id == from.node_id()),
            visuals.iter().find(|v| &v.node_id == to.node_id()),
        ) else {
            continue;
        };
        let start = step(painter.anchor_cell(from_visual, source), source.0.outward());
        let end = step(painter.anchor_cell(to_visual, target), target.0.outward());
        painter.elbow(start, end, source.0);
        arrows.push((end, target.0));
    }

    for visual in &visuals {
        painter.node(visual);
    }

    for (cell, anchor) in arrows {
        let ch = match anchor {
            Anchor::West => '▶',
            Anchor::East => '◀',
            Anchor::North => '▼',
            Anchor::South => '▲',
        };
        painter.buffer.put(cell.0, cell.1, plain(ch, CellRole::Arrow));
    }

    if let Some((from, to)) = options.rubber_band {
        let start = painter.cell_of(from);
        let end = painter.cell_of(to);
        painter.line(start, end);
    }

    painter.buffer
}

fn plain(ch: char, role: CellRole) -> CanvasCell {
    CanvasCell { ch, role, ..CanvasCell::default() }
}

fn step(cell: (i64, i64), by: (i64, i64)) -> (i64, i64) {
    (cell.0 + by.0, cell.1 + by.1)
}

struct Painter<'a> {
    buffer: CanvasBuffer,
    viewport: &'a Viewport,
    metrics: CellMetrics,
}

impl Painter<'_> {
    fn cell_of(&self, point: WorldPoint) -> (i64, i64) {
        let screen = self.viewport.world_to_screen(point);
        let origin = self.viewport.origin();
        let col = ((screen.x - origin.x) / self.metrics.width).floor();
        let row = ((screen.y - origin.y) / self.metrics.height).floor();
        (saturating_cell(col), saturating_cell(row))
    }

    /// Inclusive cell rectangle covered by a node.
    fn cell_rect(&self, visual: &NodeVisual) -> (i64, i64, i64, i64) {
        let origin = self.viewport.origin();
        let left = (visual.top_left.x - origin.x) / self.metrics.width;
        let top = (visual.top_left.y - origin.y) / self.metrics.height;
        let right = left + visual.screen_width / self.metrics.width;
        let bottom = top + visual.screen_height / self.metrics.height;

        let c0 = saturating_cell(left.floor());
        let r0 = saturating_cell(top.floor());
        let c1 = saturating_cell((right - 1e-6).floor()).max(c0);
        let r1 = saturating_cell((bottom - 1e-6).floor()).max(r0);
        (c0, r0, c1, r1)
    }

    fn anchor_cell(&self, visual: &NodeVisual, anchor: (Anchor, WorldPoint)) -> (i64, i64) {
        let (c0, r0, c1, r1) = self.cell_rect(visual);
        let (col, row) = self.cell_of(anchor.1);
        (col.clamp(c0, c1), row.clamp(r0, r1))
    }

    fn node(&mut self, visual: &NodeVisual) {
        let (c0, r0, c1, r1) = self.cell_rect(visual);
        let kind = Some(visual.kind);
        let cell = |ch: char, role: CellRole| CanvasCell {
            ch,
            role,
            kind,
            status: visual.status,
            selected: visual.selected,
        };

        if visual.shape != NodeShape::FreeText {
            self.fill(c0, r0, c1, r1, cell(' ', CellRole::Fill));
        }

        match visual.shape {
            NodeShape::RoundedRect => {
                self.frame(c0, r0, c1, r1, ['╭', '╮', '╰', '╯', '│', '│'], &cell);
            }
            NodeShape::StickyNote => {
                self.frame(c0, r0, c1, r1, ['┌', '┐', '└', '┘', '│', '│'], &cell);
            }
            NodeShape::Circle => {
                self.frame(c0, r0, c1, r1, ['╭', '╮', '╰', '╯', '(', ')'], &cell);
            }
            NodeShape::Diamond => self.diamond(c0, r0, c1, r1, &cell),
            NodeShape::FreeText => {}
        }

        let inner = (c1 - c0 - 1).max(0);
        let mid_row = r0 + (r1 - r0) / 2;
        match visual.shape {
            NodeShape::RoundedRect => {
                let icon = cell(' ', CellRole::Icon);
                self.text(c0 + 2, r0 + 1, &visual.glyph.to_string(), inner - 1, icon);
                self.text(c0 + 4, r0 + 1, &visual.label, inner - 3, cell(' ', CellRole::Label));
                if let Some(status) = visual.status {
                    if r0 + 2 < r1 {
                        let line = format!("● {status}");
                        self.text(c0 + 2, r0 + 2, &line, inner - 1, cell(' ', CellRole::Status));
                    }
                }
                if visual.components > 0 && r0 + 3 < r1 {
                    let summary = match visual.components {
                        1 => "1 component".to_owned(),
                        n => format!("{n} components"),
                    };
                    self.text(c0 + 2, r0 + 3, &summary, inner - 1, cell(' ', CellRole::Label));
                }
            }
            NodeShape::StickyNote => {
                let rows = (r1 - r0 - 1).max(0);
                let width = usize::try_from(inner - 1).unwrap_or(0);
                for (offset, line) in wrap(&visual.label, width).into_iter().enumerate() {
                    let Ok(offset) = i64::try_from(offset) else { break };
                    if offset >= rows {
                        break;
                    }
                    let label = cell(' ', CellRole::Label);
                    self.text(c0 + 2, r0 + 1 + offset, &line, inner - 1, label);
                }
            }
            NodeShape::Circle => {
                let glyph = visual.glyph.to_string();
                self.text(c0 + 1 + inner / 2, mid_row, &glyph, 1, cell(' ', CellRole::Icon));
                let len = i64::try_from(visual.label.chars().count()).unwrap_or(i64::MAX);
                let span = c1 - c0 + 1;
                let start = c0 + ((span - len) / 2).max(-span / 2);
                self.text(start, r1 + 1, &visual.label, span * 2, cell(' ', CellRole::Label));
            }
            NodeShape::Diamond => {
                let len = i64::try_from(visual.label.chars().count()).unwrap_or(i64::MAX);
                let start = c0 + 1 + ((inner - len) / 2).max(0);
                self.text(start, mid_row, &visual.label, inner, cell(' ', CellRole::Label));
            }
            NodeShape::FreeText => {
                self.text(c0, r0, &visual.label, c1 - c0 + 1, cell(' ', CellRole::Label));
            }
        }

        for &(anchor, point) in &visual.anchors {
            let (col, row) = self.anchor_cell(visual, (anchor, point));
            let ch = if visual.selected { '●' } else { '○' };
            self.buffer.put(col, row, cell(ch, CellRole::Anchor));
        }
    }

    fn fill(&mut self, c0: i64, r0: i64, c1: i64, r1: i64, cell: CanvasCell) {
        for row in self.buffer.clamp_row(r0)..=self.buffer.clamp_row(r1) {
            for col in self.buffer.clamp_col(c0)..=self.buffer.clamp_col(c1) {
                self.buffer.put(col, row, cell);
            }
        }
    }

    /// `glyphs`: top-left, top-right, bottom-left, bottom-right, left side, right side.
    fn frame(
        &mut self,
        c0: i64,
        r0: i64,
        c1: i64,
        r1: i64,
        glyphs: [char; 6],
        cell: &dyn Fn(char, CellRole) -> CanvasCell,
    ) {
        let [tl, tr, bl, br, left, right] = glyphs;
        for col in self.buffer.clamp_col(c0)..=self.buffer.clamp_col(c1) {
            self.buffer.put(col, r0, cell('─', CellRole::Border));
            self.buffer.put(col, r1, cell('─', CellRole::Border));
        }
        for row in self.buffer.clamp_row(r0)..=self.buffer.clamp_row(r1) {
            self.buffer.put(c0, row, cell(left, CellRole::Border));
            self.buffer.put(c1, row, cell(right, CellRole::Border));
        }
        self.buffer.put(c0, r0, cell(tl, CellRole::Border));
        self.buffer.put(c1, r0, cell(tr, CellRole::Border));
        self.buffer.put(c0, r1, cell(bl, CellRole::Border));
        self.buffer.put(c1, r1, cell(br, CellRole::Border));
    }

    fn diamond(
        &mut self,
        c0: i64,
        r0: i64,
        c1: i64,
        r1: i64,
        cell: &dyn Fn(char, CellRole) -> CanvasCell,
    ) {
        let rows = r1 - r0 + 1;
        let half_rows = rows as f64 / 2.0;
        let half_width = (c1 - c0 + 1) as f64 / 2.0;
        let center = c0 as f64 + half_width;

        for offset in 0..rows {
            let row = r0 + offset;
            let distance = ((offset as f64 + 0.5) - half_rows).abs() / half_rows;
            let reach = (half_width * (1.0 - distance) + 1.0).min(half_width);
            let left = saturating_cell((center - reach).floor()).max(c0);
            let right = saturating_cell((center + reach).ceil() - 1.0).min(c1);
            let upper = (offset as f64 + 0.5) < half_rows;
            let (lch, rch) = if upper { ('/', '\\') } else { ('\\', '/') };

            for col in self.buffer.clamp_col(c0)..=self.buffer.clamp_col(c1) {
                if col < left || col > right {
                    self.buffer.put(col, row, CanvasCell::default());
                }
            }
            self.buffer.put(left, row, cell(lch, CellRole::Border));
            self.buffer.put(right, row, cell(rch, CellRole::Border));
        }
    }

    fn text(&mut self, col: i64, row: i64, text: &str, max_width: i64, template: CanvasCell) {
        let max_width = usize::try_from(max_width).unwrap_or(0);
        let count = text.chars().count();
        let clipped: Box<dyn Iterator<Item = char>> = if count > max_width && max_width > 0 {
            Box::new(text.chars().take(max_width - 1).chain(std::iter::once('…')))
        } else {
            Box::new(text.chars().take(max_width))
        };
        for (offset, ch) in clipped.enumerate() {
            let Ok(offset) = i64::try_from(offset) else { break };
            self.buffer.put(col + offset, row, CanvasCell { ch, ..template });
        }
    }

    fn elbow(&mut self, start: (i64, i64), end: (i64, i64), source: Anchor) {
        let points = if source.is_horizontal() {
            let mid = (start.0 + end.0) / 2;
            [start, (mid, start.1), (mid, end.1), end]
        } else {
            let mid = (start.1 + end.1) / 2;
            [start, (start.0, mid), (end.0, mid), end]
        };

        let mut path = Vec::with_capacity(points.len());
        for point in points {
            if path.last() != Some(&point) {
                path.push(point);
            }
        }

        for pair in path.windows(2) {
            self.segment(pair[0], pair[1]);
        }
        if path.len() == 1 {
            self.buffer.put(start.0, start.1, plain('─', CellRole::Connection));
        }
        for window in path.windows(3) {
            let incoming = direction(window[0], window[1]);
            let outgoing = direction(window[1], window[2]);
            if let Some(ch) = corner(incoming, outgoing) {
                self.buffer.put(window[1].0, window[1].1, plain(ch, CellRole::Connection));
            }
        }
    }

    fn segment(&mut self, from: (i64, i64), to: (i64, i64)) {
        if from.1 == to.1 {
            let (lo, hi) = (from.0.min(to.0), from.0.max(to.0));
            for col in self.buffer.clamp_col(lo)..=self.buffer.clamp_col(hi) {
                if (lo..=hi).contains(&col) {
                    self.buffer.put(col, from.1, plain('─', CellRole::Connection));
                }
            }
        } else {
            let (lo, hi) = (from.1.min(to.1), from.1.max(to.1));
            for row in self.buffer.clamp_row(lo)..=self.buffer.clamp_row(hi) {
                if (lo..=hi).contains(&row) {
                    self.buffer.put(from.0, row, plain('│', CellRole::Connection));
                }
            }
        }
    }

    /// Bresenham line for the pending connection.
    fn line(&mut self, from: (i64, i64), to: (i64, i64)) {
        let (mut x, mut y) = from;
        let dx = (to.0 - from.0).abs();
        let dy = -(to.1 - from.1).abs();
        let sx = if from.0 < to.0 { 1 } else { -1 };
        let sy = if from.1 < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.buffer.put(x, y, plain('·', CellRole::RubberBand));
            if (x, y) == to {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

fn saturating_cell(value: f64) -> i64 {
    const LIMIT: f64 = 1e12;
    if value.is_nan() {
        return 0;
    }
    value.clamp(-LIMIT, LIMIT) as i64
}

fn direction(from: (i64, i64), to: (i64, i64)) -> (i64, i64) {
    ((to.0 - from.0).signum(), (to.1 - from.1).signum())
}

fn corner(incoming: (i64, i64), outgoing: (i64, i64)) -> Option<char> {
    match (incoming, outgoing) {
        ((1, 0), (0, 1)) | ((0, -1), (-1, 0)) => Some('┐'),
        ((1, 0), (0, -1)) | ((0, 1), (-1, 0)) => Some('┘'),
        ((-1, 0), (0, 1)) | ((0, -1), (1, 0)) => Some('┌'),
        ((-1, 0), (0, -1)) | ((0, 1), (1, 0)) => Some('└'),
        _ => None,
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
        if !current.is_empty() && current.chars().count() + needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
