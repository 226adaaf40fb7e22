// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::icon::IconKey;
use super::ids::NodeId;

/// The closed set of node variants on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Start,
    End,
    Decision,
    Page,
    Text,
    Note,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] =
        [Self::Start, Self::End, Self::Decision, Self::Page, Self::Text, Self::Note];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Decision => "decision",
            Self::Page => "page",
            Self::Text => "text",
            Self::Note => "note",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
            Self::Decision => "Decision",
            Self::Page => "Page",
            Self::Text => "Text",
            Self::Note => "Sticky note",
        }
    }

    /// Name given to a freshly created node of this kind.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
            Self::Decision => "Decision?",
            Self::Page => "New Page",
            Self::Text => "Text",
            Self::Note => "Note",
        }
    }

    pub fn default_icon(self) -> IconKey {
        let key = match self {
            Self::Start => "play",
            Self::End => "flag",
            Self::Decision => "git-branch",
            Self::Page => "file",
            Self::Text => "type",
            Self::Note => "sticky-note",
        };
        IconKey::resolve(key)
    }

    /// Whether the node's content is edited inline (the name *is* the content).
    pub fn is_inline_editable(self) -> bool {
        matches!(self, Self::Text | Self::Note)
    }

    /// Whether `fontSize` / `textColor` apply.
    pub fn supports_text_style(self) -> bool {
        matches!(self, Self::Text | Self::Note)
    }

    /// Whether the background `color` applies.
    pub fn supports_background(self) -> bool {
        matches!(self, Self::Note)
    }

    pub fn supports_status(self) -> bool {
        matches!(self, Self::Page)
    }

    /// Start/end nodes are drawn as circles and only expose left/right anchors.
    pub fn is_circular(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeKindError {
    value: String,
}

impl fmt::Display for ParseNodeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node type {:?}", self.value)
    }
}

impl std::error::Error for ParseNodeKindError {}

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNodeKindError { value: s.to_owned() })
    }
}

/// Design progress of a page node. Presentation only; any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    Pending,
    Progress,
    Designed,
    Complete,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Progress => "progress",
            Self::Designed => "designed",
            Self::Complete => "complete",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Pending => Self::Progress,
            Self::Progress => Self::Designed,
            Self::Designed => Self::Complete,
            Self::Complete => Self::Pending,
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePageStatusError;

impl fmt::Display for ParsePageStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid page status")
    }
}

impl std::error::Error for ParsePageStatusError {}

impl FromStr for PageStatus {
    type Err = ParsePageStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "progress" => Ok(Self::Progress),
            "designed" => Ok(Self::Designed),
            "complete" => Ok(Self::Complete),
            _ => Err(ParsePageStatusError),
        }
    }
}

/// A positioned, typed diagram element. `(x, y)` is the top-left corner in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    node_id: NodeId,
    name: String,
    kind: NodeKind,
    x: f64,
    y: f64,
    icon: IconKey,
    status: Option<PageStatus>,
    font_size: Option<u16>,
    text_color: Option<String>,
    color: Option<String>,
    components: Vec<String>,
}

impl Node {
    pub fn new(node_id: NodeId, kind: NodeKind, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            node_id,
            name: name.into(),
            kind,
            x,
            y,
            icon: kind.default_icon(),
            status: None,
            font_size: None,
            text_color: None,
            color: None,
            components: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: IconKey) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_status(mut self, status: Option<PageStatus>) -> Self {
        self.set_status(status);
        self
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn icon(&self) -> IconKey {
        self.icon
    }

    pub fn set_icon(&mut self, icon: IconKey) {
        self.icon = icon;
    }

    pub fn status(&self) -> Option<PageStatus> {
        self.status
    }

    /// Ignored for non-page nodes.
    pub fn set_status(&mut self, status: Option<PageStatus>) {
        if self.kind.supports_status() {
            self.status = status;
        }
    }

    pub fn font_size(&self) -> Option<u16> {
        self.font_size
    }

    /// Ignored unless the kind supports text styling.
    pub fn set_font_size(&mut self, font_size: Option<u16>) {
        if self.kind.supports_text_style() {
            self.font_size = font_size;
        }
    }

    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub fn set_text_color(&mut self, text_color: Option<String>) {
        if self.kind.supports_text_style() {
            self.text_color = text_color;
        }
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color(&mut self, color: Option<String>) {
        if self.kind.supports_background() {
            self.color = color;
        }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut Vec<String> {
        &mut self.components
    }
}

/// Shallow attribute merge for [`Node`]. `id`, `type` and position are not patchable here.
///
/// Attributes the node's kind does not support are dropped silently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub icon: Option<IconKey>,
    pub status: Option<PageStatus>,
    pub font_size: Option<u16>,
    pub text_color: Option<String>,
    pub color: Option<String>,
    pub components: Option<Vec<String>>,
}

impl NodePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the patch, returning whether the node changed.
    pub fn apply_to(&self, node: &mut Node) -> bool {
        let before = node.clone();
        if let Some(name) = &self.name {
            node.set_name(name.clone());
        }
        if let Some(icon) = self.icon {
            node.set_icon(icon);
        }
        if let Some(status) = self.status {
            node.set_status(Some(status));
        }
        if let Some(font_size) = self.font_size {
            node.set_font_size(Some(font_size));
        }
        if let Some(text_color) = &self.text_color {
            node.set_text_color(Some(text_color.clone()));
        }
        if let Some(color) = &self.color {
            node.set_color(Some(color.clone()));
        }
        if let Some(components) = &self.components {
            *node.components_mut() = components.clone();
        }
        *node != before
    }
}
