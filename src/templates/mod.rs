// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node presets.
//!
//! Built-in templates are a static catalog grouped by category. Custom templates are saved from
//! existing nodes and persisted separately from the graph (see [`crate::store::GraphStorage`]).

use std::sync::OnceLock;

use crate::model::{
    Graph, IconKey, IdAllocator, Node, NodeKind, NodePatch, PageStatus, TemplateId,
};
use crate::viewport::WorldPoint;

/// A position-free node preset.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub template_id: TemplateId,
    pub name: String,
    pub kind: NodeKind,
    pub icon: IconKey,
    pub status: Option<PageStatus>,
    pub font_size: Option<u16>,
    pub text_color: Option<String>,
    pub color: Option<String>,
    pub components: Vec<String>,
}

impl Template {
    fn builtin(slug: &str, name: &str, kind: NodeKind, icon: &str) -> Self {
        Self {
            template_id: TemplateId::new(format!("builtin-{slug}")).expect("static template id"),
            name: name.to_owned(),
            kind,
            icon: IconKey::resolve(icon),
            status: None,
            font_size: None,
            text_color: None,
            color: None,
            components: Vec::new(),
        }
    }

    fn with_components(mut self, components: &[&str]) -> Self {
        self.components = components.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    /// Strips id and position from `node`, keeping type, icon and attributes.
    pub fn from_node(template_id: TemplateId, name: impl Into<String>, node: &Node) -> Self {
        Self {
            template_id,
            name: name.into(),
            kind: node.kind(),
            icon: node.icon(),
            status: node.status(),
            font_size: node.font_size(),
            text_color: node.text_color().map(str::to_owned),
            color: node.color().map(str::to_owned),
            components: node.components().to_vec(),
        }
    }

    /// Builds a node from this preset at `at`, with an id not yet used in `graph`.
    pub fn instantiate(&self, at: WorldPoint, ids: &mut IdAllocator, graph: &Graph) -> Node {
        let node_id = ids.next_unused("node", |candidate| graph.contains_node(candidate));
        let mut node = Node::new(node_id, self.kind, self.name.clone(), at.x, at.y)
            .with_icon(self.icon)
            .with_status(self.status);
        let attrs = NodePatch {
            font_size: self.font_size,
            text_color: self.text_color.clone(),
            color: self.color.clone(),
            components: (!self.components.is_empty()).then(|| self.components.clone()),
            ..NodePatch::default()
        };
        attrs.apply_to(&mut node);
        node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCategory {
    pub name: &'static str,
    pub templates: Vec<Template>,
}

/// The built-in catalog, in display order.
pub fn builtin_categories() -> &'static [TemplateCategory] {
    static CATALOG: OnceLock<Vec<TemplateCategory>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

fn build_catalog() -> Vec<TemplateCategory> {
    use NodeKind::{Decision, End, Note, Page, Start, Text};

    vec![
        TemplateCategory {
            name: "Authentication",
            templates: vec![
                Template::builtin("login-screen", "Login Screen", Page, "log-in").with_components(
                    &["Email input", "Password input", "Login button", "Forgot password link"],
                ),
                Template::builtin("sign-up", "Sign Up", Page, "user-plus").with_components(&[
                    "Name input",
                    "Email input",
                    "Password input",
                    "Create account button",
                ]),
                Template::builtin("forgot-password", "Forgot Password", Page, "key")
                    .with_components(&["Email input", "Send reset link button"]),
                Template::builtin("two-factor", "Two-Factor Check", Page, "shield-check")
                    .with_components(&["Code input", "Verify button", "Resend link"]),
            ],
        },
        TemplateCategory {
            name: "E-Commerce",
            templates: vec![
                Template::builtin("product-list", "Product List", Page, "list")
                    .with_components(&["Search bar", "Filter panel", "Product grid"]),
                Template::builtin("product-detail", "Product Detail", Page, "package")
                    .with_components(&["Image gallery", "Price", "Add to cart button"]),
                Template::builtin("shopping-cart", "Shopping Cart", Page, "shopping-cart")
                    .with_components(&["Line items", "Quantity stepper", "Checkout button"]),
                Template::builtin("checkout", "Checkout", Page, "credit-card")
                    .with_components(&["Address form", "Payment form", "Place order button"]),
                Template::builtin("order-confirmation", "Order Confirmation", Page, "check-circle")
                    .with_components(&["Order summary", "Continue shopping link"]),
            ],
        },
        TemplateCategory {
            name: "Onboarding",
            templates: vec![
                Template::builtin("welcome", "Welcome", Page, "home")
                    .with_components(&["Hero text", "Get started button"]),
                Template::builtin("profile-setup", "Profile Setup", Page, "user")
                    .with_components(&["Avatar upload", "Display name input", "Continue button"]),
                Template::builtin("preferences", "Preferences", Page, "settings")
                    .with_components(&["Topic checkboxes", "Notification toggle", "Finish button"]),
            ],
        },
        TemplateCategory {
            name: "Flow Control",
            templates: vec![
                Template::builtin("start", "Start", Start, "play"),
                Template::builtin("end", "End", End, "flag"),
                Template::builtin("decision", "Decision?", Decision, "git-branch"),
            ],
        },
        TemplateCategory {
            name: "Annotations",
            templates: vec![
                Template {
                    font_size: Some(24),
                    ..Template::builtin("heading", "Heading", Text, "type")
                },
                Template {
                    color: Some("#fef08a".to_owned()),
                    ..Template::builtin("sticky-note", "Sticky Note", Note, "sticky-note")
                },
            ],
        },
    ]
}

/// Built-in catalog plus the user's custom templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    custom: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new(custom: Vec<Template>) -> Self {
        Self { custom }
    }

    pub fn list_categories(&self) -> &'static [TemplateCategory] {
        builtin_categories()
    }

    pub fn custom(&self) -> &[Template] {
        &self.custom
    }

    /// Built-ins in catalog order, then custom templates.
    pub fn all(&self) -> impl Iterator<Item = &Template> {
        builtin_categories()
            .iter()
            .flat_map(|category| category.templates.iter())
            .chain(self.custom.iter())
    }

    pub fn find(&self, template_id: &TemplateId) -> Option<&Template> {
        self.all().find(|template| &template.template_id == template_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Template> {
        self.all().find(|template| template.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn is_builtin(&self, template_id: &TemplateId) -> bool {
        builtin_categories()
            .iter()
            .flat_map(|category| category.templates.iter())
            .any(|template| &template.template_id == template_id)
    }

    /// Saves `node` as a custom template. A blank name falls back to the node's name.
    pub fn save_as_template(
        &mut self,
        node: &Node,
        name: &str,
        ids: &mut IdAllocator,
    ) -> &Template {
        let name = match name.trim() {
            "" => node.name().to_owned(),
            trimmed => trimmed.to_owned(),
        };
        let template_id = ids.next_unused("tpl", |candidate| self.find(candidate).is_some());
        let index = self.custom.len();
        self.custom.push(Template::from_node(template_id, name, node));
        &self.custom[index]
    }

    /// Removes a custom template. Built-ins and unknown ids are left alone.
    pub fn delete_template(&mut self, template_id: &TemplateId) -> Option<Template> {
        let index = self.custom.iter().position(|template| &template.template_id == template_id)?;
        Some(self.custom.remove(index))
    }
}
