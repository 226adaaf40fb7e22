// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`Graph`] holds typed, positioned [`Node`]s and directed [`Connection`]s. Icons are stored as
//! registry keys ([`IconKey`]).

pub mod fixtures;
pub mod graph;
pub mod icon;
pub mod ids;
pub mod node;

pub use fixtures::default_graph;
pub use graph::{Connection, Graph};
pub use icon::{IconDef, IconKey, DEFAULT_ICON_KEY};
pub use ids::{Id, IdAllocator, IdError, NodeId, ProjectId, TemplateId};
pub use node::{Node, NodeKind, NodePatch, PageStatus, ParseNodeKindError, ParsePageStatusError};
