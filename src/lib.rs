// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flowboard: flow diagram editor for planning product screens.
//!
//! The library holds the graph model, the viewport and pointer state machine, the node renderer,
//! the template library, persistence and AI flow generation. The `tui` module is the terminal
//! front-end built on top of [`editor::Editor`].

pub mod ai;
pub mod config;
pub mod editor;
pub mod interaction;
pub mod model;
pub mod ops;
pub mod render;
pub mod store;
pub mod templates;
pub mod tui;
pub mod viewport;
