// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Turns primary presses into double-clicks: two presses on the same cell within the window.
///
/// Terminals only report presses, so this stands in for a native double-click event.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    window: Duration,
    last_press: Option<(Instant, (u16, u16))>,
}

impl Default for DoubleClickDetector {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW)
    }
}

impl DoubleClickDetector {
    pub fn new(window: Duration) -> Self {
        Self { window, last_press: None }
    }

    /// Records a press; returns `true` when it completes a double-click.
    pub fn press(&mut self, now: Instant, cell: (u16, u16)) -> bool {
        let is_double = matches!(
            self.last_press,
            Some((at, last_cell))
                if last_cell == cell && now.saturating_duration_since(at) <= self.window
        );
        self.last_press = if is_double { None } else { Some((now, cell)) };
        is_double
    }

    pub fn reset(&mut self) {
        self.last_press = None;
    }
}
