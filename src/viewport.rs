// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pan/zoom transform between screen and world coordinates.
//!
//! Rendering applies `translate(pan)` and then `scale(zoom)` with a top-left origin, relative to
//! the canvas origin on screen. The viewport is presentation state and is never persisted.

pub const MIN_ZOOM_PERCENT: u16 = 50;
pub const MAX_ZOOM_PERCENT: u16 = 200;
pub const ZOOM_STEP_PERCENT: u16 = 10;
pub const DEFAULT_ZOOM_PERCENT: u16 = 100;

/// A point in screen pixels (window space, before subtracting the canvas origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in graph coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    origin: ScreenPoint,
    pan_x: f64,
    pan_y: f64,
    zoom_percent: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: ScreenPoint::default(),
            pan_x: 0.0,
            pan_y: 0.0,
            zoom_percent: DEFAULT_ZOOM_PERCENT,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> ScreenPoint {
        self.origin
    }

    /// Screen position of the canvas' top-left corner.
    pub fn set_origin(&mut self, origin: ScreenPoint) {
        self.origin = origin;
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn zoom_percent(&self) -> u16 {
        self.zoom_percent
    }

    pub fn scale(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    /// Snaps to the nearest zoom step and clamps to the allowed range.
    pub fn set_zoom_percent(&mut self, zoom_percent: u16) {
        let step = ZOOM_STEP_PERCENT;
        let snapped = (zoom_percent.saturating_add(step / 2) / step).saturating_mul(step);
        self.zoom_percent = snapped.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom_percent(self.zoom_percent.saturating_add(ZOOM_STEP_PERCENT));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom_percent(self.zoom_percent.saturating_sub(ZOOM_STEP_PERCENT));
    }

    /// Resets pan and zoom, keeping the canvas origin.
    pub fn reset(&mut self) {
        *self = Self { origin: self.origin, ..Self::default() };
    }

    pub fn screen_to_world(&self, point: ScreenPoint) -> WorldPoint {
        let scale = self.scale();
        WorldPoint {
            x: (point.x - self.origin.x - self.pan_x) / scale,
            y: (point.y - self.origin.y - self.pan_y) / scale,
        }
    }

    pub fn world_to_screen(&self, point: WorldPoint) -> ScreenPoint {
        let scale = self.scale();
        ScreenPoint {
            x: point.x * scale + self.pan_x + self.origin.x,
            y: point.y * scale + self.pan_y + self.origin.y,
        }
    }

    pub fn world_len_to_screen(&self, len: f64) -> f64 {
        len * self.scale()
    }
}
