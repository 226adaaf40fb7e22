// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::model::{NodeKind, PageStatus};
use crate::render::{CanvasCell, CellRole};

const PALETTE_ENV: &str = "FLOWBOARD_TUI_PALETTE";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi_color(color.idx()),
            None => color.into(),
        }
    }

    pub(crate) fn modal_border_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Yellow))
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn dim_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::BrightBlack))
    }

    fn kind_color(&self, kind: NodeKind) -> Color {
        let ansi = match kind {
            NodeKind::Start => Ansi16::Green,
            NodeKind::End => Ansi16::Red,
            NodeKind::Decision => Ansi16::Magenta,
            NodeKind::Page => Ansi16::Blue,
            NodeKind::Text => Ansi16::White,
            NodeKind::Note => Ansi16::Yellow,
        };
        self.ansi_color(ansi)
    }

    fn status_color(&self, status: PageStatus) -> Color {
        let ansi = match status {
            PageStatus::Pending => Ansi16::BrightBlack,
            PageStatus::Progress => Ansi16::Yellow,
            PageStatus::Designed => Ansi16::Blue,
            PageStatus::Complete => Ansi16::Green,
        };
        self.ansi_color(ansi)
    }

    /// Style for one rasterized canvas cell.
    pub(crate) fn cell_style(&self, cell: &CanvasCell) -> Style {
        let base = self.base_style();
        let style = match cell.role {
            CellRole::Empty | CellRole::Fill => match cell.kind {
                Some(NodeKind::Note) => base.fg(self.ansi_color(Ansi16::Black)),
                _ => base,
            },
            CellRole::Border => match cell.kind {
                Some(kind) => base.fg(self.kind_color(kind)),
                None => base,
            },
            CellRole::Label => base.add_modifier(Modifier::BOLD),
            CellRole::Icon => match cell.kind {
                Some(kind) => base.fg(self.kind_color(kind)).add_modifier(Modifier::BOLD),
                None => base,
            },
            CellRole::Status => match cell.status {
                Some(status) => base.fg(self.status_color(status)),
                None => base,
            },
            CellRole::Anchor => base.fg(self.ansi_color(Ansi16::Cyan)),
            CellRole::Connection | CellRole::Arrow => base.fg(self.ansi_color(Ansi16::White)),
            CellRole::RubberBand => base.fg(self.ansi_color(Ansi16::BrightCyan)),
        };
        let style = if cell.kind == Some(NodeKind::Note) && cell.role != CellRole::Empty {
            style.bg(self.ansi_color(Ansi16::BrightYellow)).fg(self.ansi_color(Ansi16::Black))
        } else {
            style
        };
        if cell.selected && cell.role == CellRole::Border {
            style.fg(self.ansi_color(Ansi16::BrightGreen)).add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

#[derive(Debug, Clone)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then the 16 ansi colors), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let fg = parse_palette_color(parts[0])?;
        let bg = parse_palette_color(parts[1])?;

        let mut ansi = [Color::Reset; 16];
        for (idx, part) in parts.iter().skip(2).enumerate() {
            ansi[idx] = parse_palette_color(part)?;
        }

        Ok(Self { fg, bg, ansi })
    }

    fn ansi_color(&self, idx: usize) -> Color {
        self.ansi[idx]
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_owned(),
                value: "<non-unicode>".to_owned(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = TuiPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV.to_owned(),
        value: format!("{trimmed} ({error})"),
    })?;
    Ok(Some(parsed))
}

/// Parses `#RRGGBB`, `0xRRGGBB` or `rgb:RR/GG/BB`.
pub(crate) fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 3 {
            return Err(format!("invalid rgb: value: {trimmed}"));
        }
        let r = parse_hex_channel(parts[0])?;
        let g = parse_hex_channel(parts[1])?;
        let b = parse_hex_channel(parts[2])?;
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(Color::Rgb(r, g, b))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|parsed| (parsed >> 8) as u8)
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!("invalid rgb: component {value} (expected 2 or 4 hex digits)")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    const fn idx(self) -> usize {
        self as usize
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Black => Color::Black,
            Ansi16::Red => Color::Red,
            Ansi16::Green => Color::Green,
            Ansi16::Yellow => Color::Yellow,
            Ansi16::Blue => Color::Blue,
            Ansi16::Magenta => Color::Magenta,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightRed => Color::LightRed,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightYellow => Color::LightYellow,
            Ansi16::BrightBlue => Color::LightBlue,
            Ansi16::BrightMagenta => Color::LightMagenta,
            Ansi16::BrightCyan => Color::LightCyan,
            Ansi16::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};

    use super::{parse_palette_color, TuiPalette, TuiTheme};
    use crate::model::{NodeKind, PageStatus};
    use crate::render::{CanvasCell, CellRole};

    #[test]
    fn palette_override_parses_valid_csv() {
        let palette = TuiPalette::parse_csv(
            "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,#00ffff,#ffffff,\
             #1a1a1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,#11ffff,#fefefe",
        )
        .expect("palette");

        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.ansi_color(1), Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.ansi_color(15), Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[test]
    fn palette_override_rejects_invalid_csv() {
        let err = TuiPalette::parse_csv("nope").unwrap_err();
        assert!(err.contains("expected"));
    }

    #[test]
    fn parses_note_colors() {
        assert_eq!(parse_palette_color("#fef08a"), Ok(Color::Rgb(0xfe, 0xf0, 0x8a)));
        assert_eq!(parse_palette_color("rgb:ffff/8000/00"), Ok(Color::Rgb(0xff, 0x80, 0)));
        assert!(parse_palette_color("yellow").is_err());
    }

    #[test]
    fn cell_styles_follow_role_and_selection() {
        let theme = TuiTheme::default();
        let status = CanvasCell {
            ch: '●',
            role: CellRole::Status,
            kind: Some(NodeKind::Page),
            status: Some(PageStatus::Complete),
            selected: false,
        };
        assert_eq!(theme.cell_style(&status).fg, Some(Color::Green));

        let border = CanvasCell {
            ch: '╭',
            role: CellRole::Border,
            kind: Some(NodeKind::Page),
            status: None,
            selected: true,
        };
        let style = theme.cell_style(&border);
        assert_eq!(style.fg, Some(Color::LightGreen));
        assert!(style.add_modifier.contains(Modifier::BOLD));

        let note = CanvasCell { role: CellRole::Fill, kind: Some(NodeKind::Note), ..border };
        assert_eq!(theme.cell_style(&note).bg, Some(Color::LightYellow));
    }
}
