// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static icon registry.
//!
//! Nodes never hold an icon resource, only an [`IconKey`]. A key can only be built through the
//! registry, so every key a node carries resolves; names that are not in the registry resolve to
//! [`DEFAULT_ICON_KEY`].

use std::fmt;

/// A registry entry: the persisted key, a human label and the glyph drawn on the canvas.
#[derive(Debug, PartialEq, Eq)]
pub struct IconDef {
    pub key: &'static str,
    pub label: &'static str,
    pub glyph: char,
}

pub const DEFAULT_ICON_KEY: &str = "file";

const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

static ICONS: &[IconDef] = &[
    IconDef { key: "file", label: "File", glyph: '□' },
    IconDef { key: "play", label: "Play", glyph: '▶' },
    IconDef { key: "flag", label: "Flag", glyph: '▲' },
    IconDef { key: "git-branch", label: "Branch", glyph: '◆' },
    IconDef { key: "type", label: "Text", glyph: 'T' },
    IconDef { key: "sticky-note", label: "Sticky note", glyph: '✎' },
    IconDef { key: "log-in", label: "Log in", glyph: '→' },
    IconDef { key: "user-plus", label: "User plus", glyph: '+' },
    IconDef { key: "key", label: "Key", glyph: 'k' },
    IconDef { key: "lock", label: "Lock", glyph: '#' },
    IconDef { key: "mail", label: "Mail", glyph: '✉' },
    IconDef { key: "shield-check", label: "Shield", glyph: '✓' },
    IconDef { key: "layout-dashboard", label: "Dashboard", glyph: '▦' },
    IconDef { key: "home", label: "Home", glyph: '⌂' },
    IconDef { key: "user", label: "User", glyph: '@' },
    IconDef { key: "settings", label: "Settings", glyph: '*' },
    IconDef { key: "search", label: "Search", glyph: '⌕' },
    IconDef { key: "shopping-cart", label: "Cart", glyph: '¤' },
    IconDef { key: "credit-card", label: "Card", glyph: '$' },
    IconDef { key: "package", label: "Package", glyph: '▣' },
    IconDef { key: "truck", label: "Shipping", glyph: '»' },
    IconDef { key: "list", label: "List", glyph: '☰' },
    IconDef { key: "image", label: "Image", glyph: '▨' },
    IconDef { key: "bell", label: "Notifications", glyph: '!' },
    IconDef { key: "message-square", label: "Messages", glyph: '"' },
    IconDef { key: "calendar", label: "Calendar", glyph: '▤' },
    IconDef { key: "bar-chart", label: "Chart", glyph: '▥' },
    IconDef { key: "check-circle", label: "Success", glyph: '✔' },
    IconDef { key: "x-circle", label: "Error", glyph: '✗' },
    IconDef { key: "refresh", label: "Refresh", glyph: '↻' },
    IconDef { key: "help-circle", label: "Help", glyph: '?' },
    IconDef { key: "star", label: "Star", glyph: '★' },
    IconDef { key: "heart", label: "Favorite", glyph: '♥' },
    IconDef { key: "upload", label: "Upload", glyph: '↑' },
    IconDef { key: "download", label: "Download", glyph: '↓' },
    IconDef { key: "globe", label: "Globe", glyph: '◍' },
];

/// A key into the icon registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconKey {
    index: usize,
}

impl IconKey {
    /// Exact (ASCII case-insensitive) lookup.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        ICONS
            .iter()
            .position(|def| def.key.eq_ignore_ascii_case(name))
            .map(|index| Self { index })
    }

    /// Resolves a persisted key, falling back to the default icon.
    pub fn resolve(name: &str) -> Self {
        Self::lookup(name).unwrap_or_default()
    }

    /// Resolves free-form icon names such as `LogIn`, `shopping_cart` or `BarChart3`.
    ///
    /// Tries an exact match on the kebab-cased name first, then the closest registry key by
    /// fuzzy ratio, then the default icon.
    pub fn resolve_loose(name: &str) -> Self {
        let normalized = kebab_case(name);
        if normalized.is_empty() {
            return Self::default();
        }
        if let Some(key) = Self::lookup(&normalized) {
            return key;
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, def) in ICONS.iter().enumerate() {
            let ratio = rapidfuzz::fuzz::ratio(normalized.chars(), def.key.chars());
            if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
                best = Some((index, ratio));
            }
        }

        match best {
            Some((index, ratio)) if ratio >= FUZZY_MATCH_THRESHOLD => Self { index },
            _ => Self::default(),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..ICONS.len()).map(|index| Self { index })
    }

    /// The following registry entry, wrapping around.
    pub fn next(self) -> Self {
        Self { index: (self.index + 1) % ICONS.len() }
    }

    pub fn def(self) -> &'static IconDef {
        &ICONS[self.index]
    }

    pub fn as_str(self) -> &'static str {
        self.def().key
    }

    pub fn glyph(self) -> char {
        self.def().glyph
    }

    pub fn label(self) -> &'static str {
        self.def().label
    }
}

impl Default for IconKey {
    fn default() -> Self {
        Self::lookup(DEFAULT_ICON_KEY).expect("default icon is registered")
    }
}

impl fmt::Debug for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IconKey({})", self.as_str())
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in name.trim().chars() {
        if ch == '_' || ch == ' ' || ch == '-' {
            if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
            prev_lower_or_digit = false;
            continue;
        }
        if ch.is_ascii_uppercase() && prev_lower_or_digit && !out.ends_with('-') {
            out.push('-');
        }
        prev_lower_or_digit = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        out.push(ch.to_ascii_lowercase());
    }
    out.trim_end_matches('-').to_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{kebab_case, IconKey, DEFAULT_ICON_KEY};

    #[test]
    fn registry_keys_are_unique() {
        let keys = IconKey::all().map(IconKey::as_str).collect::<Vec<_>>();
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        assert_eq!(IconKey::resolve("no-such-icon").as_str(), DEFAULT_ICON_KEY);
        assert_eq!(IconKey::resolve("").as_str(), DEFAULT_ICON_KEY);
    }

    #[rstest]
    #[case("LogIn", "log-in")]
    #[case("shopping_cart", "shopping-cart")]
    #[case("LayoutDashboard", "layout-dashboard")]
    #[case("BarChart3", "bar-chart")]
    #[case("Mail", "mail")]
    #[case("Zzzzzzzz", DEFAULT_ICON_KEY)]
    fn loose_resolution_maps_component_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(IconKey::resolve_loose(name).as_str(), expected);
    }

    #[test]
    fn next_cycles_through_registry() {
        let first = IconKey::all().next().expect("registry is not empty");
        let mut key = first;
        let count = IconKey::all().count();
        for _ in 0..count {
            key = key.next();
        }
        assert_eq!(key, first);
    }

    #[test]
    fn kebab_case_splits_camel_humps() {
        assert_eq!(kebab_case("UserPlus"), "user-plus");
        assert_eq!(kebab_case(" check circle "), "check-circle");
    }
}
