// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A typed string identifier for nodes, templates and projects.
///
/// Ids are opaque. The only rules are that they are non-empty, contain no `/` and no
/// whitespace, because project ids end up inside storage keys and file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self { value, _marker: PhantomData })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
    ContainsWhitespace,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsSlash => f.write_str("id must not contain '/'"),
            Self::ContainsWhitespace => f.write_str("id must not contain whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateIdTag {}
pub type TemplateId = Id<TemplateIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectIdTag {}
pub type ProjectId = Id<ProjectIdTag>;

/// Hands out session-unique ids of the form `<prefix>-<epoch_millis>-<counter>`.
///
/// Uniqueness is only guaranteed within one allocator; callers that mix in ids from elsewhere
/// (loaded graphs, generated flows) go through [`IdAllocator::next_unused`].
#[derive(Debug, Clone)]
pub struct IdAllocator {
    epoch_millis: u128,
    counter: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        let epoch_millis =
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
        Self::with_epoch(epoch_millis)
    }

    pub fn with_epoch(epoch_millis: u128) -> Self {
        Self { epoch_millis, counter: 0 }
    }

    pub fn next<T>(&mut self, prefix: &str) -> Id<T> {
        self.counter = self.counter.wrapping_add(1);
        let prefix = if prefix.is_empty() { "id" } else { prefix };
        Id::new(format!("{prefix}-{}-{}", self.epoch_millis, self.counter))
            .expect("allocated ids are non-empty and slash-free")
    }

    /// Returns the next id for which `taken` is false.
    pub fn next_unused<T>(&mut self, prefix: &str, taken: impl Fn(&Id<T>) -> bool) -> Id<T> {
        loop {
            let candidate = self.next(prefix);
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}
