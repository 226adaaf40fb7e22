// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use super::{KeyValueStore, StorageKey, StoreError};

/// In-process key-value store. Backs `--demo` sessions and tests.
///
/// Counts writes so callers can observe how often persistence actually happened.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<StorageKey, String>,
    write_count: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value without counting it as a write.
    pub fn with_entry(mut self, key: StorageKey, value: impl Into<String>) -> Self {
        self.entries.insert(key, value.into());
        self
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Makes every later `set` fail with an io error.
    pub fn set_fail_writes(&mut self, fail_writes: bool) {
        self.fail_writes = fail_writes;
    }

    pub fn raw(&self, key: &StorageKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io {
                path: PathBuf::from(key.as_str()),
                source: io::Error::other("writes disabled"),
            });
        }
        self.entries.insert(key.clone(), value.to_owned());
        self.write_count += 1;
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
