// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the editor.
//!
//! Everything is stored through a small string-valued key-value port ([`KeyValueStore`]): one key
//! for the node list, one for the connection list (both per project) and one for the custom
//! template library. [`GraphStorage`] owns the JSON format; [`Debouncer`] decides when to write.

mod codec;
mod debounce;
mod file;
mod memory;

use std::fmt;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::model::{default_graph, Graph, IdError, ParseNodeKindError, ProjectId};
use crate::templates::Template;

pub use codec::{decode_graph, decode_templates, encode_connections, encode_nodes, encode_templates};
pub use debounce::Debouncer;
pub use file::{FileStore, WriteDurability};
pub use memory::MemoryStore;

const KEY_PREFIX: &str = "flowboard";

/// Key into a [`KeyValueStore`]. Built only from validated ids, so keys never contain `/` or
/// whitespace and double as file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn nodes(project: &ProjectId) -> Self {
        Self(format!("{KEY_PREFIX}.{project}.nodes"))
    }

    pub fn connections(project: &ProjectId) -> Self {
        Self(format!("{KEY_PREFIX}.{project}.connections"))
    }

    /// Custom templates are shared by every project.
    pub fn templates() -> Self {
        Self(format!("{KEY_PREFIX}.templates"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// String-valued key-value storage (the local-storage port).
pub trait KeyValueStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &StorageKey) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        key: StorageKey,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    InvalidNodeKind {
        value: String,
        source: ParseNodeKindError,
    },
    InvalidStatus {
        value: String,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { key, source } => write!(f, "json error in {key}: {source}"),
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id for {field}: {value:?}: {source}")
            }
            Self::InvalidNodeKind { value, source } => {
                write!(f, "invalid node type {value:?}: {source}")
            }
            Self::InvalidStatus { value } => write!(f, "invalid page status {value:?}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidNodeKind { source, .. } => Some(source),
            Self::InvalidStatus { .. } | Self::SymlinkRefused { .. } => None,
        }
    }
}

/// Graph and template persistence for one project on top of a [`KeyValueStore`].
#[derive(Debug)]
pub struct GraphStorage<S> {
    store: S,
    project: ProjectId,
}

impl<S: KeyValueStore> GraphStorage<S> {
    pub fn new(store: S, project: ProjectId) -> Self {
        Self { store, project }
    }

    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Loads the persisted graph, or `None` when nothing has been saved for this project.
    pub fn try_load_graph(&self) -> Result<Option<Graph>, StoreError> {
        let nodes_key = StorageKey::nodes(&self.project);
        let Some(nodes_json) = self.store.get(&nodes_key)? else {
            return Ok(None);
        };
        let connections_json = self.store.get(&StorageKey::connections(&self.project))?;
        decode_graph(&self.project, &nodes_json, connections_json.as_deref()).map(Some)
    }

    /// Loads the persisted graph, falling back to the example graph when nothing is stored or
    /// the stored value cannot be read.
    pub fn load_graph(&self) -> Graph {
        match self.try_load_graph() {
            Ok(Some(graph)) => {
                debug!(
                    project = %self.project,
                    nodes = graph.nodes().len(),
                    connections = graph.connections().len(),
                    "loaded graph"
                );
                graph
            }
            Ok(None) => {
                debug!(project = %self.project, "no stored graph; using default graph");
                default_graph()
            }
            Err(err) => {
                warn!(
                    project = %self.project,
                    error = %err,
                    "stored graph unreadable; using default graph"
                );
                default_graph()
            }
        }
    }

    pub fn save_graph(&mut self, graph: &Graph) -> Result<(), StoreError> {
        let nodes_key = StorageKey::nodes(&self.project);
        let connections_key = StorageKey::connections(&self.project);
        let nodes = encode_nodes(graph.nodes())
            .map_err(|source| StoreError::Json { key: nodes_key.clone(), source })?;
        let connections = encode_connections(graph.connections())
            .map_err(|source| StoreError::Json { key: connections_key.clone(), source })?;

        self.store.set(&nodes_key, &nodes)?;
        self.store.set(&connections_key, &connections)?;
        debug!(project = %self.project, rev = graph.rev(), "saved graph");
        Ok(())
    }

    pub fn try_load_templates(&self) -> Result<Vec<Template>, StoreError> {
        match self.store.get(&StorageKey::templates())? {
            Some(json) => decode_templates(&json),
            None => Ok(Vec::new()),
        }
    }

    /// Custom templates; an unreadable library is treated as empty.
    pub fn load_templates(&self) -> Vec<Template> {
        self.try_load_templates().unwrap_or_else(|err| {
            warn!(error = %err, "stored templates unreadable; starting with none");
            Vec::new()
        })
    }

    pub fn save_templates(&mut self, templates: &[Template]) -> Result<(), StoreError> {
        let key = StorageKey::templates();
        let json = encode_templates(templates)
            .map_err(|source| StoreError::Json { key: key.clone(), source })?;
        self.store.set(&key, &json)
    }
}
