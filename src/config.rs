// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor settings read from `flowboard.config.json` in the store directory.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{IdError, ProjectId};

pub const CONFIG_FILE_NAME: &str = "flowboard.config.json";
pub const DEFAULT_AI_KEY_ENV: &str = "FLOWBOARD_AI_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub debounce_ms: u64,
    pub project: String,
    pub ai_endpoint: Option<String>,
    pub ai_api_key_env: String,
    pub durable_writes: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            project: "default".to_owned(),
            ai_endpoint: None,
            ai_api_key_env: DEFAULT_AI_KEY_ENV.to_owned(),
            durable_writes: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    InvalidProject { value: String, source: IdError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "failed to read config {}", path.display()),
            Self::Json { path, .. } => write!(f, "invalid config {}", path.display()),
            Self::InvalidProject { value, .. } => write!(f, "invalid project id {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidProject { source, .. } => Some(source),
        }
    }
}

impl EditorConfig {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    /// Reads the config from `dir`; a missing file yields the defaults.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(dir);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json { path, source })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn project_id(&self) -> Result<ProjectId, ConfigError> {
        ProjectId::new(self.project.trim()).map_err(|source| ConfigError::InvalidProject {
            value: self.project.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{ConfigError, EditorConfig, CONFIG_FILE_NAME};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
        let dir = std::env::temp_dir()
            .join(format!("flowboard-config-{name}-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = temp_dir("missing");
        let config = EditorConfig::load(&dir).expect("load");
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.debounce(), Duration::from_secs(1));
        assert_eq!(config.project_id().expect("project").as_str(), "default");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = temp_dir("partial");
        fs::write(dir.join(CONFIG_FILE_NAME), r#"{"debounce_ms": 250, "project": "shop"}"#)
            .expect("write config");
        let config = EditorConfig::load(&dir).expect("load");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.project, "shop");
        assert_eq!(config.ai_api_key_env, "FLOWBOARD_AI_KEY");
        assert!(!config.durable_writes);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = temp_dir("malformed");
        fs::write(dir.join(CONFIG_FILE_NAME), "{ nope").expect("write config");
        let err = EditorConfig::load(&dir).expect_err("invalid json");
        assert!(matches!(err, ConfigError::Json { .. }));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn project_with_slash_is_rejected() {
        let config = EditorConfig { project: "a/b".to_owned(), ..EditorConfig::default() };
        assert!(matches!(config.project_id(), Err(ConfigError::InvalidProject { .. })));
    }
}
