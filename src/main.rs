// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flowboard CLI entrypoint.
//!
//! Runs the terminal editor against a store directory (the current directory by default).
//! `--demo` edits the example graph in memory and writes nothing.

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flowboard::ai::{AiError, HttpLlmClient, LlmClient};
use flowboard::config::EditorConfig;
use flowboard::editor::Editor;
use flowboard::store::{FileStore, GraphStorage, MemoryStore, WriteDurability};
use flowboard::tui::{self, AiBridge};

const LOG_FILE_NAME: &str = "flowboard.log";
const LOG_ENV: &str = "FLOWBOARD_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "flowboard", version, about = "Terminal flow diagram editor")]
struct Cli {
    /// Directory holding the graph, templates and `flowboard.config.json`.
    #[arg(long, value_name = "DIR", conflicts_with = "demo")]
    store: Option<PathBuf>,

    /// Project whose graph is edited.
    #[arg(long, value_name = "ID")]
    project: Option<String>,

    /// Delay between the last edit and the save, in milliseconds.
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Endpoint used for AI flow generation, components and suggestions.
    #[arg(long, value_name = "URL")]
    ai_endpoint: Option<String>,

    /// Flush written files and renames to stable storage where supported.
    #[arg(long)]
    durable_writes: bool,

    /// Edit the example graph in memory; nothing is written.
    #[arg(long)]
    demo: bool,
}

impl Cli {
    fn store_dir(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Applies command-line overrides on top of the file config.
    fn apply(&self, config: &mut EditorConfig) {
        if let Some(project) = &self.project {
            config.project = project.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if let Some(endpoint) = &self.ai_endpoint {
            config.ai_endpoint = Some(endpoint.clone());
        }
        if self.durable_writes {
            config.durable_writes = true;
        }
    }
}

fn init_tracing(log_dir: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(log_dir.join(LOG_FILE_NAME))?;
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| -> Box<dyn Error> { e })?;
    Ok(())
}

fn ai_client(config: &EditorConfig) -> Result<Option<Arc<dyn LlmClient>>, AiError> {
    let Some(endpoint) = config.ai_endpoint.as_deref() else {
        return Ok(None);
    };
    let client = match HttpLlmClient::from_env(endpoint, &config.ai_api_key_env) {
        Ok(client) => client,
        Err(AiError::MissingApiKey { var }) => {
            warn!(var = %var, "no AI api key set; sending requests without authorization");
            HttpLlmClient::new(endpoint, None)?
        }
        Err(err) => return Err(err),
    };
    info!(endpoint = client.endpoint(), "AI enabled");
    Ok(Some(Arc::new(client)))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let cli = Cli::parse();

        let store_dir = cli.store_dir();
        let mut config = if cli.demo {
            EditorConfig::default()
        } else {
            fs::create_dir_all(&store_dir)?;
            EditorConfig::load(&store_dir)?
        };
        cli.apply(&mut config);

        let log_dir = if cli.demo { std::env::temp_dir() } else { store_dir.clone() };
        init_tracing(&log_dir)?;

        let project = config.project_id()?;
        let debounce = config.debounce();
        let durability = if config.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let ai = ai_client(&config)?
            .map(|client| AiBridge { client, handle: runtime.handle().clone() });

        runtime.block_on(async move {
            let tui_task = if cli.demo {
                info!(project = %project, "starting demo session");
                tokio::task::spawn_blocking(move || {
                    let storage = GraphStorage::new(MemoryStore::new(), project);
                    tui::run(Editor::open(storage, debounce), ai).map_err(|err| err.to_string())
                })
            } else {
                info!(project = %project, store = %store_dir.display(), "starting session");
                tokio::task::spawn_blocking(move || {
                    let store = FileStore::new(store_dir).with_durability(durability);
                    let storage = GraphStorage::new(store, project);
                    tui::run(Editor::open(storage, debounce), ai).map_err(|err| err.to_string())
                })
            };

            let tui_join = tui_task.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("flowboard: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Cli;
    use flowboard::config::EditorConfig;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("flowboard").chain(args.iter().copied()))
    }

    #[test]
    fn parses_empty_args() {
        let cli = parse(&[]).expect("parse options");
        assert_eq!(cli.store_dir(), PathBuf::from("."));
        assert!(!cli.demo);
        assert!(!cli.durable_writes);
    }

    #[test]
    fn parses_store_and_overrides() {
        let cli = parse(&[
            "--store",
            "some/dir",
            "--project",
            "shop",
            "--debounce-ms",
            "250",
            "--ai-endpoint",
            "http://127.0.0.1:9000/invoke",
            "--durable-writes",
        ])
        .expect("parse options");
        assert_eq!(cli.store_dir(), PathBuf::from("some/dir"));

        let mut config = EditorConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.project, "shop");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.ai_endpoint.as_deref(), Some("http://127.0.0.1:9000/invoke"));
        assert!(config.durable_writes);
    }

    #[test]
    fn absent_flags_keep_file_config() {
        let cli = parse(&["--demo"]).expect("parse options");
        let mut config = EditorConfig {
            debounce_ms: 500,
            project: "file".to_owned(),
            durable_writes: true,
            ..EditorConfig::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.project, "file");
        assert!(config.durable_writes);
    }

    #[test]
    fn rejects_demo_with_store() {
        parse(&["--demo", "--store", "."]).unwrap_err();
    }

    #[test]
    fn rejects_bad_debounce_and_unknown_args() {
        parse(&["--debounce-ms", "soon"]).unwrap_err();
        parse(&["--nope"]).unwrap_err();
    }
}
