// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use flowboard::config::EditorConfig;
use flowboard::editor::Editor;
use flowboard::model::{IdAllocator, NodeId, NodeKind, ProjectId};
use flowboard::ops::GraphOp;
use flowboard::store::{FileStore, GraphStorage, WriteDurability};
use flowboard::viewport::WorldPoint;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir()
            .join(format!("flowboard-it-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn open(dir: &Path, project: &str) -> Editor<FileStore> {
    let store = FileStore::new(dir).with_durability(WriteDurability::Durable);
    let storage = GraphStorage::new(store, ProjectId::new(project).expect("project id"));
    Editor::open(storage, Duration::from_millis(1000)).with_id_allocator(IdAllocator::with_epoch(0))
}

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

#[test]
fn edits_survive_a_restart_after_the_debounce() {
    let dir = TempDir::new("restart");
    let start = Instant::now();

    let mut editor = open(dir.path(), "shop");
    editor.apply_op(GraphOp::MoveNode { node_id: nid("login"), x: 300.0, y: 120.0 }, start);
    assert!(!editor.tick(start + Duration::from_millis(999)).expect("tick"));
    assert!(editor.tick(start + Duration::from_millis(1000)).expect("tick"));
    assert!(dir.path().join("flowboard.shop.nodes.json").exists());

    let reopened = open(dir.path(), "shop");
    let login = reopened.graph().node(&nid("login")).expect("login");
    assert_eq!(login.position(), (300.0, 120.0));
    assert_eq!(reopened.graph().connections().len(), 7);
}

#[test]
fn projects_are_isolated_but_templates_are_shared() {
    let dir = TempDir::new("projects");
    let now = Instant::now();

    let mut shop = open(dir.path(), "shop");
    shop.select(Some(nid("login")));
    shop.request_delete_selected();
    shop.confirm(now).expect("confirm");
    shop.select(Some(nid("signup")));
    shop.save_selected_as_template("Register").expect("save template");
    assert!(shop.flush().expect("flush"));

    let mut blog = open(dir.path(), "blog");
    assert!(blog.graph().node(&nid("login")).is_some());
    assert_eq!(blog.templates().custom().len(), 1);
    assert_eq!(blog.templates().custom()[0].name, "Register");

    let template_id = blog.templates().custom()[0].template_id.clone();
    let placed = blog
        .instantiate_template(&template_id, WorldPoint::new(900.0, 400.0), now)
        .expect("placed");
    assert_eq!(blog.graph().node(&placed).map(|node| node.kind()), Some(NodeKind::Page));

    let shop = open(dir.path(), "shop");
    assert!(shop.graph().node(&nid("login")).is_none());
    assert_eq!(shop.graph().nodes().len(), 7);
}

#[test]
fn config_file_in_store_dir_is_honoured() {
    let dir = TempDir::new("config");
    std::fs::write(
        EditorConfig::path_in(dir.path()),
        r#"{"project": "mobile", "debounce_ms": 50, "durable_writes": true}"#,
    )
    .expect("write config");

    let config = EditorConfig::load(dir.path()).expect("config");
    assert_eq!(config.project_id().expect("project").as_str(), "mobile");
    assert_eq!(config.debounce(), Duration::from_millis(50));
    assert!(config.durable_writes);
    assert!(config.ai_endpoint.is_none());
}

#[test]
fn corrupt_graph_file_falls_back_to_the_example() {
    let dir = TempDir::new("corrupt");
    std::fs::write(dir.path().join("flowboard.shop.nodes.json"), "{ not json").expect("write");

    let editor = open(dir.path(), "shop");
    assert_eq!(editor.graph().nodes().len(), 8);
}
