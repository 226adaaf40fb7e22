// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use super::{AiApplied, Confirmation, Editor, DEFAULT_DEBOUNCE};
use crate::ai::{AiError, AiOutcome, AiTask, GeneratedConnection, GeneratedFlow, GeneratedNode};
use crate::interaction::PointerEvent;
use crate::model::{IconKey, IdAllocator, Node, NodeId, NodeKind, PageStatus, ProjectId};
use crate::ops::GraphOp;
use crate::render::{hit_test, HitTarget};
use crate::store::{GraphStorage, MemoryStore};
use crate::viewport::{ScreenPoint, WorldPoint};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn open(store: MemoryStore) -> Editor<MemoryStore> {
    let project = ProjectId::new("demo").expect("project id");
    Editor::open(GraphStorage::new(store, project), DEFAULT_DEBOUNCE)
        .with_id_allocator(IdAllocator::with_epoch(0))
}

#[fixture]
fn editor() -> Editor<MemoryStore> {
    open(MemoryStore::new())
}

fn writes(editor: &Editor<MemoryStore>) -> usize {
    editor.storage().store().write_count()
}

fn double_click(editor: &mut Editor<MemoryStore>, x: f64, y: f64, now: Instant) {
    let point = ScreenPoint::new(x, y);
    let target = hit_test(editor.graph(), editor.viewport(), point);
    editor.handle_pointer(PointerEvent::DoubleClick { point, target }, now);
}

#[rstest]
fn opens_with_the_example_graph(editor: Editor<MemoryStore>) {
    assert_eq!(editor.graph().nodes().len(), 8);
    assert_eq!(editor.graph().connections().len(), 7);
    assert!(!editor.has_pending_save());
    assert_eq!(writes(&editor), 0);
}

#[rstest]
fn deleting_a_node_is_confirmation_gated(mut editor: Editor<MemoryStore>) {
    let t0 = Instant::now();
    editor.select(Some(nid("login")));

    assert!(editor.request_delete_selected());
    assert_eq!(editor.confirmation(), Some(&Confirmation::DeleteNode(nid("login"))));
    assert_eq!(editor.decline(), Some(Confirmation::DeleteNode(nid("login"))));
    assert_eq!(editor.graph().nodes().len(), 8);
    assert!(!editor.has_pending_save());

    assert!(editor.request_delete_selected());
    let confirmed = editor.confirm(t0).expect("confirm");
    assert_eq!(confirmed, Some(Confirmation::DeleteNode(nid("login"))));
    assert_eq!(editor.graph().nodes().len(), 7);
    assert_eq!(editor.graph().connections().len(), 4);
    assert!(editor.graph().connections().iter().all(|c| !c.touches(&nid("login"))));
    assert_eq!(editor.selected(), None);

    assert!(!editor.tick(t0 + ms(999)).expect("tick"));
    assert!(editor.tick(t0 + ms(1000)).expect("tick"));
    assert_eq!(writes(&editor), 2);
}

#[rstest]
fn delete_without_selection_does_nothing(mut editor: Editor<MemoryStore>) {
    assert!(!editor.request_delete_selected());
    assert_eq!(editor.confirmation(), None);
    assert_eq!(editor.confirm(Instant::now()).expect("confirm"), None);
}

#[rstest]
fn rapid_moves_coalesce_into_one_save(mut editor: Editor<MemoryStore>) {
    let t0 = Instant::now();
    for step in 0..5u32 {
        let now = t0 + ms(200 * u64::from(step));
        let x = 200.0 + f64::from(step) * 10.0;
        editor.apply_op(GraphOp::MoveNode { node_id: nid("login"), x, y: 180.0 }, now);
        assert!(!editor.tick(now).expect("tick"));
    }

    assert!(!editor.tick(t0 + ms(1799)).expect("tick"));
    assert!(editor.tick(t0 + ms(1800)).expect("tick"));
    assert!(!editor.tick(t0 + ms(5000)).expect("tick"));
    assert_eq!(writes(&editor), 2);

    let reopened = open(editor.storage().store().clone());
    let login = reopened.graph().node(&nid("login")).expect("login");
    assert_eq!(login.position(), (240.0, 180.0));
}

#[rstest]
fn no_op_operations_do_not_schedule_saves(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    let ops = [
        GraphOp::MoveNode { node_id: nid("login"), x: 160.0, y: 176.0 },
        GraphOp::AddConnection { from: nid("start"), to: nid("login") },
        GraphOp::AddConnection { from: nid("login"), to: nid("login") },
        GraphOp::DeleteNode { node_id: nid("missing") },
    ];
    let rev = editor.graph().rev();
    assert!(editor.apply_ops(&ops, now).is_empty());
    assert_eq!(editor.graph().rev(), rev);
    assert!(!editor.has_pending_save());
    assert!(!editor.flush().expect("flush"));
}

#[rstest]
fn flush_writes_pending_changes_immediately(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.apply_op(GraphOp::AddConnection { from: nid("login"), to: nid("reset") }, now);
    assert!(editor.flush().expect("flush"));
    assert!(!editor.has_pending_save());
    assert_eq!(writes(&editor), 2);
    assert!(!editor.tick(now + ms(5000)).expect("tick"));
}

#[rstest]
fn failed_saves_are_reported(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.storage.store_mut().set_fail_writes(true);
    editor.apply_op(GraphOp::MoveNode { node_id: nid("end"), x: 0.0, y: 0.0 }, now);
    assert!(editor.tick(now + DEFAULT_DEBOUNCE).is_err());
    assert!(editor.has_pending_save());
    assert!(editor.flush().is_err());
    assert!(editor.has_pending_save());

    editor.storage.store_mut().set_fail_writes(false);
    assert!(!editor.tick(now + DEFAULT_DEBOUNCE + ms(1)).expect("tick before retry"));
    assert!(editor.tick(now + DEFAULT_DEBOUNCE * 2).expect("retry"));
    assert!(!editor.has_pending_save());

    let stored = editor.storage().load_graph();
    assert_eq!(stored.node(&nid("end")).map(Node::position), Some((0.0, 0.0)));
}

#[rstest]
fn flush_on_quit_writes_a_previously_failed_save(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.storage.store_mut().set_fail_writes(true);
    editor.apply_op(GraphOp::MoveNode { node_id: nid("end"), x: 4.0, y: 8.0 }, now);
    assert!(editor.tick(now + DEFAULT_DEBOUNCE).is_err());

    editor.storage.store_mut().set_fail_writes(false);
    assert!(editor.flush().expect("flush"));
    assert!(!editor.has_pending_save());
    let stored = editor.storage().load_graph();
    assert_eq!(stored.node(&nid("end")).map(Node::position), Some((4.0, 8.0)));
}

#[rstest]
fn login_template_instantiates_at_the_given_point(mut editor: Editor<MemoryStore>) {
    let template_id =
        editor.templates().find_by_name("Login Screen").expect("template").template_id.clone();

    let node_id = editor
        .instantiate_template(&template_id, WorldPoint::new(500.0, 300.0), Instant::now())
        .expect("instantiated");
    let node = editor.graph().node(&node_id).expect("node");
    assert_eq!(node.kind(), NodeKind::Page);
    assert_eq!(node.position(), (500.0, 300.0));
    assert_eq!(editor.selected(), Some(&node_id));
    assert_eq!(editor.graph().nodes().iter().filter(|n| n.node_id() == &node_id).count(), 1);
    assert!(editor.has_pending_save());
}

#[rstest]
fn double_click_on_canvas_picks_a_node_type(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    double_click(&mut editor, 20.0, 600.0, now);
    let picker = *editor.picker().expect("picker open");
    assert_eq!(picker.world, WorldPoint::new(20.0, 600.0));

    // Pointer input is held back while the picker is open.
    editor.handle_pointer(PointerEvent::Leave, now);
    assert!(editor.picker().is_some());

    let node_id = editor.choose_node_kind(NodeKind::Decision, now).expect("node added");
    let node = editor.graph().node(&node_id).expect("node");
    assert_eq!(node.kind(), NodeKind::Decision);
    assert_eq!(node.position(), (20.0, 600.0));
    assert_eq!(editor.selected(), Some(&node_id));
    assert!(editor.picker().is_none());
    assert_eq!(editor.choose_node_kind(NodeKind::Page, now), None);
}

#[rstest]
fn dismissing_the_picker_adds_nothing(mut editor: Editor<MemoryStore>) {
    double_click(&mut editor, 20.0, 600.0, Instant::now());
    editor.dismiss_picker();
    assert!(editor.picker().is_none());
    assert_eq!(editor.graph().nodes().len(), 8);
}

#[rstest]
fn inline_edit_commits_through_update(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.apply_op(
        GraphOp::AddNode(Node::new(nid("memo"), NodeKind::Note, "Todo", 0.0, 600.0)),
        now,
    );
    double_click(&mut editor, 30.0, 620.0, now);
    assert_eq!(editor.inline_edit().map(|edit| edit.buffer.as_str()), Some("Todo"));

    // Delete keys edit the buffer instead of removing the node.
    assert!(!editor.request_delete_selected());
    editor.inline_backspace();
    editor.inline_insert('!');
    assert!(editor.commit_inline_edit(now));
    assert_eq!(editor.graph().node(&nid("memo")).map(Node::name), Some("Tod!"));
    assert!(editor.inline_edit().is_none());
}

#[rstest]
fn cancelled_inline_edit_keeps_the_name(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.apply_op(
        GraphOp::AddNode(Node::new(nid("caption"), NodeKind::Text, "Hello", 0.0, 600.0)),
        now,
    );
    editor.begin_inline_edit(&nid("caption"));
    editor.inline_insert('x');
    editor.cancel_inline_edit();
    assert_eq!(editor.graph().node(&nid("caption")).map(Node::name), Some("Hello"));

    editor.begin_inline_edit(&nid("login"));
    assert!(editor.inline_edit().is_none());
}

#[rstest]
fn page_icon_and_status_cycle(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.select(Some(nid("login")));
    assert!(editor.cycle_status(now));
    assert!(editor.cycle_icon(now));

    let login = editor.graph().node(&nid("login")).expect("login");
    assert_eq!(login.status(), Some(PageStatus::Complete));
    assert_eq!(login.icon(), IconKey::resolve("log-in").next());

    editor.select(Some(nid("decision")));
    assert!(!editor.cycle_status(now));
    assert!(!editor.cycle_icon(now));
}

#[rstest]
fn outgoing_connections_can_be_deleted(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.select(Some(nid("login")));
    let outgoing = editor.selected_connections();
    assert_eq!(outgoing.len(), 2);

    assert!(editor.request_delete_connection(nid("login"), nid("forgot")));
    editor.confirm(now).expect("confirm");
    assert!(!editor.graph().contains_connection(&nid("login"), &nid("forgot")));
    assert_eq!(editor.selected_connections().len(), 1);

    assert!(!editor.request_delete_connection(nid("login"), nid("forgot")));
}

#[rstest]
fn custom_templates_persist_and_delete(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    editor.select(Some(nid("signup")));
    let template = editor.save_selected_as_template("Signup v2").expect("save").expect("saved");
    assert_eq!(template.name, "Signup v2");
    assert_eq!(template.kind, NodeKind::Page);
    assert_eq!(writes(&editor), 1);

    let reopened = open(editor.storage().store().clone());
    assert_eq!(reopened.templates().custom().len(), 1);

    let builtin =
        editor.templates().find_by_name("Login Screen").expect("builtin").template_id.clone();
    assert!(!editor.request_delete_template(builtin));

    assert!(editor.request_delete_template(template.template_id.clone()));
    editor.confirm(now).expect("confirm");
    assert!(editor.templates().custom().is_empty());
    assert_eq!(writes(&editor), 2);
}

#[rstest]
fn generated_flow_lands_in_one_batch(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    assert!(editor.begin_ai(AiTask::Flow));
    assert!(!editor.begin_ai(AiTask::Suggestions));

    let rev = editor.graph().rev();
    let flow = GeneratedFlow {
        nodes: vec![
            GeneratedNode {
                name: "Catalog".to_owned(),
                kind: "page".to_owned(),
                icon_name: Some("List".to_owned()),
                components: vec!["Grid".to_owned()],
            },
            GeneratedNode {
                name: "Checkout".to_owned(),
                kind: "page".to_owned(),
                icon_name: None,
                components: Vec::new(),
            },
        ],
        connections: vec![GeneratedConnection { from: 0, to: 1 }],
    };
    let applied = editor.finish_ai(AiOutcome::Flow(Ok(flow)), now).expect("applied");
    assert_eq!(applied, AiApplied::Flow { nodes: 2, connections: 1 });
    assert_eq!(editor.graph().rev(), rev + 1);
    assert_eq!(editor.graph().nodes().len(), 10);
    assert!(!editor.ai().is_busy());
}

#[rstest]
fn failed_ai_requests_release_the_trigger(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    assert!(editor.begin_ai(AiTask::Components(nid("login"))));
    let outcome = AiOutcome::Components {
        node_id: nid("login"),
        result: Err(AiError::Transport("connection refused".to_owned())),
    };
    assert!(editor.finish_ai(outcome, now).is_err());
    assert!(!editor.ai().is_busy());
    assert!(!editor.has_pending_save());
    assert!(editor.graph().node(&nid("login")).is_some_and(|n| n.components().is_empty()));
}

#[rstest]
fn generated_components_fill_the_page(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    let outcome = AiOutcome::Components {
        node_id: nid("login"),
        result: Ok(vec!["Email".to_owned(), "Password".to_owned()]),
    };
    let applied = editor.finish_ai(outcome, now).expect("applied");
    assert_eq!(applied, AiApplied::Components { node_id: nid("login"), count: 2 });
    let login = editor.graph().node(&nid("login")).expect("login");
    assert_eq!(login.components(), ["Email".to_owned(), "Password".to_owned()]);
}

#[rstest]
fn components_for_a_deleted_page_add_nothing(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    assert!(editor.begin_ai(AiTask::Components(nid("login"))));
    editor.apply_op(GraphOp::DeleteNode { node_id: nid("login") }, now);
    let rev = editor.graph().rev();

    let outcome = AiOutcome::Components {
        node_id: nid("login"),
        result: Ok(vec!["Email".to_owned()]),
    };
    let applied = editor.finish_ai(outcome, now).expect("applied");
    assert_eq!(applied, AiApplied::Components { node_id: nid("login"), count: 0 });
    assert_eq!(editor.graph().rev(), rev);
    assert!(!editor.ai().is_busy());
}

#[rstest]
fn dragging_through_the_editor_selects_and_moves(mut editor: Editor<MemoryStore>) {
    let now = Instant::now();
    let target = hit_test(editor.graph(), editor.viewport(), ScreenPoint::new(250.0, 220.0));
    assert_eq!(target, HitTarget::Body(nid("login")));
    editor.handle_pointer(
        PointerEvent::Down {
            button: crate::interaction::PointerButton::Primary,
            point: ScreenPoint::new(250.0, 220.0),
            target,
        },
        now,
    );
    editor.handle_pointer(PointerEvent::Move { point: ScreenPoint::new(260.0, 240.0) }, now);
    editor.handle_pointer(
        PointerEvent::Up { point: ScreenPoint::new(260.0, 240.0), target: HitTarget::Canvas },
        now,
    );

    assert_eq!(editor.selected(), Some(&nid("login")));
    assert_eq!(editor.graph().node(&nid("login")).map(Node::position), Some((170.0, 196.0)));
    assert!(editor.interaction().gesture().is_idle());
    assert!(editor.has_pending_save());
}
