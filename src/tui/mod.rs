// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive editor shell (ratatui + crossterm) on top of [`Editor`]. Mouse input
//! is mapped onto canvas cells and hit-tested; keys drive modals, templates and AI requests.
//! AI requests run on the tokio runtime handed in by `main` and report back over a channel.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::ai::{
    generate_components, generate_flow, suggest_improvements, AiOutcome, AiTask, LlmClient,
};
use crate::editor::{AiApplied, Confirmation, Editor};
use crate::interaction::{DoubleClickDetector, PointerButton, PointerEvent, DOUBLE_CLICK_WINDOW};
use crate::model::{NodeId, NodeKind, TemplateId};
use crate::render::{
    hit_test, render_canvas, CanvasBuffer, CanvasOptions, CellMetrics, HitTarget,
};
use crate::store::KeyValueStore;
use crate::templates::{Template, TemplateLibrary};
use crate::viewport::{ScreenPoint, WorldPoint};

mod theme;

use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "flowboard";
/// Screen pixels moved per arrow key press.
const PAN_STEP: f64 = 64.0;
const TOAST_TTL: Duration = Duration::from_secs(2);
const TEMPLATE_MATCH_THRESHOLD: i64 = 550;

/// Connection to the AI service: the client plus the runtime its requests run on.
#[derive(Clone)]
pub struct AiBridge {
    pub client: Arc<dyn LlmClient>,
    pub handle: Handle,
}

/// Runs the interactive terminal UI until the user quits, then flushes pending edits.
pub fn run<S: KeyValueStore>(
    editor: Editor<S>,
    ai: Option<AiBridge>,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(editor, ai, theme);

    while !app.should_quit {
        let now = Instant::now();
        app.drain_ai(now);
        app.tick(now);
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }
    }

    drop(terminal);
    app.editor.flush()?;
    info!("editor closed");
    Ok(())
}

fn draw<S: KeyValueStore>(frame: &mut Frame<'_>, app: &mut App<S>) {
    let now = Instant::now();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.size());

    let title = format!(" {} ", app.editor.storage().project());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(app.theme.base_style());
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    app.canvas_area = inner;

    let lines = canvas_lines(&app.canvas_buffer(), &app.theme);
    frame.render_widget(Paragraph::new(lines).style(app.theme.base_style()), inner);

    frame.render_widget(Paragraph::new(footer_line(app, now)), chunks[1]);

    render_modals(frame, app, chunks[0]);
}

include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Which AI request a prompt overlay will start.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptKind {
    Flow,
    Components(NodeId),
}

impl PromptKind {
    fn title(&self) -> &'static str {
        match self {
            Self::Flow => "Generate flow",
            Self::Components(_) => "Generate components",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Overlay {
    #[default]
    None,
    Help,
    Templates {
        query: String,
        cursor: usize,
    },
    SaveTemplate {
        name: String,
    },
    Prompt {
        kind: PromptKind,
        input: String,
    },
    Connections {
        cursor: usize,
    },
    Suggestions,
}

impl Overlay {
    fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

struct App<S> {
    editor: Editor<S>,
    theme: TuiTheme,
    overlay: Overlay,
    toast: Option<Toast>,
    /// Inner canvas rectangle from the last draw, in terminal cells.
    canvas_area: Rect,
    pointer_inside: bool,
    clicks: DoubleClickDetector,
    ai: Option<AiBridge>,
    ai_tx: UnboundedSender<AiOutcome>,
    ai_rx: UnboundedReceiver<AiOutcome>,
    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    fn new(editor: Editor<S>, ai: Option<AiBridge>, theme: TuiTheme) -> Self {
        let (ai_tx, ai_rx) = mpsc::unbounded_channel();
        Self {
            editor,
            theme,
            overlay: Overlay::None,
            toast: None,
            canvas_area: Rect::default(),
            pointer_inside: false,
            clicks: DoubleClickDetector::new(DOUBLE_CLICK_WINDOW),
            ai,
            ai_tx,
            ai_rx,
            should_quit: false,
        }
    }

    fn canvas_buffer(&self) -> CanvasBuffer {
        let options = CanvasOptions {
            selected: self.editor.selected().cloned(),
            rubber_band: self.editor.interaction().rubber_band(),
            metrics: CellMetrics::TERMINAL,
        };
        render_canvas(
            self.editor.graph(),
            self.editor.viewport(),
            &options,
            self.canvas_area.width,
            self.canvas_area.height,
        )
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast =
            Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn tick(&mut self, now: Instant) {
        if let Err(err) = self.editor.tick(now) {
            self.set_toast(format!("Save failed: {err}"));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        self.handle_key_code_at(code, Instant::now())
    }

    /// Routes a key to the innermost open modal. Returns true when the app should quit.
    fn handle_key_code_at(&mut self, code: KeyCode, now: Instant) -> bool {
        if self.editor.confirmation().is_some() {
            self.handle_confirmation_key(code, now);
            return false;
        }
        if self.editor.picker().is_some() {
            self.handle_picker_key(code, now);
            return false;
        }
        if self.editor.inline_edit().is_some() {
            self.handle_inline_key(code, now);
            return false;
        }
        if self.overlay.is_open() {
            self.handle_overlay_key(code, now);
            return false;
        }
        self.handle_canvas_key(code, now)
    }

    fn handle_confirmation_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match self.editor.confirm(now) {
                    Ok(Some(Confirmation::DeleteNode(_))) => self.set_toast("Node deleted"),
                    Ok(Some(Confirmation::DeleteConnection { .. })) => {
                        self.set_toast("Connection deleted")
                    }
                    Ok(Some(Confirmation::DeleteTemplate(_))) => {
                        self.clamp_template_cursor();
                        self.set_toast("Template deleted");
                    }
                    Ok(None) => {}
                    Err(err) => self.set_toast(format!("Save failed: {err}")),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.editor.decline();
            }
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Esc => self.editor.dismiss_picker(),
            KeyCode::Char(ch) => {
                let Some(kind) = picker_kind(ch) else {
                    return;
                };
                if self.editor.choose_node_kind(kind, now).is_some() {
                    self.set_toast(format!("Added {}", kind.label()));
                }
            }
            _ => {}
        }
    }

    fn handle_inline_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Enter => {
                self.editor.commit_inline_edit(now);
            }
            KeyCode::Esc => self.editor.cancel_inline_edit(),
            KeyCode::Backspace => self.editor.inline_backspace(),
            KeyCode::Char(ch) => self.editor.inline_insert(ch),
            _ => {}
        }
    }

    fn handle_canvas_key(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.overlay = Overlay::Help,
            KeyCode::Esc => self.editor.select(None),
            KeyCode::Tab => self.select_next_node(),
            KeyCode::Char(' ') => {
                let active = self.editor.toggle_pan_modifier();
                self.set_toast(if active { "Pan mode on" } else { "Pan mode off" });
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.editor.viewport_mut().zoom_in(),
            KeyCode::Char('-') => self.editor.viewport_mut().zoom_out(),
            KeyCode::Char('0') => self.editor.viewport_mut().reset(),
            KeyCode::Left => self.editor.viewport_mut().pan_by(PAN_STEP, 0.0),
            KeyCode::Right => self.editor.viewport_mut().pan_by(-PAN_STEP, 0.0),
            KeyCode::Up => self.editor.viewport_mut().pan_by(0.0, PAN_STEP),
            KeyCode::Down => self.editor.viewport_mut().pan_by(0.0, -PAN_STEP),
            KeyCode::Enter | KeyCode::Char('e') => self.begin_inline_edit(),
            KeyCode::Char('i') => {
                if !self.editor.cycle_icon(now) {
                    self.set_toast("Select a page to change its icon");
                }
            }
            KeyCode::Char('p') => {
                if !self.editor.cycle_status(now) {
                    self.set_toast("Select a page to change its status");
                }
            }
            KeyCode::Char('t') => {
                self.overlay = Overlay::Templates { query: String::new(), cursor: 0 };
            }
            KeyCode::Char('s') => {
                if self.editor.selected_node().is_some() {
                    self.overlay = Overlay::SaveTemplate { name: String::new() };
                } else {
                    self.set_toast("Select a node to save as template");
                }
            }
            KeyCode::Char('c') => {
                if self.editor.selected_connections().is_empty() {
                    self.set_toast("No outgoing connections");
                } else {
                    self.overlay = Overlay::Connections { cursor: 0 };
                }
            }
            KeyCode::Char('g') => {
                self.overlay = Overlay::Prompt { kind: PromptKind::Flow, input: String::new() };
            }
            KeyCode::Char('w') => self.open_components_prompt(),
            KeyCode::Char('u') => self.start_ai(AiTask::Suggestions, String::new()),
            KeyCode::Char('v') => {
                if self.editor.suggestions().is_empty() {
                    self.set_toast("No suggestions yet");
                } else {
                    self.overlay = Overlay::Suggestions;
                }
            }
            KeyCode::Delete | KeyCode::Backspace => {
                if !self.editor.request_delete_selected() {
                    self.set_toast("Nothing selected");
                }
            }
            _ => {}
        }
        false
    }

    fn select_next_node(&mut self) {
        let nodes = self.editor.graph().nodes();
        if nodes.is_empty() {
            return;
        }
        let next = match self.editor.selected() {
            Some(selected) => nodes
                .iter()
                .position(|node| node.node_id() == selected)
                .map_or(0, |idx| (idx + 1) % nodes.len()),
            None => 0,
        };
        let node_id = nodes[next].node_id().clone();
        self.editor.select(Some(node_id));
    }

    fn begin_inline_edit(&mut self) {
        let Some(node) = self.editor.selected_node() else {
            return;
        };
        if !node.kind().is_inline_editable() {
            self.set_toast("Only text and note nodes are edited inline");
            return;
        }
        let node_id = node.node_id().clone();
        self.editor.begin_inline_edit(&node_id);
    }

    fn open_components_prompt(&mut self) {
        match self.editor.selected_node().filter(|node| node.kind() == NodeKind::Page) {
            Some(node) => {
                let kind = PromptKind::Components(node.node_id().clone());
                self.overlay = Overlay::Prompt { kind, input: String::new() };
            }
            None => self.set_toast("Select a page to generate components"),
        }
    }

    fn handle_overlay_key(&mut self, code: KeyCode, now: Instant) {
        match &mut self.overlay {
            Overlay::None => {}
            Overlay::Help => {
                if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    self.overlay = Overlay::None;
                }
            }
            Overlay::Suggestions => match code {
                KeyCode::Esc | KeyCode::Enter => self.overlay = Overlay::None,
                KeyCode::Char('x') => {
                    self.editor.clear_suggestions();
                    self.overlay = Overlay::None;
                }
                _ => {}
            },
            Overlay::Templates { query, cursor } => match code {
                KeyCode::Esc => self.overlay = Overlay::None,
                KeyCode::Up => *cursor = cursor.saturating_sub(1),
                KeyCode::Down => *cursor = cursor.saturating_add(1),
                KeyCode::Backspace => {
                    query.pop();
                    *cursor = 0;
                }
                KeyCode::Char(ch) => {
                    query.push(ch);
                    *cursor = 0;
                }
                KeyCode::Enter => self.place_selected_template(now),
                KeyCode::Delete => self.delete_selected_template(),
                _ => {}
            },
            Overlay::SaveTemplate { name } => match code {
                KeyCode::Esc => self.overlay = Overlay::None,
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(ch) => name.push(ch),
                KeyCode::Enter => {
                    let name = std::mem::take(name);
                    self.overlay = Overlay::None;
                    match self.editor.save_selected_as_template(&name) {
                        Ok(Some(template)) => {
                            self.set_toast(format!("Saved template {}", template.name));
                        }
                        Ok(None) => self.set_toast("Nothing selected"),
                        Err(err) => self.set_toast(format!("Save failed: {err}")),
                    }
                }
                _ => {}
            },
            Overlay::Prompt { kind, input } => match code {
                KeyCode::Esc => self.overlay = Overlay::None,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(ch) => input.push(ch),
                KeyCode::Enter => {
                    if input.trim().is_empty() {
                        return;
                    }
                    let task = match kind {
                        PromptKind::Flow => AiTask::Flow,
                        PromptKind::Components(node_id) => AiTask::Components(node_id.clone()),
                    };
                    let input = std::mem::take(input);
                    self.overlay = Overlay::None;
                    self.start_ai(task, input);
                }
                _ => {}
            },
            Overlay::Connections { cursor } => {
                let connections = self.editor.selected_connections();
                match code {
                    KeyCode::Esc => self.overlay = Overlay::None,
                    KeyCode::Up => *cursor = cursor.saturating_sub(1),
                    KeyCode::Down => {
                        *cursor = (*cursor + 1).min(connections.len().saturating_sub(1));
                    }
                    KeyCode::Delete | KeyCode::Backspace | KeyCode::Enter | KeyCode::Char('d') => {
                        let Some(connection) = connections.get(*cursor) else {
                            self.overlay = Overlay::None;
                            return;
                        };
                        let (from, to) = (connection.from().clone(), connection.to().clone());
                        self.overlay = Overlay::None;
                        self.editor.request_delete_connection(from, to);
                    }
                    _ => {}
                }
            }
        }
    }

    fn template_matches(&self) -> Vec<(&'static str, &Template)> {
        let query = match &self.overlay {
            Overlay::Templates { query, .. } => query.as_str(),
            _ => "",
        };
        template_matches(self.editor.templates(), query)
    }

    fn selected_template_id(&self) -> Option<TemplateId> {
        let Overlay::Templates { cursor, .. } = &self.overlay else {
            return None;
        };
        let matches = self.template_matches();
        let idx = (*cursor).min(matches.len().checked_sub(1)?);
        Some(matches[idx].1.template_id.clone())
    }

    fn clamp_template_cursor(&mut self) {
        let len = self.template_matches().len();
        if let Overlay::Templates { cursor, .. } = &mut self.overlay {
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    fn place_selected_template(&mut self, now: Instant) {
        let Some(template_id) = self.selected_template_id() else {
            return;
        };
        let at = self.canvas_center_world();
        self.overlay = Overlay::None;
        if self.editor.instantiate_template(&template_id, at, now).is_some() {
            self.set_toast("Template placed");
        }
    }

    fn delete_selected_template(&mut self) {
        let Some(template_id) = self.selected_template_id() else {
            return;
        };
        if !self.editor.request_delete_template(template_id) {
            self.set_toast("Built-in templates cannot be deleted");
        }
    }

    /// World point under the middle of the canvas.
    fn canvas_center_world(&self) -> WorldPoint {
        let center = CellMetrics::TERMINAL
            .cell_center(self.canvas_area.width / 2, self.canvas_area.height / 2);
        self.editor.viewport().screen_to_world(center)
    }

    fn start_ai(&mut self, task: AiTask, input: String) {
        let Some(bridge) = self.ai.clone() else {
            self.set_toast("AI is not configured (set ai_endpoint)");
            return;
        };
        let page_name = match &task {
            AiTask::Components(node_id) => match self.editor.graph().node(node_id) {
                Some(node) => node.name().to_owned(),
                None => return,
            },
            _ => String::new(),
        };
        if !self.editor.begin_ai(task.clone()) {
            let running = self.editor.ai().pending().map_or("a request", AiTask::label);
            self.set_toast(format!("AI busy with {running}"));
            return;
        }

        let label = task.label();
        let client = bridge.client;
        let tx = self.ai_tx.clone();
        match task {
            AiTask::Flow => {
                bridge.handle.spawn(async move {
                    let result = generate_flow(client.as_ref(), &input).await;
                    let _ = tx.send(AiOutcome::Flow(result));
                });
            }
            AiTask::Components(node_id) => {
                bridge.handle.spawn(async move {
                    let result = generate_components(client.as_ref(), &page_name, &input).await;
                    let _ = tx.send(AiOutcome::Components { node_id, result });
                });
            }
            AiTask::Suggestions => {
                let graph = self.editor.graph().clone();
                bridge.handle.spawn(async move {
                    let result = suggest_improvements(client.as_ref(), &graph).await;
                    let _ = tx.send(AiOutcome::Suggestions(result));
                });
            }
        }
        debug!(task = label, "ai request started");
        self.set_toast(format!("Running {label}..."));
    }

    fn drain_ai(&mut self, now: Instant) {
        while let Ok(outcome) = self.ai_rx.try_recv() {
            self.apply_ai_outcome(outcome, now);
        }
    }

    fn apply_ai_outcome(&mut self, outcome: AiOutcome, now: Instant) {
        match self.editor.finish_ai(outcome, now) {
            Ok(AiApplied::Flow { nodes, connections }) => {
                self.set_toast(format!("Added {nodes} nodes and {connections} connections"));
            }
            Ok(AiApplied::Components { count: 0, .. }) => {
                self.set_toast("No components added");
            }
            Ok(AiApplied::Components { count, .. }) => {
                self.set_toast(format!("Added {count} components"));
            }
            Ok(AiApplied::Suggestions { count }) => {
                if count > 0 && !self.overlay.is_open() {
                    self.overlay = Overlay::Suggestions;
                }
                self.set_toast(format!("{count} suggestions"));
            }
            Err(err) => {
                warn!(error = %err, "ai request failed");
                self.set_toast(format!("AI request failed: {err}"));
            }
        }
    }

    /// Maps a terminal cell to a canvas-relative cell, if it lies on the canvas.
    fn canvas_cell(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        let area = self.canvas_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        inside.then(|| (column - area.x, row - area.y))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.overlay.is_open() {
            return;
        }
        let Some(cell) = self.canvas_cell(mouse.column, mouse.row) else {
            if self.pointer_inside {
                self.pointer_inside = false;
                self.clicks.reset();
                self.editor.handle_pointer(PointerEvent::Leave, now);
            }
            return;
        };
        self.pointer_inside = true;

        let point = CellMetrics::TERMINAL.cell_center(cell.0, cell.1);
        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self.target_at(point);
                if self.clicks.press(now, cell) {
                    PointerEvent::DoubleClick { point, target }
                } else {
                    PointerEvent::Down { button: PointerButton::Primary, point, target }
                }
            }
            MouseEventKind::Down(MouseButton::Middle) => {
                let target = self.target_at(point);
                PointerEvent::Down { button: PointerButton::Middle, point, target }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                let target = self.target_at(point);
                PointerEvent::Down { button: PointerButton::Secondary, point, target }
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => PointerEvent::Move { point },
            MouseEventKind::Up(_) => PointerEvent::Up { point, target: self.target_at(point) },
            MouseEventKind::ScrollUp => {
                self.editor.viewport_mut().zoom_in();
                return;
            }
            MouseEventKind::ScrollDown => {
                self.editor.viewport_mut().zoom_out();
                return;
            }
            _ => return,
        };
        self.editor.handle_pointer(event, now);
    }

    fn target_at(&self, point: ScreenPoint) -> HitTarget {
        hit_test(self.editor.graph(), self.editor.viewport(), point)
    }
}

/// Node kind for a picker digit, `1` being the first kind.
fn picker_kind(ch: char) -> Option<NodeKind> {
    let idx = ch.to_digit(10)?.checked_sub(1)?;
    NodeKind::ALL.get(idx as usize).copied()
}

/// Templates grouped by category, filtered by a fuzzy `query` and ranked best first.
fn template_matches<'a>(
    library: &'a TemplateLibrary,
    query: &str,
) -> Vec<(&'static str, &'a Template)> {
    let entries = library
        .list_categories()
        .iter()
        .flat_map(|category| category.templates.iter().map(move |t| (category.name, t)))
        .chain(library.custom().iter().map(|t| ("Custom", t)));

    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.collect();
    }

    let mut scored = entries
        .filter_map(|(category, template)| {
            let score = template_score(&query, &template.name.to_lowercase())?;
            Some((score, category, template))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, category, template)| (category, template)).collect()
}

fn template_score(needle: &str, haystack: &str) -> Option<i64> {
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    let mut score = (ratio * 1000.0).round() as i64;
    if haystack.starts_with(needle) {
        score += 3000;
    } else if haystack.contains(needle) {
        score += 2000;
    }
    (score >= TEMPLATE_MATCH_THRESHOLD).then_some(score)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
