// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Converts a rasterized canvas into styled lines, merging runs of equal style into one span.
fn canvas_lines(buffer: &CanvasBuffer, theme: &TuiTheme) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(usize::from(buffer.height()));
    for row in 0..buffer.height() {
        let mut spans = Vec::<Span<'static>>::new();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;
        for col in 0..buffer.width() {
            let Some(cell) = buffer.get(col, row) else {
                continue;
            };
            let style = theme.cell_style(cell);
            if run_style.is_some_and(|current| current != style) {
                spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
            }
            run_style = Some(style);
            run.push(cell.ch);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style.unwrap_or_default()));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn footer_line<S: KeyValueStore>(app: &App<S>, now: Instant) -> Line<'static> {
    let editor = &app.editor;
    let mut spans = vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR).add_modifier(Modifier::BOLD),
    )];

    let zoom = format!("{}%", editor.viewport().zoom_percent());
    push_footer_entry(&mut spans, "zoom", &zoom);

    let gesture = editor.interaction().gesture();
    let mode = if !gesture.is_idle() {
        gesture.name()
    } else if editor.interaction().pan_modifier() {
        "pan"
    } else {
        "select"
    };
    push_footer_entry(&mut spans, "mode", mode);

    if let Some(edit) = editor.inline_edit() {
        push_footer_entry(&mut spans, "editing", &format!("{}▏", edit.buffer));
    } else {
        let selected = editor.selected_node().map_or("none", |node| node.name());
        push_footer_entry(&mut spans, "selected", selected);
    }

    let save = if editor.has_pending_save() { "pending" } else { "saved" };
    push_footer_entry(&mut spans, "save", save);

    match (&app.ai, editor.ai().pending()) {
        (None, _) => push_footer_entry_maybe_disabled(&mut spans, "ai", "off", true),
        (Some(_), Some(task)) => push_footer_entry(&mut spans, "ai", task.label()),
        (Some(_), None) => push_footer_entry(&mut spans, "ai", "idle"),
    }
    push_footer_entry(&mut spans, "help", "?");

    if let Some(toast) = app.toast.as_ref().filter(|toast| toast.expires_at > now) {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled("Toast:".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(toast.message.clone()));
    }

    Line::from(spans)
}

fn render_modals<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    if let Some(text) = confirmation_text(app) {
        let lines = vec![
            Line::from(text),
            Line::from(""),
            Line::from(vec![
                Span::styled("y".to_owned(), help_key_style()),
                Span::raw(" confirm   ".to_owned()),
                Span::styled("n".to_owned(), help_key_style()),
                Span::raw(" cancel".to_owned()),
            ]),
        ];
        render_modal(frame, app, "Confirm", lines, centered_rect(50, 25, area));
        return;
    }

    if app.editor.picker().is_some() {
        let lines = NodeKind::ALL
            .iter()
            .enumerate()
            .map(|(idx, kind)| help_kv(&(idx + 1).to_string(), kind.label(), 1, help_key_style()))
            .collect();
        render_modal(frame, app, "Add node", lines, centered_rect(30, 40, area));
        return;
    }

    match &app.overlay {
        Overlay::None => {}
        Overlay::Help => {
            render_modal(frame, app, "Help", help_lines(), centered_rect(70, 80, area));
        }
        Overlay::Templates { .. } => {
            let lines = template_lines(app);
            render_modal(frame, app, "Templates", lines, centered_rect(60, 70, area));
        }
        Overlay::SaveTemplate { name } => {
            let lines = vec![
                Line::from("Template name (blank keeps the node name):"),
                Line::from(format!("> {name}▏")),
            ];
            render_modal(frame, app, "Save as template", lines, centered_rect(50, 20, area));
        }
        Overlay::Prompt { kind, input } => {
            let hint = match kind {
                PromptKind::Flow => "Describe the flow to generate:".to_owned(),
                PromptKind::Components(node_id) => {
                    let name = app.editor.graph().node(node_id).map_or("", |node| node.name());
                    format!("Describe what the \"{name}\" page should contain:")
                }
            };
            let lines = vec![Line::from(hint), Line::from(format!("> {input}▏"))];
            render_modal(frame, app, kind.title(), lines, centered_rect(60, 20, area));
        }
        Overlay::Connections { cursor } => {
            let lines = connection_lines(app, *cursor);
            render_modal(frame, app, "Connections", lines, centered_rect(50, 50, area));
        }
        Overlay::Suggestions => {
            let lines = suggestion_lines(app);
            render_modal(frame, app, "Suggestions", lines, centered_rect(70, 70, area));
        }
    }
}

fn render_modal<S: KeyValueStore>(
    frame: &mut Frame<'_>,
    app: &App<S>,
    title: &str,
    lines: Vec<Line<'static>>,
    area: Rect,
) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(app.theme.modal_border_style());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(app.theme.base_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn confirmation_text<S: KeyValueStore>(app: &App<S>) -> Option<String> {
    let graph = app.editor.graph();
    let name_of = |node_id: &NodeId| {
        graph.node(node_id).map_or_else(|| node_id.to_string(), |node| node.name().to_owned())
    };
    let text = match app.editor.confirmation()? {
        Confirmation::DeleteNode(node_id) => {
            let touching = graph.connections().iter().filter(|c| c.touches(node_id)).count();
            let kind = graph.node(node_id).map_or("node", |node| node.kind().as_str());
            format!(
                "Delete {kind} \"{}\" and its {touching} connection(s)?",
                name_of(node_id)
            )
        }
        Confirmation::DeleteConnection { from, to } => {
            format!("Delete connection {} -> {}?", name_of(from), name_of(to))
        }
        Confirmation::DeleteTemplate(template_id) => {
            let name = app
                .editor
                .templates()
                .find(template_id)
                .map_or_else(|| template_id.to_string(), |template| template.name.clone());
            format!("Delete template \"{name}\"?")
        }
    };
    Some(text)
}

fn template_lines<S: KeyValueStore>(app: &App<S>) -> Vec<Line<'static>> {
    let Overlay::Templates { query, cursor } = &app.overlay else {
        return Vec::new();
    };
    let matches = app.template_matches();
    let cursor = (*cursor).min(matches.len().saturating_sub(1));

    let mut lines = vec![Line::from(format!("Search: {query}▏")), Line::from("")];
    if matches.is_empty() {
        lines.push(Line::styled("No matching templates".to_owned(), app.theme.dim_style()));
    }
    for (idx, (category, template)) in matches.iter().enumerate() {
        let text = format!(
            "{} {:<22} {} · {}",
            template.icon.glyph(),
            template.name,
            category,
            template.kind.label()
        );
        let style = if idx == cursor { app.theme.selection_style() } else { Style::default() };
        lines.push(Line::styled(text, style));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Enter place · Del delete custom · Esc close".to_owned(),
        app.theme.dim_style(),
    ));
    lines
}

fn connection_lines<S: KeyValueStore>(app: &App<S>, cursor: usize) -> Vec<Line<'static>> {
    let graph = app.editor.graph();
    app.editor
        .selected_connections()
        .iter()
        .enumerate()
        .map(|(idx, connection)| {
            let from = graph.node(connection.from()).map_or("?", |node| node.name());
            let to = graph.node(connection.to()).map_or("?", |node| node.name());
            let style = if idx == cursor { app.theme.selection_style() } else { Style::default() };
            Line::styled(format!("{from} -> {to}"), style)
        })
        .collect()
}

fn suggestion_lines<S: KeyValueStore>(app: &App<S>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for suggestion in app.editor.suggestions() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", suggestion.priority.as_str()), help_key_style()),
            Span::styled(suggestion.title.clone(), help_header_style()),
        ]));
        lines.push(Line::from(format!("  {}", suggestion.detail)));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled("x clear · Esc close".to_owned(), app.theme.dim_style()));
    lines
}

fn help_lines() -> Vec<Line<'static>> {
    let entries: &[(&str, &str)] = &[
        ("drag", "Move node, or connect from an anchor"),
        ("dbl-click", "Add node on canvas, edit text/note"),
        ("middle/space", "Pan the canvas"),
        ("wheel +/-", "Zoom"),
        ("arrows", "Pan"),
        ("0", "Reset view"),
        ("Tab", "Select next node"),
        ("Enter/e", "Edit text inline"),
        ("i / p", "Cycle icon / status"),
        ("c", "Outgoing connections"),
        ("Del", "Delete selected node"),
        ("t / s", "Templates / save as template"),
        ("g / w", "AI flow / AI components"),
        ("u / v", "AI suggestions / show them"),
        ("q", "Quit"),
    ];
    let key_width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    entries.iter().map(|(key, desc)| help_kv(key, desc, key_width, help_key_style())).collect()
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    vec![Span::styled(value.to_owned(), Style::default().fg(color).add_modifier(Modifier::BOLD))]
}
