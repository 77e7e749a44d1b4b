use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, HeaderColumn, Panel};
use crate::models::{HttpMethod, RequestState, ResponseData};

pub mod theme {
    use ratatui::style::Color;

    pub const BG: Color = Color::Rgb(24, 25, 33);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(38, 40, 52);
    pub const BORDER: Color = Color::Rgb(61, 64, 82);
    pub const BORDER_FOCUSED: Color = Color::Rgb(97, 214, 179);
    pub const TEXT: Color = Color::Rgb(216, 222, 233);
    pub const TEXT_DIM: Color = Color::Rgb(118, 124, 140);
    pub const ACCENT: Color = Color::Rgb(97, 214, 179);
    pub const ERROR: Color = Color::Rgb(236, 91, 100);
    pub const METHOD_GET: Color = Color::Rgb(97, 214, 179);
    pub const METHOD_POST: Color = Color::Rgb(255, 200, 87);
    pub const METHOD_PUT: Color = Color::Rgb(99, 167, 244);
    pub const METHOD_PATCH: Color = Color::Rgb(186, 140, 245);
    pub const METHOD_DELETE: Color = Color::Rgb(236, 91, 100);
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Vertical layout: main content + status bar
    let outer_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Main layout: request form on the left, response on the right
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer_layout[0]);

    let form_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL bar
            Constraint::Min(4),    // Header rows
            Constraint::Length(9), // Body editor
        ])
        .split(main_layout[0]);

    render_url_bar(frame, app, form_layout[0]);
    render_headers(frame, app, form_layout[1]);
    render_body(frame, app, form_layout[2]);
    render_response(frame, app, main_layout[1]);
    render_status_bar(frame, outer_layout[1]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn border_color(app: &App, panel: Panel) -> ratatui::style::Color {
    if app.focused_panel == panel {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER
    }
}

fn method_color(method: HttpMethod) -> ratatui::style::Color {
    match method {
        HttpMethod::Get => theme::METHOD_GET,
        HttpMethod::Post => theme::METHOD_POST,
        HttpMethod::Put => theme::METHOD_PUT,
        HttpMethod::Patch => theme::METHOD_PATCH,
        HttpMethod::Delete => theme::METHOD_DELETE,
        _ => theme::TEXT_DIM,
    }
}

/// Render the method chip and URL input
fn render_url_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Request ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app, Panel::Url)))
        .style(Style::default().bg(theme::BG));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(1)])
        .split(inner);

    let chip = Paragraph::new(Span::styled(
        format!(" {} ", app.method.as_str()),
        Style::default().fg(theme::BG).bg(method_color(app.method)),
    ))
    .style(Style::default().bg(theme::BG));
    frame.render_widget(chip, chunks[0]);

    let width = chunks[1].width.max(1) as usize;
    let scroll = app.url.visual_scroll(width.saturating_sub(1));
    let url = Paragraph::new(app.url.value())
        .style(Style::default().fg(theme::TEXT).bg(theme::BG))
        .scroll((0, scroll as u16));
    frame.render_widget(url, chunks[1]);

    if app.input_mode && app.focused_panel == Panel::Url {
        let cursor_x = app.url.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((chunks[1].x + cursor_x, chunks[1].y));
    }
}

/// Render the editable header rows
fn render_headers(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Headers ({}) ", app.headers.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app, Panel::Headers)))
        .style(Style::default().bg(theme::BG));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.headers.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No headers. Press n to add one.",
            Style::default().fg(theme::TEXT_DIM),
        ))
        .style(Style::default().bg(theme::BG));
        frame.render_widget(empty, inner);
        return;
    }

    let focused = app.focused_panel == Panel::Headers;
    let lines: Vec<Line> = app
        .headers
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = focused && i == app.selected_header;
            let bg = if is_selected {
                theme::BG_HIGHLIGHT
            } else {
                theme::BG
            };

            let column_style = |column: HeaderColumn, text_color| {
                let style = Style::default().fg(text_color).bg(bg);
                if is_selected && app.header_column == column {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                }
            };

            let key_display = if field.key.is_empty() { "(name)" } else { field.key.as_str() };
            let value_display = if field.value.is_empty() { "(value)" } else { field.value.as_str() };
            let key_color = if field.key.is_empty() { theme::TEXT_DIM } else { theme::ACCENT };
            let value_color = if field.value.is_empty() { theme::TEXT_DIM } else { theme::TEXT };

            Line::from(vec![
                Span::styled(
                    if is_selected { "> " } else { "  " },
                    Style::default().fg(theme::ACCENT).bg(bg),
                ),
                Span::styled(key_display.to_string(), column_style(HeaderColumn::Key, key_color)),
                Span::styled(": ", Style::default().fg(theme::TEXT_DIM).bg(bg)),
                Span::styled(
                    value_display.to_string(),
                    column_style(HeaderColumn::Value, value_color),
                ),
            ])
        })
        .collect();

    let content = Paragraph::new(Text::from(lines)).style(Style::default().bg(theme::BG));
    frame.render_widget(content, inner);

    if app.input_mode && focused {
        if let Some(field) = app.headers.get(app.selected_header) {
            // "(name)" stands in for an empty key, so the value column
            // starts after its six characters.
            let key_display_len = if field.key.is_empty() {
                6
            } else {
                field.key.chars().count() as u16
            };
            let cursor_x = match app.header_column {
                HeaderColumn::Key => 2 + app.header_cursor as u16,
                HeaderColumn::Value => 2 + key_display_len + 2 + app.header_cursor as u16,
            };
            let cursor_y = app.selected_header as u16;
            if cursor_y < inner.height {
                frame.set_cursor_position((
                    (inner.x + cursor_x).min(inner.x + inner.width.saturating_sub(1)),
                    inner.y + cursor_y,
                ));
            }
        }
    }
}

/// Render the body editor. GET/HEAD requests never send a body, so the
/// title says so instead of pretending otherwise.
fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.method.allows_body() {
        " Body ".to_string()
    } else {
        format!(" Body (not sent for {}) ", app.method.as_str())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app, Panel::Body)))
        .style(Style::default().bg(theme::BG));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.body, inner);
}

/// Render the response panel: placeholder, spinner text, error card, or the
/// normalized result depending on the request state
fn render_response(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Response ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app, Panel::Response)))
        .style(Style::default().bg(theme::BG));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.state {
        RequestState::Idle => {
            let placeholder = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    "Not sent",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::ITALIC),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press s to send the request",
                    Style::default().fg(theme::TEXT_DIM),
                )),
            ]))
            .centered()
            .style(Style::default().bg(theme::BG));
            frame.render_widget(placeholder, inner);
        }
        RequestState::Loading => {
            let loading = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    "Sending...",
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::ITALIC),
                )),
            ]))
            .centered()
            .style(Style::default().bg(theme::BG));
            frame.render_widget(loading, inner);
        }
        RequestState::Error(message) => {
            let error = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Error",
                    Style::default()
                        .fg(theme::ERROR)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(theme::TEXT),
                )),
            ]))
            .style(Style::default().bg(theme::BG));
            frame.render_widget(error, inner);
        }
        RequestState::Success(response) => render_response_data(frame, app, inner, response),
    }
}

fn render_response_data(frame: &mut Frame, app: &App, area: Rect, response: &ResponseData) {
    let header_height = (response.headers.len() as u16 + 1).min(8);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Status line + final URL
            Constraint::Length(header_height), // Response headers
            Constraint::Min(1),                // Body
        ])
        .split(area);

    let status_color = if response.ok { theme::ACCENT } else { theme::ERROR };
    let meta = Paragraph::new(Text::from(vec![
        Line::from(vec![
            Span::styled(
                format!(" {} {} ", response.status, response.status_text),
                Style::default()
                    .fg(theme::BG)
                    .bg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", response.elapsed_display()),
                Style::default().fg(theme::TEXT_DIM),
            ),
            Span::styled(
                format!(" {} ", response.size_display()),
                Style::default().fg(theme::TEXT_DIM),
            ),
        ]),
        Line::from(Span::styled(
            response.final_url.as_str(),
            Style::default().fg(theme::TEXT_DIM),
        )),
    ]))
    .style(Style::default().bg(theme::BG));
    frame.render_widget(meta, chunks[0]);

    let mut header_lines = vec![Line::from(Span::styled(
        "Headers",
        Style::default()
            .fg(theme::TEXT)
            .add_modifier(Modifier::BOLD),
    ))];
    header_lines.extend(response.headers.iter().map(|(name, value)| {
        Line::from(vec![
            Span::styled(format!("{}: ", name), Style::default().fg(theme::ACCENT)),
            Span::styled(value.as_str(), Style::default().fg(theme::TEXT)),
        ])
    }));
    let headers = Paragraph::new(Text::from(header_lines)).style(Style::default().bg(theme::BG));
    frame.render_widget(headers, chunks[1]);

    let mut body_lines = vec![Line::from(Span::styled(
        "Body",
        Style::default()
            .fg(theme::TEXT)
            .add_modifier(Modifier::BOLD),
    ))];
    body_lines.extend(
        response
            .body
            .display()
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme::TEXT)))),
    );
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().bg(theme::BG))
        .scroll((app.response_scroll as u16, 0));
    frame.render_widget(body, chunks[2]);
}

/// One-line bar of the most useful keybinds
fn render_status_bar(frame: &mut Frame, area: Rect) {
    let status = Line::from(vec![
        Span::styled(" q ", Style::default().fg(theme::BG).bg(theme::TEXT_DIM)),
        Span::styled(" Quit ", Style::default().fg(theme::TEXT_DIM)),
        Span::styled(" ? ", Style::default().fg(theme::BG).bg(theme::TEXT_DIM)),
        Span::styled(" Help ", Style::default().fg(theme::TEXT_DIM)),
        Span::styled(" Tab ", Style::default().fg(theme::BG).bg(theme::TEXT_DIM)),
        Span::styled(" Switch Panel ", Style::default().fg(theme::TEXT_DIM)),
        Span::styled(" i ", Style::default().fg(theme::BG).bg(theme::TEXT_DIM)),
        Span::styled(" Edit ", Style::default().fg(theme::TEXT_DIM)),
        Span::styled(" s ", Style::default().fg(theme::BG).bg(theme::TEXT_DIM)),
        Span::styled(" Send ", Style::default().fg(theme::TEXT_DIM)),
    ]);

    let status_bar = Paragraph::new(status).style(Style::default().bg(theme::BG));

    frame.render_widget(status_bar, area);
}

/// Centered overlay listing every keybind
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 56;
    let help_height = 24;
    let help_area = Rect {
        x: area.width.saturating_sub(help_width) / 2,
        y: area.height.saturating_sub(help_height) / 2,
        width: help_width.min(area.width),
        height: help_height.min(area.height),
    };

    frame.render_widget(Clear, help_area);

    let entry = |keys: &str, action: &str| {
        Line::from(vec![
            Span::styled(format!("{:<18}", keys), Style::default().fg(theme::ACCENT)),
            Span::styled(action.to_string(), Style::default().fg(theme::TEXT)),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        entry("Tab / Shift+Tab", "Cycle panels"),
        entry("h / l", "Previous / Next panel"),
        entry("i / Enter", "Edit the focused field"),
        entry("Esc", "Stop editing (or quit)"),
        entry("s", "Send the request"),
        entry("m / M", "Cycle HTTP method"),
        entry("j / k", "Select header row / scroll response"),
        entry("n", "Add header row"),
        entry("d", "Delete header row"),
        entry("f", "Format body as JSON"),
        entry("1 / 2 / 3", "Load a preset request"),
        entry("?", "Toggle this help"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "While editing: Tab toggles header name/value,",
            Style::default().fg(theme::TEXT_DIM),
        )),
        Line::from(Span::styled(
            "Tab in the URL bar cycles the method,",
            Style::default().fg(theme::TEXT_DIM),
        )),
        Line::from(Span::styled(
            "and Ctrl+U clears a header field.",
            Style::default().fg(theme::TEXT_DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::BG_HIGHLIGHT)),
        )
        .centered();

    frame.render_widget(help, help_area);
}
