use crossterm::event::{Event, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_textarea::TextArea;

use crate::http::HttpResult;
use crate::models::{HeaderField, HttpMethod, RequestSpec, RequestState};
use crate::utils;

/// The currently focused panel in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Url,
    Headers,
    Body,
    Response,
}

impl Panel {
    /// Move to the next panel (wrapping around)
    pub fn next(self) -> Self {
        match self {
            Panel::Url => Panel::Headers,
            Panel::Headers => Panel::Body,
            Panel::Body => Panel::Response,
            Panel::Response => Panel::Url,
        }
    }

    /// Move to the previous panel (wrapping around)
    pub fn prev(self) -> Self {
        match self {
            Panel::Url => Panel::Response,
            Panel::Headers => Panel::Url,
            Panel::Body => Panel::Headers,
            Panel::Response => Panel::Body,
        }
    }
}

/// Which half of a header row is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderColumn {
    #[default]
    Key,
    Value,
}

/// Ready-made requests for quick experiments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    JsonPlaceholderGet,
    JsonPlaceholderPost,
    LocalApi,
}

/// Main application state. The event loop issues commands against this
/// struct and the renderer re-reads it after every command.
pub struct App {
    /// Currently focused panel
    pub focused_panel: Panel,
    /// Whether keystrokes go to the focused editor
    pub input_mode: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether to show help overlay
    pub show_help: bool,
    pub method: HttpMethod,
    pub url: Input,
    pub headers: Vec<HeaderField>,
    pub selected_header: usize,
    pub header_column: HeaderColumn,
    /// Char-based cursor within the header field being edited
    pub header_cursor: usize,
    pub body: TextArea<'static>,
    /// Outcome of the last send. Exactly one of response or error at a time.
    pub state: RequestState,
    pub response_scroll: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            focused_panel: Panel::default(),
            input_mode: false,
            should_quit: false,
            show_help: false,
            method: HttpMethod::default(),
            url: Input::default(),
            headers: vec![HeaderField::default()],
            selected_header: 0,
            header_column: HeaderColumn::default(),
            header_cursor: 0,
            body: utils::body_textarea(""),
            state: RequestState::default(),
            response_scroll: 0,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Focus the next panel
    pub fn focus_next(&mut self) {
        self.focused_panel = self.focused_panel.next();
    }

    /// Focus the previous panel
    pub fn focus_prev(&mut self) {
        self.focused_panel = self.focused_panel.prev();
    }

    pub fn enter_input_mode(&mut self) {
        match self.focused_panel {
            Panel::Url | Panel::Body => self.input_mode = true,
            Panel::Headers => {
                if self.headers.is_empty() {
                    self.add_header_row();
                }
                self.header_cursor = self.selected_field_len();
                self.input_mode = true;
            }
            // The response panel is read-only
            Panel::Response => {}
        }
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = false;
    }

    pub fn cycle_method_next(&mut self) {
        self.method = self.method.next();
    }

    pub fn cycle_method_prev(&mut self) {
        self.method = self.method.prev();
    }

    /// Append an empty header row and select it. Cannot fail.
    pub fn add_header_row(&mut self) {
        self.headers.push(HeaderField::default());
        self.selected_header = self.headers.len() - 1;
        self.header_column = HeaderColumn::Key;
        self.header_cursor = 0;
    }

    /// Remove the header row at `index`. Out of bounds is a no-op; the order
    /// of the remaining rows is untouched.
    pub fn remove_header_row(&mut self, index: usize) {
        if index >= self.headers.len() {
            return;
        }
        self.headers.remove(index);
        if self.selected_header >= self.headers.len() {
            self.selected_header = self.headers.len().saturating_sub(1);
        }
        self.header_cursor = 0;
    }

    /// Overwrite one half of a header row. Out of bounds is a no-op.
    pub fn update_header(&mut self, index: usize, column: HeaderColumn, value: impl Into<String>) {
        if let Some(field) = self.headers.get_mut(index) {
            match column {
                HeaderColumn::Key => field.key = value.into(),
                HeaderColumn::Value => field.value = value.into(),
            }
        }
    }

    pub fn select_next_header(&mut self) {
        if self.selected_header + 1 < self.headers.len() {
            self.selected_header += 1;
            self.header_cursor = self.selected_field_len();
        }
    }

    pub fn select_prev_header(&mut self) {
        if self.selected_header > 0 {
            self.selected_header -= 1;
            self.header_cursor = self.selected_field_len();
        }
    }

    /// Switch editing between the key and value halves of the selected row
    pub fn toggle_header_column(&mut self) {
        self.header_column = match self.header_column {
            HeaderColumn::Key => HeaderColumn::Value,
            HeaderColumn::Value => HeaderColumn::Key,
        };
        self.header_cursor = self.selected_field_len();
    }

    fn selected_field(&self) -> Option<&String> {
        let field = self.headers.get(self.selected_header)?;
        Some(match self.header_column {
            HeaderColumn::Key => &field.key,
            HeaderColumn::Value => &field.value,
        })
    }

    fn selected_field_mut(&mut self) -> Option<&mut String> {
        let column = self.header_column;
        let field = self.headers.get_mut(self.selected_header)?;
        Some(match column {
            HeaderColumn::Key => &mut field.key,
            HeaderColumn::Value => &mut field.value,
        })
    }

    fn selected_field_len(&self) -> usize {
        self.selected_field().map(|s| s.chars().count()).unwrap_or(0)
    }

    pub fn input_char(&mut self, c: char) {
        let cursor = self.header_cursor;
        if let Some(field) = self.selected_field_mut() {
            let at = byte_index(field, cursor);
            field.insert(at, c);
            self.header_cursor = cursor + 1;
        }
    }

    pub fn delete_char(&mut self) {
        let cursor = self.header_cursor;
        if cursor == 0 {
            return;
        }
        if let Some(field) = self.selected_field_mut() {
            let at = byte_index(field, cursor - 1);
            field.remove(at);
            self.header_cursor = cursor - 1;
        }
    }

    pub fn delete_char_forward(&mut self) {
        let cursor = self.header_cursor;
        if let Some(field) = self.selected_field_mut() {
            if cursor < field.chars().count() {
                let at = byte_index(field, cursor);
                field.remove(at);
            }
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.header_cursor = self.header_cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.header_cursor = (self.header_cursor + 1).min(self.selected_field_len());
    }

    pub fn move_cursor_start(&mut self) {
        self.header_cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.header_cursor = self.selected_field_len();
    }

    /// Forward a key press to the URL input widget
    pub fn url_input(&mut self, key: KeyEvent) {
        self.url.handle_event(&Event::Key(key));
    }

    pub fn body_text(&self) -> String {
        self.body.lines().join("\n")
    }

    /// Pretty-print the body in place if it holds valid JSON
    pub fn format_body(&mut self) {
        let formatted = utils::format_json_if_valid(&self.body_text());
        self.body = utils::body_textarea(&formatted);
    }

    /// Snapshot the form into a request descriptor. Assembled fresh on every
    /// send; never stored.
    pub fn request_spec(&self) -> RequestSpec {
        RequestSpec {
            method: self.method,
            url: self.url.value().trim().to_string(),
            headers: self.headers.clone(),
            body: self.body_text(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    /// Gate and begin one send. Returns the descriptor to execute, or `None`
    /// when nothing should be spawned: a request is already in flight (the
    /// attempt is ignored, not queued) or the URL is empty (reported as an
    /// error without touching the network). Entering `Loading` drops any
    /// previous response or error.
    pub fn start_send(&mut self) -> Option<RequestSpec> {
        if self.is_loading() {
            return None;
        }

        let spec = self.request_spec();
        if spec.url.is_empty() {
            self.state = RequestState::Error("URL required".to_string());
            return None;
        }

        self.state = RequestState::Loading;
        Some(spec)
    }

    /// Record the outcome of the in-flight request
    pub fn finish_send(&mut self, result: HttpResult) {
        self.state = match result {
            HttpResult::Success(response) => RequestState::Success(response),
            HttpResult::Error(message) => RequestState::Error(message),
        };
        self.response_scroll = 0;
    }

    pub fn scroll_response(&mut self, delta: isize) {
        if let RequestState::Success(response) = &self.state {
            let lines = response.body.display().lines().count();
            utils::scroll_by(&mut self.response_scroll, delta, lines);
        }
    }

    pub fn load_preset(&mut self, preset: Preset) {
        let (method, url, body) = match preset {
            Preset::JsonPlaceholderGet => (
                HttpMethod::Get,
                "https://jsonplaceholder.typicode.com/posts/1",
                String::new(),
            ),
            Preset::JsonPlaceholderPost => (
                HttpMethod::Post,
                "https://jsonplaceholder.typicode.com/posts",
                "{\n  \"title\": \"foo\",\n  \"body\": \"bar\",\n  \"userId\": 1\n}".to_string(),
            ),
            Preset::LocalApi => (
                HttpMethod::Get,
                "http://127.0.0.1:3000/api/test",
                String::new(),
            ),
        };

        self.method = method;
        self.url = Input::new(url.to_string());
        self.headers = vec![HeaderField::new("Content-Type", "application/json")];
        self.selected_header = 0;
        self.header_column = HeaderColumn::Key;
        self.header_cursor = 0;
        self.body = utils::body_textarea(&body);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
