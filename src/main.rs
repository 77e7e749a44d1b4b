mod app;
mod http;
mod models;
mod server;
mod ui;
mod utils;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use app::{App, Panel, Preset};
use http::HttpResult;

fn main() -> anyhow::Result<()> {
    // `apiprobe serve` runs the bundled mock API instead of the inspector.
    if std::env::args().nth(1).as_deref() == Some("serve") {
        return server::serve();
    }

    let runtime = Runtime::new()?;
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &runtime);
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, runtime: &Runtime) -> anyhow::Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Results arrive from the request task between frames
        while let Ok(result) = rx.try_recv() {
            app.finish_send(result);
        }

        // Short poll so a finished request repaints without a keypress
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // If help is showing, any key closes it
            if app.show_help {
                app.show_help = false;
                continue;
            }

            if app.input_mode {
                handle_input_key(&mut app, key, runtime, &tx);
            } else {
                handle_normal_key(&mut app, key, runtime, &tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_input_key(
    app: &mut App,
    key: KeyEvent,
    runtime: &Runtime,
    tx: &mpsc::UnboundedSender<HttpResult>,
) {
    match app.focused_panel {
        Panel::Url => match key.code {
            KeyCode::Esc => app.exit_input_mode(),
            KeyCode::Enter => {
                app.exit_input_mode();
                dispatch_send(app, runtime, tx);
            }
            // Cycle method with Tab while editing the URL
            KeyCode::Tab => app.cycle_method_next(),
            KeyCode::BackTab => app.cycle_method_prev(),
            _ => app.url_input(key),
        },
        Panel::Headers => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.exit_input_mode(),
            // Tab switches between the name and value halves of the row
            KeyCode::Tab => app.toggle_header_column(),
            KeyCode::Up => app.select_prev_header(),
            KeyCode::Down => app.select_next_header(),
            // Ctrl+U wipes the field being edited
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.update_header(app.selected_header, app.header_column, "");
                app.move_cursor_start();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.input_char(c)
            }
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Delete => app.delete_char_forward(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_start(),
            KeyCode::End => app.move_cursor_end(),
            _ => {}
        },
        Panel::Body => match key.code {
            KeyCode::Esc => app.exit_input_mode(),
            _ => {
                app.body.input(key);
            }
        },
        Panel::Response => app.exit_input_mode(),
    }
}

fn handle_normal_key(
    app: &mut App,
    key: KeyEvent,
    runtime: &Runtime,
    tx: &mpsc::UnboundedSender<HttpResult>,
) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Esc => app.quit(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Enter input mode on the focused field
        KeyCode::Char('i') | KeyCode::Enter => app.enter_input_mode(),

        // Panel navigation
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Char('h') | KeyCode::Left => app.focus_prev(),
        KeyCode::Char('l') | KeyCode::Right => app.focus_next(),

        KeyCode::Char('j') | KeyCode::Down => match app.focused_panel {
            Panel::Headers => app.select_next_header(),
            Panel::Response => app.scroll_response(1),
            _ => {}
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focused_panel {
            Panel::Headers => app.select_prev_header(),
            Panel::Response => app.scroll_response(-1),
            _ => {}
        },

        // Header row management
        KeyCode::Char('n') => {
            if app.focused_panel == Panel::Headers {
                app.add_header_row();
            }
        }
        KeyCode::Char('d') => {
            if app.focused_panel == Panel::Headers {
                app.remove_header_row(app.selected_header);
            }
        }

        // Method selection
        KeyCode::Char('m') => app.cycle_method_next(),
        KeyCode::Char('M') => app.cycle_method_prev(),

        KeyCode::Char('f') => {
            if app.focused_panel == Panel::Body {
                app.format_body();
            }
        }

        KeyCode::Char('s') => dispatch_send(app, runtime, tx),

        // Presets
        KeyCode::Char('1') => app.load_preset(Preset::JsonPlaceholderGet),
        KeyCode::Char('2') => app.load_preset(Preset::JsonPlaceholderPost),
        KeyCode::Char('3') => app.load_preset(Preset::LocalApi),

        _ => {}
    }
}

/// Spawn one request if the gate allows it. While a request is in flight
/// `start_send` returns `None`, so a second press does nothing.
fn dispatch_send(app: &mut App, runtime: &Runtime, tx: &mpsc::UnboundedSender<HttpResult>) {
    if let Some(spec) = app.start_send() {
        runtime.spawn(http::send_request(spec, tx.clone()));
    }
}
