use tui_textarea::TextArea;

pub fn format_json_if_valid(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| text.to_string())
}

pub fn scroll_by(pos: &mut usize, delta: isize, max: usize) {
    if delta < 0 {
        *pos = pos.saturating_sub((-delta) as usize);
    } else if max > 0 {
        *pos = (*pos + delta as usize).min(max.saturating_sub(1));
    }
}

pub fn body_textarea(initial: &str) -> TextArea<'static> {
    let mut textarea = if initial.is_empty() {
        TextArea::default()
    } else {
        TextArea::new(initial.lines().map(str::to_string).collect())
    };
    textarea.set_cursor_line_style(ratatui::style::Style::default());
    textarea.set_placeholder_text("Request body (JSON, plain text, ...)");
    textarea
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_json_pretty_prints_valid_input() {
        assert_eq!(format_json_if_valid(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn format_json_leaves_invalid_input_alone() {
        assert_eq!(format_json_if_valid("not json"), "not json");
    }

    #[test]
    fn scroll_by_saturates_at_both_ends() {
        let mut pos = 0;
        scroll_by(&mut pos, -3, 10);
        assert_eq!(pos, 0);
        scroll_by(&mut pos, 100, 10);
        assert_eq!(pos, 9);
    }

    #[test]
    fn scroll_by_ignores_forward_scroll_with_no_content() {
        let mut pos = 0;
        scroll_by(&mut pos, 1, 0);
        assert_eq!(pos, 0);
    }
}
