use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};

use super::helpers::{fit_spans, spans_width};

/// Render the status row (bottom of screen): the selected link on the
/// left, key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let hint = match app.focus {
        Focus::Password => "Enter fetch  Tab results  Esc quit",
        Focus::Results => "j/k move  Enter toggle  o open  r refresh  Tab password  q quit",
    };
    let hint_width = hint.chars().count();

    let mut spans: Vec<Span<'static>> = Vec::new();
    if app.focus == Focus::Results
        && let Some(href) = app.selected_href()
    {
        let room = width.saturating_sub(hint_width + 2);
        spans = fit_spans(
            vec![Span::styled(
                format!(" {}", href),
                Style::default().fg(app.theme.link).bg(bg),
            )],
            room,
        );
    }

    let content_width = spans_width(&spans);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UiConfig;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn password_hints() {
        let app = App::new(None, &UiConfig::default());
        let out = render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(out.ends_with("Enter fetch  Tab results  Esc quit"));
    }

    #[test]
    fn selected_link_is_shown() {
        let app = app_with_report();
        let out = render_to_string(120, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(out.starts_with(" https://account.example.com/verify?token=abc"));
        assert!(out.ends_with("q quit"));
    }
}
