use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// Shown in place of each typed character
const MASK: &str = "\u{2022}";

/// Render the sidebar: password field and the fetch hint
pub fn render_access_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Password;

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // " " + field + cursor
    let field_width = (inner.width as usize).saturating_sub(3);
    let masked = MASK.repeat(app.password_input.chars().count());
    let visible = unicode::tail_to_width(&masked, field_width).to_string();

    let label_style = if focused {
        Style::default().fg(app.theme.highlight).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let mut field = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(visible, Style::default().fg(app.theme.text_bright).bg(bg)),
    ];
    if focused {
        field.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        )); // ▌ cursor
    }

    let lines = vec![
        Line::from(Span::styled(
            " Access",
            Style::default()
                .fg(app.theme.purple)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Access Password", label_style)),
        Line::from(field),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter", Style::default().fg(app.theme.text_bright).bg(bg)),
            Span::styled("  Fetch Links", Style::default().fg(app.theme.text).bg(bg)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
