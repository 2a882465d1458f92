use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{MAX_DETAIL_LINKS, NO_TEXT_LABEL, ScanReport};
use crate::tui::app::{App, FlatItem, Focus, Status};

use super::helpers::{fit_spans, pad_spans};

const STAR: &str = "\u{2605} ";

/// Render the status line, quick links and message details
pub fn render_results_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let flat_items = app.build_flat_items();
    app.cursor = app.cursor.min(flat_items.len().saturating_sub(1));
    let cursor = (app.focus == Focus::Results && !flat_items.is_empty()).then_some(app.cursor);

    // Every display line, tagged with the flat item it shows
    let mut display_lines: Vec<(Option<usize>, Vec<Span<'static>>)> = Vec::new();
    display_lines.push((None, status_spans(app)));
    display_lines.push((None, Vec::new()));

    if let Some(report) = &app.report {
        if report.quick_links.is_empty() {
            display_lines.push((
                None,
                vec![Span::styled(
                    " No matching links.",
                    Style::default().fg(app.theme.dim).bg(bg),
                )],
            ));
        } else {
            push_report_lines(app, report, &flat_items, &mut display_lines);
        }
    }

    // Keep the cursor row on screen
    let visible_height = area.height as usize;
    if let Some(cursor) = cursor
        && let Some(row) = display_lines.iter().position(|(i, _)| *i == Some(cursor))
    {
        if row < app.scroll_offset {
            app.scroll_offset = row;
        } else if visible_height > 0 && row >= app.scroll_offset + visible_height {
            app.scroll_offset = row + 1 - visible_height;
        }
    }
    app.scroll_offset = app
        .scroll_offset
        .min(display_lines.len().saturating_sub(1));

    let lines: Vec<Line> = display_lines
        .into_iter()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(item, spans)| {
            let mut spans = fit_spans(spans, width);
            if item.is_some() && item == cursor {
                // Restyle the selected row onto the selection background
                for span in &mut spans {
                    span.style = span.style.bg(app.theme.selection_bg);
                }
                pad_spans(&mut spans, width, Style::default().bg(app.theme.selection_bg));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn status_spans(app: &App) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    match &app.status {
        Status::Idle => vec![Span::styled(
            " Enter the access password and press Enter.",
            Style::default().fg(app.theme.dim).bg(bg),
        )],
        Status::Fetching => vec![Span::styled(
            " Fetching emails...",
            Style::default().fg(app.theme.yellow).bg(bg),
        )],
        Status::Success(summary) => vec![Span::styled(
            format!(" \u{2713} {}", summary),
            Style::default().fg(app.theme.green).bg(bg),
        )],
        Status::Error(message) => vec![Span::styled(
            format!(" Error: {}", message),
            Style::default().fg(app.theme.red).bg(bg),
        )],
    }
}

fn push_report_lines(
    app: &App,
    report: &ScanReport,
    flat_items: &[FlatItem],
    out: &mut Vec<(Option<usize>, Vec<Span<'static>>)>,
) {
    let bg = app.theme.background;
    let heading = Style::default()
        .fg(app.theme.purple)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let link = Style::default().fg(app.theme.link).bg(bg);
    let star = Style::default().fg(app.theme.today).bg(bg);

    out.push((None, vec![Span::styled(" Quick Links", heading)]));

    for (idx, item) in flat_items.iter().enumerate() {
        let spans = match *item {
            FlatItem::QuickLink(i) => {
                let quick = &report.quick_links[i];
                vec![
                    Span::styled(" ", dim),
                    if quick.is_today {
                        Span::styled(STAR, star)
                    } else {
                        Span::styled("  ", dim)
                    },
                    Span::styled(quick.label.clone(), link),
                    Span::styled(format!("  {}", quick.subject), dim),
                ]
            }
            FlatItem::Message(i) => {
                let view = &report.records[i];
                let expanded = app.expanded.contains(&view.record.id);
                if i == 0 {
                    out.push((None, Vec::new()));
                    out.push((None, vec![Span::styled(" Details", heading)]));
                }
                let mut spans = vec![Span::styled(
                    if expanded { " \u{25BE} " } else { " \u{25B8} " },
                    dim,
                )];
                if view.is_today {
                    spans.push(Span::styled(format!("{}TODAY | ", STAR), star));
                }
                spans.push(Span::styled(
                    view.title(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ));
                out.push((Some(idx), spans));

                if expanded {
                    out.push((
                        None,
                        vec![Span::styled(format!("     From: {}", view.record.sender), dim)],
                    ));
                    out.push((
                        None,
                        vec![Span::styled(
                            format!("     Snippet: {}", view.record.snippet),
                            dim,
                        )],
                    ));
                    if view.record.links.is_empty() {
                        out.push((
                            None,
                            vec![Span::styled("     No matching links.", dim)],
                        ));
                    }
                }
                continue;
            }
            FlatItem::MessageLink { record, link: n } => {
                let links = &report.records[record].record.links;
                let target = &links[n];
                let label = if target.text.is_empty() {
                    NO_TEXT_LABEL.to_string()
                } else {
                    target.text.clone()
                };
                out.push((
                    Some(idx),
                    vec![
                        Span::styled("     - ", dim),
                        Span::styled(label, link),
                        Span::styled(format!("  {}", target.href), dim),
                    ],
                ));
                if n + 1 == MAX_DETAIL_LINKS && links.len() > MAX_DETAIL_LINKS {
                    out.push((
                        None,
                        vec![Span::styled(
                            format!("     ({} more)", links.len() - MAX_DETAIL_LINKS),
                            dim,
                        )],
                    ));
                }
                continue;
            }
        };
        out.push((Some(idx), spans));
    }
}
