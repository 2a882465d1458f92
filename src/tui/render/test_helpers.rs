use chrono::DateTime;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{ExtractedLink, MailRecord, QuickLink, RecordView, ScanReport, UiConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Two messages: #7 from today with three links, #3 from earlier with none.
pub fn sample_report() -> ScanReport {
    let today = DateTime::parse_from_rfc3339("2024-01-02T10:00:00+09:00").ok();
    let earlier = DateTime::parse_from_rfc3339("2023-12-20T08:00:00+09:00").ok();

    let verify = MailRecord {
        id: "7".into(),
        raw_date: "Tue, 2 Jan 2024 10:00:00 +0900".into(),
        timestamp: today,
        sender: "info@account.example.com".into(),
        subject: "Confirm your sign-in".into(),
        snippet: "Was this you?".into(),
        links: vec![
            ExtractedLink::new("Yes, it's me", "https://account.example.com/verify?token=abc"),
            ExtractedLink::new("", "https://account.example.com/deny"),
            ExtractedLink::new("Help", "https://help.example.com"),
        ],
    };
    let old = MailRecord {
        id: "3".into(),
        raw_date: "Wed, 20 Dec 2023 08:00:00 +0900".into(),
        timestamp: earlier,
        sender: "news@example.com".into(),
        subject: "Monthly digest".into(),
        snippet: "Old news".into(),
        links: Vec::new(),
    };

    let quick_links = verify
        .links
        .iter()
        .map(|link| QuickLink {
            label: if link.text.is_empty() {
                crate::model::NO_TEXT_LABEL.into()
            } else {
                link.text.clone()
            },
            href: link.href.clone(),
            subject: verify.subject.clone(),
            timestamp: today,
            is_today: true,
        })
        .collect();

    ScanReport {
        records: vec![
            RecordView {
                record: verify,
                is_today: true,
            },
            RecordView {
                record: old,
                is_today: false,
            },
        ],
        quick_links,
    }
}

/// An App that has just received `sample_report()`.
pub fn app_with_report() -> App {
    let mut app = App::new(None, &UiConfig::default());
    app.apply_result(Ok(sample_report()));
    app
}
