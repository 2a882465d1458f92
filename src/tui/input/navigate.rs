use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, FlatItem, Focus};

/// Keys while the results pane has focus
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab => app.focus = Focus::Password,
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),
        // Same password, fresh run
        KeyCode::Char('r') => app.request_scan(),
        KeyCode::Char('o') => open_selected(app),
        KeyCode::Enter | KeyCode::Char(' ') => match app.selected_item() {
            Some(FlatItem::Message(_)) => app.toggle_selected(),
            Some(_) => open_selected(app),
            None => {}
        },
        _ => {}
    }
}

fn open_selected(app: &mut App) {
    if let Some(href) = app.selected_href().map(str::to_string) {
        app.pending_open = Some(href);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use crate::model::{ExtractedLink, MailRecord, QuickLink, RecordView, ScanReport, UiConfig};
    use crate::tui::input::handle_key;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn loaded_app() -> App {
        let record = MailRecord {
            id: "7".into(),
            raw_date: "Tue, 2 Jan 2024 10:00:00 +0000".into(),
            timestamp: None,
            sender: "info@example.com".into(),
            subject: "Confirm your sign-in".into(),
            snippet: "Was this you?".into(),
            links: vec![ExtractedLink::new("Yes, it's me", "https://example.com/verify")],
        };
        let report = ScanReport {
            quick_links: vec![QuickLink {
                label: "Yes, it's me".into(),
                href: "https://example.com/verify".into(),
                subject: record.subject.clone(),
                timestamp: None,
                is_today: false,
            }],
            records: vec![RecordView {
                record,
                is_today: false,
            }],
        };
        let mut app = App::new(None, &UiConfig::default());
        app.apply_result(Ok(report));
        app
    }

    #[test]
    fn o_queues_the_selected_link() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.pending_open.as_deref(), Some("https://example.com/verify"));
    }

    #[test]
    fn enter_toggles_a_message() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert!(app.expanded.contains("7"));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.expanded.contains("7"));
        assert_eq!(app.pending_open, None);
    }

    #[test]
    fn o_on_a_message_does_nothing() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.pending_open, None);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn q_quits_and_tab_returns_to_password() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Password);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
