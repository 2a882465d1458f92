use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};

/// Keys while the password field has focus. Printable characters are
/// typed, so only Esc quits from here.
pub(super) fn handle_password(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.request_scan(),
        KeyCode::Tab | KeyCode::BackTab => app.focus = Focus::Results,
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Backspace => {
            app.password_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.password_input.clear();
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.password_input.push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UiConfig;
    use crate::tui::app::Status;
    use crate::tui::input::handle_key;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_edits_the_field() {
        let mut app = App::new(None, &UiConfig::default());
        type_str(&mut app, "qwerty");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.password_input, "qwert");
        assert!(!app.should_quit);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.password_input, "");
    }

    #[test]
    fn shifted_characters_are_typed() {
        let mut app = App::new(None, &UiConfig::default());
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT));
        assert_eq!(app.password_input, "P");
    }

    #[test]
    fn enter_requests_a_run() {
        let mut app = App::new(None, &UiConfig::default());
        type_str(&mut app, "key");
        press(&mut app, KeyCode::Enter);
        assert!(app.pending_scan);
        assert_eq!(app.status, Status::Fetching);

        // further keys wait for the run
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.password_input, "key");
    }

    #[test]
    fn tab_and_esc() {
        let mut app = App::new(None, &UiConfig::default());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Results);

        let mut app = App::new(None, &UiConfig::default());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
