mod navigate;
mod password;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

use navigate::handle_navigate;
use password::handle_password;

/// Handle a key event for the focused pane
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // No input while a run is waiting to start
    if app.pending_scan {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.focus {
        Focus::Password => handle_password(app, key),
        Focus::Results => handle_navigate(app, key),
    }
}
