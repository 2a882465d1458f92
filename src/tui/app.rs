use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::load_config;
use crate::model::{MAX_DETAIL_LINKS, ScanReport, UiConfig};
use crate::ops::{ScanError, run_scan_now};

use super::input;
use super::render;
use super::theme::Theme;

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Password,
    Results,
}

/// Outcome line shown above the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing has run yet
    Idle,
    Fetching,
    Success(String),
    Error(String),
}

/// A selectable row in the results pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatItem {
    QuickLink(usize),
    Message(usize),
    /// A link listed under an expanded message
    MessageLink { record: usize, link: usize },
}

/// Main application state
pub struct App {
    /// Re-read on every run
    pub config_path: Option<PathBuf>,
    pub theme: Theme,
    pub focus: Focus,
    pub password_input: String,
    pub status: Status,
    pub report: Option<ScanReport>,
    /// Index into `build_flat_items()`
    pub cursor: usize,
    /// First visible row of the results pane
    pub scroll_offset: usize,
    /// Ids of expanded messages
    pub expanded: HashSet<String>,
    /// Set when a run was requested; the event loop runs it after the next draw
    pub pending_scan: bool,
    /// Link waiting to be handed to the system browser
    pub pending_open: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config_path: Option<PathBuf>, ui: &UiConfig) -> Self {
        App {
            config_path,
            theme: Theme::from_config(ui),
            focus: Focus::Password,
            password_input: String::new(),
            status: Status::Idle,
            report: None,
            cursor: 0,
            scroll_offset: 0,
            expanded: HashSet::new(),
            pending_scan: false,
            pending_open: None,
            should_quit: false,
        }
    }

    /// Selectable rows in display order: quick links, then each message
    /// followed by its links when expanded. Nothing is listed when the run
    /// produced no links at all.
    pub fn build_flat_items(&self) -> Vec<FlatItem> {
        let Some(report) = &self.report else {
            return Vec::new();
        };
        if report.quick_links.is_empty() {
            return Vec::new();
        }

        let mut items: Vec<FlatItem> = (0..report.quick_links.len())
            .map(FlatItem::QuickLink)
            .collect();
        for (i, view) in report.records.iter().enumerate() {
            items.push(FlatItem::Message(i));
            if self.expanded.contains(&view.record.id) {
                let shown = view.record.links.len().min(MAX_DETAIL_LINKS);
                items.extend((0..shown).map(|link| FlatItem::MessageLink { record: i, link }));
            }
        }
        items
    }

    pub fn selected_item(&self) -> Option<FlatItem> {
        self.build_flat_items().get(self.cursor).copied()
    }

    /// Target of the selected row, if it is a link
    pub fn selected_href(&self) -> Option<&str> {
        let report = self.report.as_ref()?;
        match self.selected_item()? {
            FlatItem::QuickLink(i) => report.quick_links.get(i).map(|q| q.href.as_str()),
            FlatItem::MessageLink { record, link } => report
                .records
                .get(record)?
                .record
                .links
                .get(link)
                .map(|l| l.href.as_str()),
            FlatItem::Message(_) => None,
        }
    }

    /// Expand or collapse the selected message
    pub fn toggle_selected(&mut self) {
        let Some(FlatItem::Message(i)) = self.selected_item() else {
            return;
        };
        let Some(id) = self
            .report
            .as_ref()
            .and_then(|r| r.records.get(i))
            .map(|v| v.record.id.clone())
        else {
            return;
        };
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        self.clamp_cursor();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.build_flat_items().len();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.build_flat_items().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    /// Ask for a run; the "Fetching emails..." status is drawn before it starts
    pub fn request_scan(&mut self) {
        self.status = Status::Fetching;
        self.pending_scan = true;
    }

    /// Run the pending scan, if any, with the entered password
    pub fn run_pending_scan<F>(&mut self, scan: F)
    where
        F: FnOnce(Option<&Path>, &str) -> Result<ScanReport, ScanError>,
    {
        if !self.pending_scan {
            return;
        }
        self.pending_scan = false;
        let result = scan(self.config_path.as_deref(), &self.password_input);
        self.apply_result(result);
    }

    /// Replace the results with a fresh run's outcome. Messages from today
    /// start expanded.
    pub fn apply_result(&mut self, result: Result<ScanReport, ScanError>) {
        self.cursor = 0;
        self.scroll_offset = 0;
        match result {
            Ok(report) => {
                self.expanded = report
                    .records
                    .iter()
                    .filter(|v| v.is_today)
                    .map(|v| v.record.id.clone())
                    .collect();
                self.status = Status::Success(report.summary());
                if !report.quick_links.is_empty() {
                    self.focus = Focus::Results;
                }
                self.report = Some(report);
            }
            Err(e) => {
                log::warn!("scan failed: {}", e);
                self.status = Status::Error(e.to_string());
                self.report = None;
                self.expanded.clear();
            }
        }
    }
}

/// Load the config fresh and run one scan with the entered password
pub fn scan_from_config(config_path: Option<&Path>, entered: &str) -> Result<ScanReport, ScanError> {
    let config = load_config(config_path)?;
    run_scan_now(&config, entered)
}

/// Run the TUI application
pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    // Only the theme is taken now; the rest is re-read on each run
    let ui = match load_config(config_path) {
        Ok(config) => config.ui,
        Err(e) => {
            log::warn!("starting with default theme: {}", e);
            UiConfig::default()
        }
    };
    let mut app = App::new(config_path.map(Path::to_path_buf), &ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // The fetching status is on screen now; block on the run
        if app.pending_scan {
            app.run_pending_scan(scan_from_config);
            continue;
        }

        if let Some(href) = app.pending_open.take()
            && let Err(e) = open::that_detached(&href)
        {
            log::warn!("could not open {}: {}", href, e);
            app.status = Status::Error(format!("could not open {}: {}", href, e));
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
