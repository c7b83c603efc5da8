use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::command::Command;
use crate::error::PilotError;
use crate::event::Event;
use crate::format::{project_rows, TableRow};
use crate::scheduler::REFRESH_INTERVAL;
use crate::types::PullRequestRecord;

/// Rows moved by PageUp / PageDown; Ctrl+U / Ctrl+D move half as far
pub const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    ReadyWithError,
    Terminated,
}

/// Where the error in `last_error` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorOrigin {
    #[default]
    Refresh,
    External,
}

/// Dashboard state. Mutated only through [`App::handle_event`], which
/// returns the side effects the runtime should perform.
pub struct App {
    pub prs: Vec<PullRequestRecord>,
    pub rows: Vec<TableRow>,
    pub loaded: bool,
    pub last_error: Option<PilotError>,
    pub error_origin: ErrorOrigin,
    pub selected: usize,
    pub last_updated: Option<DateTime<Local>>,
    terminated: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            prs: Vec::new(),
            rows: Vec::new(),
            loaded: false,
            last_error: None,
            error_origin: ErrorOrigin::Refresh,
            selected: 0,
            last_updated: None,
            terminated: false,
        }
    }

    /// Commands that start the first refresh cycle
    pub fn init(&self) -> Vec<Command> {
        if self.terminated {
            return Vec::new();
        }
        vec![Command::FetchNow, Command::ArmTimer(REFRESH_INTERVAL)]
    }

    pub fn phase(&self) -> Phase {
        if self.terminated {
            Phase::Terminated
        } else if !self.loaded {
            Phase::Loading
        } else if self.last_error.is_some() {
            Phase::ReadyWithError
        } else {
            Phase::Ready
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn selected_pr(&self) -> Option<&PullRequestRecord> {
        self.prs.get(self.selected)
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Command> {
        if self.terminated {
            return Vec::new();
        }

        match event {
            Event::Render => Vec::new(),
            Event::Key(key) => self.handle_key(key),
            Event::DataArrived(prs) => {
                self.replace_prs(prs);
                vec![Command::ArmTimer(REFRESH_INTERVAL)]
            }
            Event::FetchFailed(err) => {
                self.last_error = Some(err);
                self.error_origin = ErrorOrigin::Refresh;
                vec![Command::ArmTimer(REFRESH_INTERVAL)]
            }
            Event::RefreshTick => vec![Command::FetchNow, Command::ArmTimer(REFRESH_INTERVAL)],
            Event::ExternalError(err) => {
                debug!(error = %err, "external command failed");
                self.last_error = Some(err);
                self.error_origin = ErrorOrigin::External;
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let interrupt =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if interrupt || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            debug!("terminating on user request");
            self.terminated = true;
            return vec![Command::Terminate];
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if control => self.select_up(PAGE_ROWS / 2),
            KeyCode::Char('d') if control => self.select_down(PAGE_ROWS / 2),
            KeyCode::Char('k') | KeyCode::Up => self.select_up(1),
            KeyCode::Char('j') | KeyCode::Down => self.select_down(1),
            KeyCode::Char('b') | KeyCode::PageUp => self.select_up(PAGE_ROWS),
            KeyCode::Char('f') | KeyCode::PageDown => self.select_down(PAGE_ROWS),
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => self.selected = self.prs.len().saturating_sub(1),
            KeyCode::Enter => {
                return self
                    .selected_url()
                    .map(|url| vec![Command::OpenUrl(url)])
                    .unwrap_or_default();
            }
            KeyCode::Char('y') => {
                return self
                    .selected_url()
                    .map(|url| vec![Command::CopyUrl(url)])
                    .unwrap_or_default();
            }
            KeyCode::Char('r') => return vec![Command::FetchNow],
            _ => {}
        }
        Vec::new()
    }

    fn select_up(&mut self, rows: usize) {
        self.selected = self.selected.saturating_sub(rows);
    }

    fn select_down(&mut self, rows: usize) {
        let last = self.prs.len().saturating_sub(1);
        self.selected = (self.selected + rows).min(last);
    }

    fn selected_url(&self) -> Option<String> {
        self.selected_pr()
            .map(|pr| pr.url.clone())
            .filter(|url| !url.is_empty())
    }

    /// Swap in a new list, keeping the cursor on the same pull request when it survives
    fn replace_prs(&mut self, prs: Vec<PullRequestRecord>) {
        let previous_key = self.selected_pr().map(|pr| pr.key.clone());

        self.rows = project_rows(&prs, Utc::now());
        self.prs = prs;
        self.loaded = true;
        self.last_error = None;
        self.last_updated = Some(Local::now());

        self.selected = previous_key
            .and_then(|key| self.prs.iter().position(|pr| pr.key == key))
            .unwrap_or_else(|| self.selected.min(self.prs.len().saturating_sub(1)));
    }
}
