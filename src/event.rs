use crossterm::event::KeyEvent;

use crate::error::PilotError;
use crate::types::PullRequestRecord;

/// Everything the dashboard reacts to, delivered one at a time through a single queue
#[derive(Debug)]
pub enum Event {
    /// Redraw request from the terminal task; never reaches the state machine
    Render,
    Key(KeyEvent),
    DataArrived(Vec<PullRequestRecord>),
    FetchFailed(PilotError),
    RefreshTick,
    /// Failure of a best-effort side effect (browser, clipboard)
    ExternalError(PilotError),
}
