use std::time::Duration;

/// Side effects requested by the dashboard. The runtime executes them;
/// the dashboard only declares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchNow,
    ArmTimer(Duration),
    OpenUrl(String),
    CopyUrl(String),
    Terminate,
}
