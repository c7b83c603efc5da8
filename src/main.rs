mod app;
mod auth;
mod command;
mod config;
mod desktop;
mod error;
mod event;
mod format;
mod github;
mod logging;
mod runtime;
mod scheduler;
mod source;
mod tui;
mod types;
mod ui;

use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::error::PilotError;
use crate::event::Event;
use crate::github::GitHub;
use crate::runtime::Runtime;
use crate::scheduler::FetchScheduler;
use crate::source::ConfigFile;
use crate::tui::EventHandler;

#[derive(Parser, Debug)]
#[command(name = "pr-pilot", version, about = "Auto-refreshing dashboard of open pull requests")]
struct Cli {
    /// Config file (default: $PR_PILOT_CONFIG or ~/.config/pr-pilot/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (default: <cache dir>/pr-pilot/pr-pilot.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    // Resolve everything that can fail before touching the terminal
    let config_path = cli
        .config
        .or_else(config::default_config_path)
        .ok_or_else(|| PilotError::Config("could not determine config directory".to_string()))?;
    let config = Config::load(&config_path)?;
    let token = auth::load_token(&config.auth)?;
    let github = GitHub::new(token)?;
    info!(path = %config_path.display(), repos = config.repos.len(), "starting");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(ConfigFile::new(config_path), github).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(resolver: ConfigFile, github: GitHub) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    // Single queue: input, render ticks, fetch results and timer ticks
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let scheduler = FetchScheduler::new(Arc::new(resolver), Arc::new(github), event_tx.clone());
    let mut runtime = Runtime::new(scheduler, event_tx.clone());
    let _events = EventHandler::new(event_tx, Duration::from_millis(16));

    let mut app = App::new();
    if runtime.execute(app.init()).is_break() {
        return Ok(());
    }

    while let Some(event) = event_rx.recv().await {
        if let Event::Render = event {
            terminal.draw(|frame| ui::render(frame, &app))?;
            continue;
        }

        let commands = app.handle_event(event);
        if runtime.execute(commands).is_break() || app.is_terminated() {
            break;
        }
    }

    Ok(())
}
