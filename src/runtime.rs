use std::ops::ControlFlow;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::command::Command;
use crate::desktop;
use crate::error::Result;
use crate::event::Event;
use crate::scheduler::FetchScheduler;

/// Executes the commands the dashboard returns
pub struct Runtime {
    scheduler: FetchScheduler,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl Runtime {
    pub fn new(scheduler: FetchScheduler, event_tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            scheduler,
            event_tx,
        }
    }

    /// Run a batch in order. Breaks on `Terminate`; later commands are dropped.
    pub fn execute(&mut self, commands: Vec<Command>) -> ControlFlow<()> {
        for command in commands {
            debug!(?command, "executing");
            match command {
                Command::FetchNow => self.scheduler.trigger_fetch(),
                Command::ArmTimer(delay) => self.scheduler.arm_timer(delay),
                Command::OpenUrl(url) => {
                    info!(%url, "opening in browser");
                    self.spawn_best_effort(move || desktop::open_in_browser(&url));
                }
                Command::CopyUrl(url) => {
                    self.spawn_best_effort(move || desktop::copy_to_clipboard(&url));
                }
                Command::Terminate => return ControlFlow::Break(()),
            }
        }
        ControlFlow::Continue(())
    }

    /// Run a blocking desktop call off the loop; failures come back as `ExternalError`
    fn spawn_best_effort<F>(&self, f: F)
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let tx = self.event_tx.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = f() {
                tx.send(Event::ExternalError(e)).ok();
            }
        });
    }
}
