use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::event::Event;
use crate::source::{PullRequestSource, RepoResolver};

/// Delay between refresh cycles
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Turns fetches and the refresh timer into events on the dashboard queue.
///
/// At most one fetch and one timer are outstanding at any time.
pub struct FetchScheduler {
    resolver: Arc<dyn RepoResolver>,
    source: Arc<dyn PullRequestSource>,
    event_tx: mpsc::UnboundedSender<Event>,
    fetch: Option<JoinHandle<()>>,
    timer: Option<JoinHandle<()>>,
}

impl FetchScheduler {
    pub fn new(
        resolver: Arc<dyn RepoResolver>,
        source: Arc<dyn PullRequestSource>,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            resolver,
            source,
            event_tx,
            fetch: None,
            timer: None,
        }
    }

    /// Start a fetch in the background. Dropped if one is still running.
    pub fn trigger_fetch(&mut self) {
        if self.fetch.as_ref().is_some_and(|task| !task.is_finished()) {
            debug!("fetch already in flight, skipping");
            return;
        }

        let tx = self.event_tx.clone();
        let resolver = Arc::clone(&self.resolver);
        let source = Arc::clone(&self.source);
        self.fetch = Some(tokio::spawn(async move {
            let event = fetch_once(resolver.as_ref(), source.as_ref()).await;
            tx.send(event).ok();
        }));
    }

    /// Emit a single `RefreshTick` after `delay`, replacing any pending timer
    pub fn arm_timer(&mut self, delay: Duration) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let tx = self.event_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(Event::RefreshTick).ok();
        }));
    }
}

impl Drop for FetchScheduler {
    fn drop(&mut self) {
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// One fetch cycle: resolve repositories, then list their open pull requests
pub async fn fetch_once(resolver: &dyn RepoResolver, source: &dyn PullRequestSource) -> Event {
    let repos = match resolver.resolve_repos() {
        Ok(repos) => repos,
        Err(e) => {
            debug!(error = %e, "could not resolve repositories");
            return Event::FetchFailed(e);
        }
    };

    match source.fetch_open_pull_requests(&repos).await {
        Ok(prs) => {
            info!(repos = repos.len(), prs = prs.len(), "refresh complete");
            Event::DataArrived(prs)
        }
        Err(e) => {
            debug!(error = %e, "refresh failed");
            Event::FetchFailed(e)
        }
    }
}
