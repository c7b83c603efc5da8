use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `<cache_dir>/pr-pilot/pr-pilot.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("pr-pilot").join("pr-pilot.log"))
}

/// Install the global subscriber. Stderr shares the tty with the dashboard,
/// so logs go to `log_file`, else the default log path, else nowhere.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let path = log_file.map(Path::to_path_buf).or_else(default_log_path);
    let layer = fmt::layer().with_ansi(false);

    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(layer.with_writer(Mutex::new(file)))
                .init();
        }
        None => tracing_subscriber::registry()
            .with(env_filter())
            .with(layer.with_writer(io::sink))
            .init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::app::App;
    use crate::error::{PilotError, Result};
    use crate::event::Event;
    use crate::scheduler::fetch_once;
    use crate::source::{PullRequestSource, RepoResolver};
    use crate::types::fixtures::record;
    use crate::types::PullRequestRecord;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct OneRepo;

    impl RepoResolver for OneRepo {
        fn resolve_repos(&self) -> Result<Vec<String>> {
            Ok(vec!["acme/widgets".to_string()])
        }
    }

    struct BadGateway;

    #[async_trait]
    impl PullRequestSource for BadGateway {
        async fn fetch_open_pull_requests(&self, _repos: &[String]) -> Result<Vec<PullRequestRecord>> {
            Err(PilotError::Fetch("502 Bad Gateway".to_string()))
        }
    }

    #[test]
    fn default_log_file_lives_in_cache_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("pr-pilot/pr-pilot.log"));
        }
    }

    #[tokio::test]
    async fn failed_refresh_is_silent_at_default_filter() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(DEFAULT_FILTER))
            .with(fmt::layer().with_ansi(false).with_writer(move || writer.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut app = App::new();
        app.handle_event(Event::DataArrived(vec![record("acme/widgets", 1)]));

        let event = fetch_once(&OneRepo, &BadGateway).await;
        assert!(matches!(event, Event::FetchFailed(_)));
        app.handle_event(event);
        app.handle_event(Event::ExternalError(PilotError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "xdg-open",
        ))));

        assert_eq!(captured.contents(), "");
        assert_eq!(app.prs.len(), 1);

        tracing::error!("capture check");
        assert!(captured.contents().contains("capture check"));
    }
}
