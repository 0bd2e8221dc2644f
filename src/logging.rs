use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ClientConfig;

const DEFAULT_FILTER: &str = "discussion_client=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// When `log_dir` is configured, output goes to a daily-rolling file and the
/// returned guard must be held to flush it. Calling this twice is harmless;
/// the second install is ignored.
pub fn init_tracing(config: &ClientConfig) -> Option<WorkerGuard> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "discussion-client.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = fmt()
                .with_env_filter(filter())
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = fmt().with_env_filter(filter()).with_target(true).try_init();
            None
        }
    }
}
