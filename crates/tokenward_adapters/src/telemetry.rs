use std::path::PathBuf;

use directories::ProjectDirs;
use tokenward_core::events::{AuthEvent, Severity};
use tokenward_core::ports::AuthEventSink;
use tokenward_core::Error;
use tracing::subscriber::set_global_default;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Install the global subscriber: console output plus a daily log file.
///
/// `RUST_LOG` wins over `env_filter`. The returned guard flushes the file
/// writer and must be held for the lifetime of the application.
pub fn init_subscriber(name: &str, env_filter: &str) -> Result<WorkerGuard, Error> {
    LogTracer::init()
        .map_err(|e| Error::Other(format!("failed to initialize log tracer bridge: {}", e)))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let formatting_layer = fmt::layer().with_target(false).pretty();

    let file_appender = tracing_appender::rolling::daily(log_dir(), format!("{}.log", name));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(formatting_layer)
        .with(file_layer);

    set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("failed to set global tracing subscriber: {}", e)))?;

    Ok(guard)
}

fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "tokenward", "tokenward")
        .map(|d| d.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Renders auth events as `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl AuthEventSink for TracingEventSink {
    fn record(&self, event: &AuthEvent) {
        let name = event.name();
        match event.severity() {
            Severity::Debug => debug!(event = name, "{}", event),
            Severity::Info => info!(event = name, "{}", event),
            Severity::Warning => warn!(event = name, "{}", event),
            Severity::Error => error!(event = name, "{}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sink_accepts_every_severity() {
        // No subscriber installed: events are dropped, recording must not panic
        let sink = TracingEventSink;
        sink.record(&AuthEvent::ProfileFetchSkipped);
        sink.record(&AuthEvent::LoginSucceeded);
        sink.record(&AuthEvent::ProfileRejected);
        sink.record(&AuthEvent::LogoutRequestFailed {
            error: "network error: connection refused".to_string(),
        });
    }

    // This test must be run with --test-threads=1 to prevent conflicts with other tests
    // that might also try to initialize a global subscriber.
    #[test]
    fn test_init_subscriber() {
        // We only expect this to succeed and return a guard that flushes on drop.
        let _guard = init_subscriber("test_app", "info").unwrap();
    }
}
