//! tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so stdout carries only the report.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const APP_NAME: &str = "reqclass";

/// Default directive when `RUST_LOG` is unset
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "reqclass_core=debug,reqclass=debug"
    } else {
        "reqclass_core=info,reqclass=info"
    }
}

/// Install the global subscriber: compact text, or Bunyan JSON lines with `json`.
pub fn init_logging(verbose: bool, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert!(default_directive(false).contains("reqclass_core=info"));
        assert!(default_directive(true).contains("reqclass_core=debug"));
    }
}
