//! Logging Infrastructure
//!
//! `tracing` subscriber setup for front ends embedding the client and for
//! the `agenda` binary. Output goes to stderr so stdout stays free for data.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Initialize the global subscriber
///
/// # Arguments
/// * `level` - Log level or filter directive (e.g., "info", "agenda_client=debug")
/// * `json_format` - JSON lines instead of the human readable format
///
/// `RUST_LOG` overrides `level` when set. Fails if a global subscriber is
/// already installed.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // the first call may lose the race with another test's subscriber
        let _ = init_logger("debug", false);
        assert!(init_logger("info", true).is_err());
    }
}
