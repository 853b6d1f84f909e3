//! Logging setup utilities for the NoteHub chat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter enables `default_log_level` for the calling crate and
/// the binary. It can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The library crate of the binary (e.g., "notehub_chat_server")
/// * `binary_name` - The name of the binary (e.g., "notehub-chat-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use notehub_chat_shared::logger::setup_logger;
///
/// setup_logger("notehub_chat_server", "notehub-chat-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Target names use underscores, so dashes in the names are replaced.
/// A binary named like its crate gets a single directive.
fn default_filter(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    let crate_target = crate_name.replace('-', "_");
    let binary_target = binary_name.replace('-', "_");

    let mut directives = vec![format!("{}={}", crate_target, default_log_level)];
    if binary_target != crate_target {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }
    directives.push(format!("tower_http={}", default_log_level));
    directives.join(",")
}
