//! Logging setup utilities for the Coderoom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the calling package and the binary are enabled at `default_log_level`.
/// The filter can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `package_name` - The calling package (e.g., `env!("CARGO_PKG_NAME")`)
/// * `binary_name` - The name of the binary (e.g., "coderoom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use coderoom_shared::logger::setup_logger;
///
/// setup_logger(env!("CARGO_PKG_NAME"), "coderoom-server", "debug");
/// ```
pub fn setup_logger(package_name: &str, binary_name: &str, default_log_level: &str) {
    let (filter, source) = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, "RUST_LOG"),
        Err(_) => (
            default_filter(package_name, binary_name, default_log_level).into(),
            "default",
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Logger initialized for '{}' ({} filter)", binary_name, source);
}

/// Build the `EnvFilter` directive used when `RUST_LOG` is unset.
fn default_filter(package_name: &str, binary_name: &str, level: &str) -> String {
    format!(
        "{}={},{}={},coderoom_shared={}",
        package_name.replace('-', "_"),
        level,
        binary_name.replace('-', "_"),
        level,
        level
    )
}
