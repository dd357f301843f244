//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor an explicit filter is given.
pub const DEFAULT_FILTER: &str = "info,corbel_ui=debug";

/// Logging options.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Env-filter directive string, e.g. `"warn,corbel_ui=trace"`.
    pub filter: Option<String>,
    /// Include the target module in each line.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: None,
            with_target: true,
        }
    }
}

/// Install the global subscriber, reading `RUST_LOG` when set.
pub fn init() {
    init_with(&LogConfig::default());
}

/// Install the global subscriber with explicit options.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with(config: &LogConfig) {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
