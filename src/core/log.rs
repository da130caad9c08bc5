use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Maps the number of `-v` flags to a level for the `patrimoine` target.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Directives from `rust_log` when present and valid, otherwise the
/// `patrimoine` target at the level given by `verbosity`.
pub fn filter_for(verbosity: u8, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            let level = level_for(verbosity).to_string().to_lowercase();
            EnvFilter::new(format!("patrimoine={level}"))
        })
}

/// Installs the global subscriber. Logs go to stderr so that tables printed
/// on stdout stay clean. `RUST_LOG` takes precedence over `verbosity`.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter_for(verbosity, rust_log.as_deref()))
        .try_init()
        .context("Failed to install the log subscriber")
}
