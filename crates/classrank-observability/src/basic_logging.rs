use classrank_config::LoggingConfig;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

const CRATE_TARGETS: [&str; 5] = [
    "classrank",
    "classrank_store",
    "classrank_core",
    "classrank_models",
    "classrank_observability",
];

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log directory: {0}")]
    Appender(#[from] InitError),

    #[error("logging already initialised: {0}")]
    Init(#[from] TryInitError),
}

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize console logging, plus a rolling JSON file when `log_dir` is set.
///
/// # Configuration
///
/// - **Log Level**: `RUST_LOG` if present, else `config.level` for classrank crates
/// - **Format**: Compact human-readable lines, or JSON when `config.json` is set
/// - **Files**: `<log_dir>/classrank.<date>.json` at `info` and above
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let console_layer: BoxedLayer = if config.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter)
            .boxed()
    };

    let mut layers = vec![console_layer];

    if let Some(dir) = &config.log_dir {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("classrank")
            .filename_suffix("json")
            .build(dir)?;

        let file_layer: BoxedLayer = fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(EnvFilter::new(default_directives("info")))
            .boxed();
        layers.push(file_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    tracing::debug!(
        level = %config.level,
        json = config.json,
        log_dir = ?config.log_dir,
        "Logging initialised"
    );
    Ok(())
}
