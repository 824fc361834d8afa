use crate::config::toml_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise our own crate logs at `level` (debug when verbose)
/// and everything else stays at info.
fn directive(level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { level };
    format!("info,notebook_users={}", level)
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

fn init_compact_logger(directive: &str) {
    tracing_subscriber::registry()
        .with(env_filter(directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_cli_logger(verbose: bool) {
    init_compact_logger(&directive("info", verbose));
}

pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(&directive(level, false)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .json()
                .with_current_span(true),
        )
        .init();
}

/// 依照設定檔選擇日誌格式；`--verbose` 永遠優先於設定檔的 level
pub fn init_logger(config: &LoggingConfig, verbose: bool) {
    match config.format {
        LogFormat::Json if verbose => init_json_logger("debug"),
        LogFormat::Json => init_json_logger(&config.level),
        LogFormat::Compact => init_compact_logger(&directive(&config.level, verbose)),
    }
}
