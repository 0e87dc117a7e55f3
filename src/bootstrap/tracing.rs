//! Tracing configuration for GameOn
//!
//! ## Architecture / 架构
//!
//! - **Console**: human-readable lines on stderr, so the shell's own output
//!   on stdout stays clean
//! - **File**: the same format without ANSI colors, appended to
//!   `<data>/logs/gameon.log` through a non-blocking writer
//! - **Environment-aware**: debug builds log at debug, release builds at info;
//!   `RUST_LOG` overrides both

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

pub const LOG_FILE_NAME: &str = "gameon.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the workspace crates
/// - **Production**: info level everywhere
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    let mut directives = vec![if is_dev { "info" } else { "warn" }.to_string()];
    directives.extend(
        [
            "gameon",
            "gameon_lib",
            "gameon_app",
            "gameon_infra",
            "gameon_platform",
        ]
        .iter()
        .map(|target| format!("{target}={level}")),
    );
    directives
}

/// Initialize the tracing subscriber.
///
/// When `logs_dir` is given, a file layer is added; if the directory cannot
/// be created the console layer keeps working alone.
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(logs_dir: Option<&Path>) -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let console_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match logs_dir.map(build_file_writer).transpose() {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to console: {err}");
            None
        }
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let console_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(console_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert_eq!(dev_directives[0], "info");
        assert!(dev_directives.contains(&"gameon_app=debug".to_string()));
        assert!(dev_directives.contains(&"gameon_infra=debug".to_string()));

        let prod_directives = build_filter_directives(false);
        assert_eq!(prod_directives[0], "warn");
        assert!(prod_directives.contains(&"gameon_platform=info".to_string()));
        assert!(!prod_directives.iter().any(|d| d.ends_with("=debug")));
    }

    #[test]
    fn test_directives_parse_as_env_filter() {
        for is_dev in [true, false] {
            let joined = build_filter_directives(is_dev).join(",");
            assert!(tracing_subscriber::EnvFilter::try_new(joined).is_ok());
        }
    }
}
