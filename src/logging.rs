use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// via the settings file, in which case `RUST_LOG` may override the level.
///
/// When `log_file` is set, output goes to that file instead of stderr.
/// Calling this more than once keeps the first subscriber.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // The environment is only read in debug mode.
    let env = if debug {
        std::env::var(EnvFilter::DEFAULT_ENV).ok()
    } else {
        None
    };
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_new(filter_directives(debug, env))
        .unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .map(|n| n.to_owned())
                .unwrap_or_else(|| "note_overlay.log".into());
            let appender = tracing_appender::rolling::never(dir, name);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(appender)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }
    }
}

/// Filter directives for the subscriber. Without debug logging `info` is
/// forced so a stray `RUST_LOG` doesn't turn on verbose output.
fn filter_directives(debug: bool, env: Option<String>) -> String {
    match (debug, env) {
        (true, Some(directives)) if !directives.trim().is_empty() => directives,
        (true, _) => "debug".into(),
        (false, _) => "info".into(),
    }
}
