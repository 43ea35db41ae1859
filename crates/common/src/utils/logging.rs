use std::io;

use configs::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,sea_orm=warn,sqlx=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global tracing subscriber on stdout.
/// - Respects `RUST_LOG` if set, otherwise [`DEFAULT_FILTER`]
/// - `Compact` for humans, `Json` for log shippers
/// - Safe to call more than once; later calls are ignored
pub fn init_logging(format: LogFormat) {
    let builder = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub fn init_logging_default() {
    init_logging(LogFormat::Compact);
}
