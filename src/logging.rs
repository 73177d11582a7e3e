//! Logging - stderr subscriber for embedders that have none of their own
//!
//! The library only emits `tracing` events (ledger changes, rehydration,
//! relay failures). Applications that already install a subscriber never
//! need this module.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `RUST_LOG` | filter directives, default `warn,relaywallet=info` |
//! | `RELAYWALLET_LOG_JSON=1` | JSON lines instead of compact text |

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_JSON_ENV: &str = "RELAYWALLET_LOG_JSON";

// HTTP stack stays at warn; the crate's own events at info.
const DEFAULT_DIRECTIVES: &str = "warn,relaywallet=info";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(LOG_JSON_ENV).ok().as_deref())
    }

    fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("1") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Install a subscriber in the format chosen by the environment.
pub fn init_logging() {
    init_logging_with(LogFormat::from_env());
}

/// Install a subscriber. A second call, or a subscriber installed elsewhere, is a no-op.
pub fn init_logging_with(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
