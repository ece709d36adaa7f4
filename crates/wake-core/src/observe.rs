//! Structured logging setup for wakefield runs.
//!
//! The solver only emits `tracing` events; installing a subscriber is left
//! to the embedding application. [`init_logging`] is a convenience for
//! binaries, tests and benches.
//!
//! ```rust,ignore
//! use wake_core::observe::init_logging;
//! use wake_types::config::WakefieldConfig;
//!
//! let config = WakefieldConfig::from_file("configs/lwfa_linear.json")?;
//! init_logging(&config.logging);
//! tracing::info!(n_xi = config.n_xi, "run configured");
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wake_types::config::{LogConfig, LogFormat};

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the call has no effect.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init(),
    };
    result.is_ok()
}
