//! Log output for the imgwarm binary
//!
//! The library only emits `tracing` events; the binary installs a stderr
//! subscriber here. `IMGWARM_LOG` takes `EnvFilter` syntax and wins over
//! the `-v` count.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "IMGWARM_LOG";

/// Filter used when `IMGWARM_LOG` is unset.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "imgwarm=debug",
        _ => "imgwarm=trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
