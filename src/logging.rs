//! Tracing setup for the binary.
//!
//! The library only emits `tracing` events; this picks the filter and
//! installs a stderr subscriber so stdout stays clean for reports.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_ENV: &str = "SWIMTALLY_LOG";

/// Pick the filter directive.
///
/// `-v` flags win over `SWIMTALLY_LOG`, which wins over the config level.
pub fn filter_directive(verbose: u8, env: Option<&str>, config_level: &str) -> String {
    match verbose {
        0 => match env.map(str::trim).filter(|s| !s.is_empty()) {
            Some(directive) => directive.to_string(),
            None => config_level.to_string(),
        },
        1 => "swimtally=debug".to_string(),
        _ => "swimtally=trace".to_string(),
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: u8, config_level: &str) {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(verbose, env.as_deref(), config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
