//! Logging setup.
//!
//! Backend logging goes through the `log` facade with `env_logger`
//! underneath. `RUST_LOG` overrides the default `info` filter, e.g.
//! `RUST_LOG=host_overlay_lib=trace` to see per-frame output.

use env_logger::{Builder, Env};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the logging system. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging() {
    let result = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_target(false)
        .try_init();

    if result.is_ok() {
        log::debug!("[logging] Logging system initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging();
        init_logging();
        log::info!("[logging] still usable after repeated init");
    }
}
