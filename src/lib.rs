//! Host overlay library.
//!
//! Attaches a Direct3D 11 surface to a window owned by another process and
//! renders into it until that window goes away.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod overlay;

pub use cli::Cli;
pub use config::OverlayConfig;
pub use error::{OverlayError, OverlayResult};

/// Load configuration and run the overlay for the host named on the
/// command line. Returns the number of frames rendered.
pub fn run(cli: &Cli) -> OverlayResult<u64> {
    let config = OverlayConfig::load(cli.config.as_deref())?;
    log::info!(
        "[main] Attaching to host {} ({}x{} viewport)",
        cli.hwnd,
        config.viewport_width,
        config.viewport_height
    );

    #[cfg(windows)]
    {
        overlay::run(cli.hwnd, &config)
    }

    #[cfg(not(windows))]
    {
        Err(OverlayError::UnsupportedPlatform)
    }
}
