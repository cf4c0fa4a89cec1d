//! Command line surface.

use std::path::PathBuf;

use clap::Parser;
use host_window::WindowId;

/// One-line usage printed when the host handle is missing or malformed.
pub const USAGE: &str = "usage: host-overlay <HWND> [--config <PATH>]";

/// Render an overlay into a host window owned by another process.
#[derive(Parser, Debug, Clone)]
#[command(name = "host-overlay", version, about)]
pub struct Cli {
    /// Host window handle, as a base-10 integer
    #[arg(value_name = "HWND", allow_negative_numbers = true)]
    pub hwnd: WindowId,

    /// JSON config file overriding the built-in defaults
    #[arg(long, value_name = "PATH", env = "HOST_OVERLAY_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_handle() {
        let cli = Cli::try_parse_from(["host-overlay", "657234"]).unwrap();
        assert_eq!(cli.hwnd.raw(), 657234);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_negative_handle() {
        let cli = Cli::try_parse_from(["host-overlay", "-5000"]).unwrap();
        assert_eq!(cli.hwnd.raw(), -5000);
    }

    #[test]
    fn parses_config_flag() {
        let cli =
            Cli::try_parse_from(["host-overlay", "42", "--config", "overlay.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("overlay.json")));
    }

    #[test]
    fn missing_handle_is_an_error() {
        let err = Cli::try_parse_from(["host-overlay"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn non_decimal_handle_is_an_error() {
        let err = Cli::try_parse_from(["host-overlay", "0x2A"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
