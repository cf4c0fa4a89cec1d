//! Overlay configuration management.
//!
//! - `OverlayConfig`: viewport, window class, shader source and frame
//!   settings, loaded once at startup and passed by reference.
//!
//! Nothing here is ever written back to disk.

pub mod overlay;

pub use overlay::{OverlayConfig, MAX_VIEWPORT_DIM};
