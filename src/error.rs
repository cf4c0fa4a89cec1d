//! Central error types for the overlay.
//!
//! Every fallible startup step (host lookup, surface creation, device and
//! swapchain creation, shader compilation, buffer creation) reports one of
//! these. None of them are retried: the caller treats any error as fatal.

use thiserror::Error;

/// Main error type for overlay operations.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Host handle does not name a live window
    #[error("Host window {handle} is not a live window")]
    InvalidHostWindow { handle: i64 },

    /// Host bounds could not be read
    #[error("Failed to read bounds of host window {handle}")]
    HostBounds { handle: i64 },

    /// Window class registration failed
    #[error("Window class error: {0}")]
    WindowClass(String),

    /// Overlay surface creation or setup failed
    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),

    /// D3D11 device/context creation failed
    #[error("Device creation failed: {0}")]
    DeviceCreation(String),

    /// DXGI swapchain or back buffer failed
    #[error("Swapchain error: {0}")]
    SwapChain(String),

    /// Render-target view creation failed
    #[error("Render target error: {0}")]
    RenderTarget(String),

    /// HLSL compilation failed
    #[error("Shader compilation failed for {entry_point} ({target}): {message}")]
    ShaderCompile {
        entry_point: String,
        target: String,
        message: String,
    },

    /// Shader object creation from bytecode failed
    #[error("Shader creation failed: {0}")]
    ShaderCreation(String),

    /// Input layout creation failed
    #[error("Input layout error: {0}")]
    InputLayout(String),

    /// Vertex or uniform buffer creation failed
    #[error("Buffer creation failed: {0}")]
    BufferCreation(String),

    /// Present reported a lost device
    #[error("Present failed: {0}")]
    Present(String),

    /// Config file was unreadable or invalid
    #[error("Config error: {0}")]
    Config(String),

    /// This build has no overlay backend
    #[error("Overlay rendering requires Windows")]
    UnsupportedPlatform,

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extension trait for adding context to Results.
///
/// # Example
/// ```ignore
/// use crate::error::{OverlayError, ResultExt};
///
/// unsafe { device.CreateBuffer(&desc, Some(&data), Some(&mut buffer)) }
///     .context_as(OverlayError::BufferCreation, "vertex buffer")?;
/// ```
pub trait ResultExt<T> {
    /// Add context and wrap the message in a specific variant.
    fn context_as(self, variant: fn(String) -> OverlayError, msg: &str) -> OverlayResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context_as(self, variant: fn(String) -> OverlayError, msg: &str) -> OverlayResult<T> {
        self.map_err(|e| variant(format!("{}: {}", msg, e)))
    }
}

/// Extension trait for adding context to Option types.
///
/// D3D11 creation calls hand back `Option` out-parameters that can stay
/// `None` even on a success HRESULT.
pub trait OptionExt<T> {
    /// Convert None to a specific variant carrying the message.
    fn context_as(self, variant: fn(String) -> OverlayError, msg: &str) -> OverlayResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context_as(self, variant: fn(String) -> OverlayError, msg: &str) -> OverlayResult<T> {
        self.ok_or_else(|| variant(msg.to_string()))
    }
}

/// Type alias for Results using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;
