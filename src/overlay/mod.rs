//! Overlay renderer attached to a foreign host window.
//!
//! Startup runs strictly in order, and any failure aborts it:
//! 1. Validate the host handle
//! 2. Patch the host's child windows so they clip siblings
//! 3. Create the overlay surface as a centered child of the host
//! 4. Create the D3D11 device, swap chain, render target and viewport
//! 5. Compile shaders and create the input layout and buffers
//!
//! The frame loop then runs until the overlay receives `WM_DESTROY`, which
//! normally happens when the host closes.

pub mod frame_loop;
pub mod patcher;
pub mod surface;
pub mod types;

#[cfg(windows)]
pub mod graphics;
#[cfg(windows)]
mod wndproc;


pub use frame_loop::{FrameLoop, FrameRenderer, MessagePump};
pub use patcher::{patch_host, PatchReport};
pub use surface::overlay_rect;
pub use types::{FrameUniform, LoopState, PumpStatus, Vertex};

#[cfg(windows)]
pub use platform::run;

#[cfg(windows)]
mod platform {
    use host_window::{DesktopTree, HostWindow, WindowId};

    use super::frame_loop::{FrameLoop, Win32MessagePump};
    use super::graphics::GraphicsContext;
    use super::patcher::patch_host;
    use super::surface::{create_overlay_surface, register_overlay_class};
    use crate::config::OverlayConfig;
    use crate::error::{OverlayError, OverlayResult};

    /// Attach to `host_id` and render until the overlay is destroyed.
    /// Returns the number of frames rendered.
    pub fn run(host_id: WindowId, config: &OverlayConfig) -> OverlayResult<u64> {
        let host = HostWindow::from_id(&host_id);

        if config.validate_host && !host.is_alive() {
            return Err(OverlayError::InvalidHostWindow {
                handle: host_id.raw(),
            });
        }

        if patch_host(&DesktopTree, host, &config.host_surface_marker).is_noop() {
            log::debug!("[overlay] Host {} needed no style changes", host_id);
        }

        register_overlay_class(&config.window_class_name)?;
        let surface = create_overlay_surface(&host, config)?;

        let mut gfx = GraphicsContext::new(&surface, config)?;
        let mut pump = Win32MessagePump;

        let frames = FrameLoop::new(config.time_step).run(&mut pump, &mut gfx)?;
        log::info!("[overlay] Render loop finished after {} frames", frames);
        Ok(frames)
    }
}
