//! Overlay surface creation.
//!
//! One layered, topmost, click-through child window of fixed viewport size,
//! centered on the host's bounds at creation time. It is never moved or
//! resized afterwards.

use host_window::bounds::{PhysicalBounds, PhysicalPosition, PhysicalSize};

/// Placement of the overlay relative to the host's top-left corner:
/// `(host_w/2 - view_w/2, host_h/2 - view_h/2)` with integer halves.
///
/// A viewport larger than the host yields a negative offset; the overlay
/// then overhangs the host evenly on both sides.
pub fn overlay_rect(host: PhysicalBounds, viewport: PhysicalSize) -> PhysicalBounds {
    let x = host.size.width / 2 - viewport.width / 2;
    let y = host.size.height / 2 - viewport.height / 2;
    PhysicalBounds::new(PhysicalPosition::new(x, y), viewport)
}

#[cfg(windows)]
pub use win::{create_overlay_surface, register_overlay_class, OverlaySurface};

#[cfg(windows)]
mod win {
    use std::sync::atomic::{AtomicBool, Ordering};

    use host_window::bounds::{PhysicalBounds, PhysicalSize};
    use host_window::HostWindow;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{COLORREF, HWND};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, LoadCursorW, RegisterClassExW, SetLayeredWindowAttributes, SetParent,
        CS_HREDRAW, CS_NOCLOSE, CS_OWNDC, CS_VREDRAW, IDC_ARROW, LWA_ALPHA, WNDCLASSEXW,
        WS_CHILD, WS_EX_COMPOSITED, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOPMOST,
        WS_EX_TRANSPARENT, WS_POPUP, WS_VISIBLE,
    };

    use super::overlay_rect;
    use crate::config::OverlayConfig;
    use crate::error::{OverlayError, OverlayResult};
    use crate::overlay::wndproc::wnd_proc;

    /// Track if the overlay window class has been registered
    static OVERLAY_CLASS_REGISTERED: AtomicBool = AtomicBool::new(false);

    /// The created overlay window. Destroyed implicitly with the host or on
    /// process exit.
    #[derive(Debug, Clone, Copy)]
    pub struct OverlaySurface {
        pub hwnd: HWND,
        /// Placement relative to the host at creation time.
        pub bounds: PhysicalBounds,
    }

    impl OverlaySurface {
        pub fn size(&self) -> PhysicalSize {
            self.bounds.size
        }
    }

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// Register the overlay window class once per process.
    pub fn register_overlay_class(class_name: &str) -> OverlayResult<()> {
        if OVERLAY_CLASS_REGISTERED.load(Ordering::SeqCst) {
            return Ok(());
        }

        let class_name = wide(class_name);

        unsafe {
            let hinstance = GetModuleHandleW(None)
                .map_err(|e| OverlayError::WindowClass(format!("module handle: {}", e)))?;

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_OWNDC | CS_NOCLOSE | CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(wnd_proc),
                hInstance: hinstance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                ..Default::default()
            };

            if RegisterClassExW(&wc) == 0 {
                return Err(OverlayError::WindowClass(format!(
                    "RegisterClassExW failed: {}",
                    windows::core::Error::from_win32()
                )));
            }
        }

        OVERLAY_CLASS_REGISTERED.store(true, Ordering::SeqCst);
        log::debug!("[surface] Registered window class");
        Ok(())
    }

    /// Create the overlay as a child of `host`, centered on the host's
    /// current bounds.
    pub fn create_overlay_surface(
        host: &HostWindow,
        config: &OverlayConfig,
    ) -> OverlayResult<OverlaySurface> {
        let handle = host.id().raw();
        let host_bounds = host
            .physical_bounds()
            .ok_or(OverlayError::HostBounds { handle })?;

        let viewport = PhysicalSize::new(config.viewport_width, config.viewport_height);
        let bounds = overlay_rect(host_bounds, viewport);

        log::info!(
            "[surface] Host {} bounds {}x{}, overlay at ({}, {}) size {}x{}",
            handle,
            host_bounds.size.width,
            host_bounds.size.height,
            bounds.position.x,
            bounds.position.y,
            viewport.width,
            viewport.height
        );

        let class_name = wide(&config.window_class_name);
        let parent = host.raw_handle().hwnd();

        unsafe {
            let hwnd = CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TRANSPARENT | WS_EX_COMPOSITED | WS_EX_NOACTIVATE,
                PCWSTR(class_name.as_ptr()),
                PCWSTR::null(),
                WS_VISIBLE | WS_CHILD | WS_POPUP,
                bounds.position.x,
                bounds.position.y,
                viewport.width,
                viewport.height,
                parent,
                None,
                None,
                None,
            )
            .map_err(|e| OverlayError::SurfaceCreation(format!("CreateWindowExW: {}", e)))?;

            // Layering is only used for compositing; keep pixels opaque.
            SetLayeredWindowAttributes(hwnd, COLORREF(0), 255, LWA_ALPHA)
                .map_err(|e| OverlayError::SurfaceCreation(format!("layered attributes: {}", e)))?;

            // WS_POPUP makes the parent argument an owner; reassert parentage.
            if let Err(e) = SetParent(hwnd, parent) {
                log::warn!("[surface] SetParent failed: {}", e);
            }

            Ok(OverlaySurface { hwnd, bounds })
        }
    }
}
