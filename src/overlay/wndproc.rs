//! Win32 window procedure for the overlay surface.
//!
//! The only message with meaning here is `WM_DESTROY`: it is translated into
//! a posted quit message, which the frame loop's pump turns into the
//! `Running -> Terminated` transition.

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::ValidateRect;
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, PostQuitMessage, WM_DESTROY, WM_PAINT,
};

/// Window procedure for the overlay.
///
/// # Safety
/// Win32 callback; only invoked by the system for windows of our class.
pub unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_DESTROY => {
            log::info!("[wndproc] WM_DESTROY received, posting quit");
            PostQuitMessage(0);
            LRESULT(0)
        }
        // Swapchain presents own the client area.
        WM_PAINT => {
            let _ = ValidateRect(hwnd, None);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
