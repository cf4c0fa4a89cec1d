#![cfg(windows)]

use std::ffi::c_void;
use windows::Win32::{
    Foundation::{BOOL, HWND, LPARAM, RECT, TRUE},
    UI::WindowsAndMessaging::{
        EnumChildWindows, GetClassNameW, GetWindowLongPtrW, GetWindowRect, IsWindow,
        SetWindowLongPtrW, GWL_STYLE,
    },
};

use crate::bounds::PhysicalBounds;
use crate::{HostWindow, WindowTree};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowImpl(HWND);

impl WindowImpl {
    pub fn from_raw(raw: i64) -> Self {
        Self(HWND(raw as isize as *mut c_void))
    }

    pub fn hwnd(&self) -> HWND {
        self.0
    }

    pub fn raw_id(&self) -> i64 {
        self.0 .0 as isize as i64
    }

    pub fn is_alive(&self) -> bool {
        unsafe { IsWindow(self.0).as_bool() }
    }

    pub fn class_name(&self) -> Option<String> {
        let mut buf = [0u16; 256];
        let len = unsafe { GetClassNameW(self.0, &mut buf) };
        if len <= 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&buf[..len as usize]))
    }

    pub fn physical_bounds(&self) -> Option<PhysicalBounds> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(self.0, &mut rect) }.ok()?;
        Some(PhysicalBounds::from_ltrb(
            rect.left,
            rect.top,
            rect.right,
            rect.bottom,
        ))
    }

    pub fn style(&self) -> u32 {
        unsafe { GetWindowLongPtrW(self.0, GWL_STYLE) as u32 }
    }

    /// Writes the style and reads it back; cross-process writes can be
    /// silently dropped, so the read-back is the only reliable signal.
    pub fn set_style(&self, style: u32) -> bool {
        unsafe {
            SetWindowLongPtrW(self.0, GWL_STYLE, style as i32 as isize);
        }
        self.style() == style
    }

    pub fn descendants(&self) -> Vec<Self> {
        unsafe extern "system" fn enum_child_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
            let list = &mut *(lparam.0 as *mut Vec<WindowImpl>);
            list.push(WindowImpl(hwnd));
            TRUE
        }

        // EnumChildWindows already recurses into grandchildren.
        let mut list = vec![];
        unsafe {
            let _ = EnumChildWindows(
                self.0,
                Some(enum_child_proc),
                LPARAM(std::ptr::addr_of_mut!(list) as isize),
            );
        }

        tracing::trace!(count = list.len(), "enumerated descendant windows");
        list
    }
}

/// The live desktop window tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopTree;

impl WindowTree for DesktopTree {
    type Node = HostWindow;

    fn descendants(&self, root: HostWindow) -> Vec<HostWindow> {
        root.descendants()
    }

    fn class_name(&self, node: HostWindow) -> Option<String> {
        node.class_name()
    }

    fn style(&self, node: HostWindow) -> u32 {
        node.style()
    }

    fn set_style(&self, node: HostWindow, style: u32) -> bool {
        node.set_style(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Never handed out by the window manager.
    const STALE: i64 = 0x7FFF_FFF0;

    #[test]
    fn stale_handle_reports_nothing() {
        let window = WindowImpl::from_raw(STALE);
        assert!(!window.is_alive());
        assert!(window.class_name().is_none());
        assert!(window.physical_bounds().is_none());
        assert!(window.descendants().is_empty());
    }

    #[test]
    fn raw_id_round_trips() {
        assert_eq!(WindowImpl::from_raw(-5000).raw_id(), -5000);
        assert_eq!(WindowImpl::from_raw(STALE).raw_id(), STALE);
    }
}
