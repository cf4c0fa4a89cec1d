//! Minimal host for trying the overlay locally.
//!
//! Opens a plain top-level window with one "Intermediate D3D Window" child,
//! then launches `host-overlay` with the window's handle. Closing the window
//! destroys the overlay with it.
//!
//! ```text
//! cargo build --bin host-overlay
//! cargo run --example spawn_host
//! ```

#[cfg(windows)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    host::run()
}

#[cfg(not(windows))]
fn main() {
    eprintln!("spawn_host needs a Windows desktop");
}

#[cfg(windows)]
mod host {
    use std::path::PathBuf;
    use std::process::{Child, Command};

    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
    use windows::Win32::Graphics::Gdi::{GetStockObject, HBRUSH, WHITE_BRUSH};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, LoadCursorW,
        PostQuitMessage, RegisterClassExW, TranslateMessage, CS_HREDRAW, CS_VREDRAW,
        CW_USEDEFAULT, IDC_ARROW, MSG, WINDOW_EX_STYLE, WM_DESTROY, WNDCLASSEXW, WS_CHILD,
        WS_OVERLAPPEDWINDOW, WS_VISIBLE,
    };

    const HOST_CLASS: PCWSTR = w!("HostOverlayDemoHost");
    const RENDER_CLASS: PCWSTR = w!("Intermediate D3D Window");

    unsafe extern "system" fn host_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    unsafe fn register(class_name: PCWSTR) -> windows::core::Result<()> {
        let hinstance = GetModuleHandleW(None)?;
        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(host_proc),
            hInstance: hinstance.into(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH(GetStockObject(WHITE_BRUSH).0),
            lpszClassName: class_name,
            ..Default::default()
        };
        if RegisterClassExW(&wc) == 0 {
            return Err(windows::core::Error::from_win32());
        }
        Ok(())
    }

    fn overlay_exe() -> PathBuf {
        // target/<profile>/examples/spawn_host.exe -> target/<profile>/host-overlay.exe
        let mut path = std::env::current_exe().unwrap_or_default();
        path.pop();
        path.pop();
        path.push("host-overlay.exe");
        path
    }

    fn spawn_overlay(hwnd: HWND) -> std::io::Result<Child> {
        // Hosts hand the handle over as a sign-extended 32-bit integer.
        let handle = hwnd.0 as isize as i32;
        log::info!("[spawn_host] Launching overlay for host {}", handle);
        Command::new(overlay_exe()).arg(handle.to_string()).spawn()
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();

        let mut child = unsafe {
            register(HOST_CLASS)?;
            register(RENDER_CLASS)?;

            let host = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                HOST_CLASS,
                w!("host-overlay demo"),
                WS_OVERLAPPEDWINDOW | WS_VISIBLE,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                800,
                600,
                None,
                None,
                None,
                None,
            )?;

            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                RENDER_CLASS,
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE,
                0,
                0,
                800,
                600,
                host,
                None,
                None,
                None,
            )?;

            spawn_overlay(host)?
        };

        let mut msg = MSG::default();
        unsafe {
            while GetMessageW(&mut msg, None, 0, 0).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        let status = child.wait()?;
        log::info!("[spawn_host] Overlay exited with {}", status);
        Ok(())
    }
}
