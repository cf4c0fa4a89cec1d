//! Direct3D 11 device and swap chain creation.
//!
//! A hardware device, its immediate context and a single-buffer windowed
//! swap chain bound directly to the overlay HWND. There is no WARP or
//! reference fallback: if the hardware device can't be created, startup
//! fails.

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D::D3D_DRIVER_TYPE_HARDWARE;
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDeviceAndSwapChain, ID3D11Device, ID3D11DeviceContext, ID3D11RenderTargetView,
    ID3D11Texture2D, D3D11_CREATE_DEVICE_FLAG, D3D11_SDK_VERSION, D3D11_VIEWPORT,
};
use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_FORMAT, DXGI_FORMAT_R8G8B8A8_UNORM, DXGI_MODE_DESC, DXGI_SAMPLE_DESC,
};
use windows::Win32::Graphics::Dxgi::{
    IDXGISwapChain, DXGI_SWAP_CHAIN_DESC, DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH,
    DXGI_SWAP_EFFECT_DISCARD, DXGI_USAGE_RENDER_TARGET_OUTPUT,
};

use host_window::bounds::PhysicalSize;

use crate::error::{OptionExt, OverlayError, OverlayResult, ResultExt};

/// Back buffer format.
pub const BACK_BUFFER_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

/// Device, immediate context and swap chain, created together.
pub struct DeviceResources {
    pub device: ID3D11Device,
    pub context: ID3D11DeviceContext,
    pub swap_chain: IDXGISwapChain,
}

/// Create a hardware D3D11 device and a swap chain for `hwnd`.
///
/// The swap chain is configured for:
/// - One RGBA8 back buffer of exactly `size`
/// - Windowed presentation with mode switching allowed
/// - Single-sample, discard swap effect
pub fn create_device_and_swap_chain(hwnd: HWND, size: PhysicalSize) -> OverlayResult<DeviceResources> {
    let desc = DXGI_SWAP_CHAIN_DESC {
        BufferDesc: DXGI_MODE_DESC {
            Width: size.width as u32,
            Height: size.height as u32,
            Format: BACK_BUFFER_FORMAT,
            ..Default::default()
        },
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: 1,
        OutputWindow: hwnd,
        Windowed: true.into(),
        SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
        Flags: DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH.0 as u32,
    };

    let mut swap_chain: Option<IDXGISwapChain> = None;
    let mut device: Option<ID3D11Device> = None;
    let mut context: Option<ID3D11DeviceContext> = None;

    unsafe {
        D3D11CreateDeviceAndSwapChain(
            None,
            D3D_DRIVER_TYPE_HARDWARE,
            None,
            D3D11_CREATE_DEVICE_FLAG(0),
            None,
            D3D11_SDK_VERSION,
            Some(&desc),
            Some(&mut swap_chain),
            Some(&mut device),
            None,
            Some(&mut context),
        )
        .context_as(OverlayError::DeviceCreation, "D3D11CreateDeviceAndSwapChain")?;
    }

    let resources = DeviceResources {
        device: device.context_as(OverlayError::DeviceCreation, "no device returned")?,
        context: context.context_as(OverlayError::DeviceCreation, "no immediate context returned")?,
        swap_chain: swap_chain.context_as(OverlayError::SwapChain, "no swap chain returned")?,
    };

    log::info!(
        "[d3d] Hardware device and swap chain created ({}x{})",
        size.width,
        size.height
    );
    Ok(resources)
}

/// Create a render-target view over back buffer 0 and bind it as the only
/// render target, with no depth-stencil.
///
/// The texture reference is released on return; the view keeps the
/// back buffer alive.
pub fn create_render_target(
    device: &ID3D11Device,
    context: &ID3D11DeviceContext,
    swap_chain: &IDXGISwapChain,
) -> OverlayResult<ID3D11RenderTargetView> {
    unsafe {
        let back_buffer: ID3D11Texture2D = swap_chain
            .GetBuffer(0)
            .context_as(OverlayError::SwapChain, "GetBuffer(0)")?;

        let mut rtv: Option<ID3D11RenderTargetView> = None;
        device
            .CreateRenderTargetView(&back_buffer, None, Some(&mut rtv))
            .context_as(OverlayError::RenderTarget, "CreateRenderTargetView")?;
        let rtv = rtv.context_as(OverlayError::RenderTarget, "no render target view returned")?;

        context.OMSetRenderTargets(Some(&[Some(rtv.clone())]), None);

        Ok(rtv)
    }
}

/// Viewport covering the whole surface.
pub fn full_viewport(size: PhysicalSize) -> D3D11_VIEWPORT {
    D3D11_VIEWPORT {
        TopLeftX: 0.0,
        TopLeftY: 0.0,
        Width: size.width as f32,
        Height: size.height as f32,
        MinDepth: 0.0,
        MaxDepth: 1.0,
    }
}

pub fn set_viewport(context: &ID3D11DeviceContext, size: PhysicalSize) {
    unsafe {
        context.RSSetViewports(Some(&[full_viewport(size)]));
    }
}
