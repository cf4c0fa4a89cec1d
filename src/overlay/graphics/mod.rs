//! D3D11 graphics context for the overlay surface.
//!
//! Owns every GPU object the overlay creates and implements `FrameRenderer`
//! on top of them. Objects are released in reverse creation order when the
//! context drops.

pub mod d3d;
pub mod pipeline;

use windows::core::HRESULT;
use windows::Win32::Graphics::Direct3D::D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST;
use windows::Win32::Graphics::Direct3D11::{
    ID3D11Device, ID3D11DeviceContext, ID3D11RenderTargetView,
};
use windows::Win32::Graphics::Dxgi::{
    IDXGISwapChain, DXGI_ERROR_DEVICE_REMOVED, DXGI_ERROR_DEVICE_RESET, DXGI_PRESENT,
};

use crate::config::OverlayConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::overlay::frame_loop::FrameRenderer;
use crate::overlay::surface::OverlaySurface;
use crate::overlay::types::{FrameUniform, VERTEX_COUNT, VERTEX_STRIDE};

pub use pipeline::ShaderPipeline;

/// Everything needed to draw one frame into the overlay.
///
/// Field order is drop order: pipeline objects first, device last.
pub struct GraphicsContext {
    pipeline: ShaderPipeline,
    render_target: ID3D11RenderTargetView,
    swap_chain: IDXGISwapChain,
    context: ID3D11DeviceContext,
    device: ID3D11Device,
    clear_color: [f32; 4],
}

impl GraphicsContext {
    /// Create the device, swap chain, render target, viewport and shader
    /// pipeline for `surface`.
    pub fn new(surface: &OverlaySurface, config: &OverlayConfig) -> OverlayResult<Self> {
        let size = surface.size();
        let d3d::DeviceResources {
            device,
            context,
            swap_chain,
        } = d3d::create_device_and_swap_chain(surface.hwnd, size)?;

        let render_target = d3d::create_render_target(&device, &context, &swap_chain)?;
        d3d::set_viewport(&context, size);

        let pipeline = ShaderPipeline::build(&device, &context, config)?;

        log::info!("[graphics] Graphics context ready");

        Ok(Self {
            pipeline,
            render_target,
            swap_chain,
            context,
            device,
            clear_color: config.clear_color,
        })
    }
}

/// Lost-device results end the loop; anything else from `Present` doesn't.
fn is_device_lost(hr: HRESULT) -> bool {
    hr == DXGI_ERROR_DEVICE_REMOVED || hr == DXGI_ERROR_DEVICE_RESET
}

impl FrameRenderer for GraphicsContext {
    fn render_frame(&mut self, uniform: &FrameUniform) -> OverlayResult<()> {
        let stride = VERTEX_STRIDE;
        let offset = 0u32;
        let bytes = uniform.as_bytes();

        unsafe {
            self.context
                .ClearRenderTargetView(&self.render_target, &self.clear_color);

            self.context.IASetVertexBuffers(
                0,
                1,
                Some(&Some(self.pipeline.vertex_buffer.clone())),
                Some(&stride),
                Some(&offset),
            );
            self.context
                .IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);

            self.context.UpdateSubresource(
                &self.pipeline.uniform_buffer,
                0,
                None,
                bytes.as_ptr() as *const _,
                0,
                0,
            );
            self.context
                .VSSetConstantBuffers(0, Some(&[Some(self.pipeline.uniform_buffer.clone())]));

            self.context.Draw(VERTEX_COUNT, 0);

            let hr = self.swap_chain.Present(0, DXGI_PRESENT(0));
            if is_device_lost(hr) {
                let reason = self.device.GetDeviceRemovedReason();
                log::error!("[graphics] Device lost: {:?} ({:?})", hr, reason);
                return Err(OverlayError::Present(format!(
                    "device lost: {}",
                    windows::core::Error::from(hr)
                )));
            }
            if let Err(e) = hr.ok() {
                log::warn!("[graphics] Present failed: {}", e);
            }
        }

        Ok(())
    }
}

impl Drop for GraphicsContext {
    fn drop(&mut self) {
        unsafe {
            self.context.ClearState();
            self.context.Flush();
        }
        log::info!("[graphics] Releasing graphics context");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Foundation::S_OK;
    use windows::Win32::Graphics::Dxgi::{DXGI_ERROR_WAS_STILL_DRAWING, DXGI_STATUS_OCCLUDED};

    #[test]
    fn removed_and_reset_devices_are_fatal() {
        assert!(is_device_lost(DXGI_ERROR_DEVICE_REMOVED));
        assert!(is_device_lost(DXGI_ERROR_DEVICE_RESET));
    }

    #[test]
    fn other_present_results_are_not_fatal() {
        assert!(!is_device_lost(DXGI_ERROR_WAS_STILL_DRAWING));
        assert!(!is_device_lost(DXGI_STATUS_OCCLUDED));
        assert!(!is_device_lost(S_OK));
    }
}
