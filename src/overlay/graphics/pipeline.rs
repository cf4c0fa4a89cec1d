//! Shader pipeline: HLSL compilation, input layout and buffers.
//!
//! Both stages are compiled from the same source file at runtime. The input
//! layout is validated against the compiled vertex shader's signature, so a
//! mismatch between `Vertex` and the HLSL input struct fails here rather than
//! at draw time.

use std::ffi::CString;
use std::path::Path;

use windows::core::{s, PCSTR, PCWSTR};
use windows::Win32::Graphics::Direct3D::Fxc::D3DCompileFromFile;
use windows::Win32::Graphics::Direct3D::ID3DBlob;
use windows::Win32::Graphics::Direct3D11::{
    ID3D11Buffer, ID3D11Device, ID3D11DeviceContext, ID3D11InputLayout, ID3D11PixelShader,
    ID3D11VertexShader, D3D11_BIND_CONSTANT_BUFFER, D3D11_BIND_VERTEX_BUFFER, D3D11_BUFFER_DESC,
    D3D11_INPUT_ELEMENT_DESC, D3D11_INPUT_PER_VERTEX_DATA, D3D11_SUBRESOURCE_DATA,
    D3D11_USAGE_DEFAULT,
};
use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_FORMAT_R32G32B32A32_FLOAT, DXGI_FORMAT_R32G32B32_FLOAT,
};

use crate::config::OverlayConfig;
use crate::error::{OptionExt, OverlayError, OverlayResult, ResultExt};
use crate::overlay::types::{FrameUniform, Vertex, COLOR_OFFSET, TRIANGLE};

/// GPU objects built from the shader source. Fields drop in declaration
/// order, the reverse of creation.
pub struct ShaderPipeline {
    pub uniform_buffer: ID3D11Buffer,
    pub vertex_buffer: ID3D11Buffer,
    pub input_layout: ID3D11InputLayout,
    pub pixel_shader: ID3D11PixelShader,
    pub vertex_shader: ID3D11VertexShader,
}

impl ShaderPipeline {
    /// Compile both stages, create the input layout and buffers, and bind
    /// shaders and layout on `context`.
    pub fn build(
        device: &ID3D11Device,
        context: &ID3D11DeviceContext,
        config: &OverlayConfig,
    ) -> OverlayResult<Self> {
        log::info!(
            "[pipeline] Compiling {} ({} / {})",
            config.shader_path.display(),
            config.vertex_entry_point,
            config.pixel_entry_point
        );

        let vs_blob = compile_shader(
            &config.shader_path,
            &config.vertex_entry_point,
            &config.vertex_profile,
        )?;
        let ps_blob = compile_shader(
            &config.shader_path,
            &config.pixel_entry_point,
            &config.pixel_profile,
        )?;

        let vs_bytes = blob_bytes(&vs_blob);
        let ps_bytes = blob_bytes(&ps_blob);

        unsafe {
            let mut vertex_shader: Option<ID3D11VertexShader> = None;
            device
                .CreateVertexShader(vs_bytes, None, Some(&mut vertex_shader))
                .context_as(OverlayError::ShaderCreation, "CreateVertexShader")?;
            let vertex_shader =
                vertex_shader.context_as(OverlayError::ShaderCreation, "no vertex shader returned")?;

            let mut pixel_shader: Option<ID3D11PixelShader> = None;
            device
                .CreatePixelShader(ps_bytes, None, Some(&mut pixel_shader))
                .context_as(OverlayError::ShaderCreation, "CreatePixelShader")?;
            let pixel_shader =
                pixel_shader.context_as(OverlayError::ShaderCreation, "no pixel shader returned")?;

            context.VSSetShader(&vertex_shader, None);
            context.PSSetShader(&pixel_shader, None);

            let elements = input_elements();
            let mut input_layout: Option<ID3D11InputLayout> = None;
            device
                .CreateInputLayout(&elements, vs_bytes, Some(&mut input_layout))
                .context_as(OverlayError::InputLayout, "CreateInputLayout")?;
            let input_layout =
                input_layout.context_as(OverlayError::InputLayout, "no input layout returned")?;
            context.IASetInputLayout(&input_layout);

            let vertex_buffer = create_vertex_buffer(device)?;
            let uniform_buffer = create_uniform_buffer(device)?;

            log::info!("[pipeline] Shaders, input layout and buffers ready");

            Ok(Self {
                uniform_buffer,
                vertex_buffer,
                input_layout,
                pixel_shader,
                vertex_shader,
            })
        }
    }
}

/// Compile one entry point of an HLSL file.
///
/// A missing file, a syntax error or an unknown profile all surface as
/// `OverlayError::ShaderCompile`, carrying the compiler's own message when
/// it produced one.
pub fn compile_shader(path: &Path, entry_point: &str, target: &str) -> OverlayResult<ID3DBlob> {
    let compile_err = |message: String| OverlayError::ShaderCompile {
        entry_point: entry_point.to_string(),
        target: target.to_string(),
        message,
    };

    let wide_path: Vec<u16> = path
        .to_string_lossy()
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();
    let entry_cstr = CString::new(entry_point).map_err(|e| compile_err(e.to_string()))?;
    let target_cstr = CString::new(target).map_err(|e| compile_err(e.to_string()))?;

    let mut blob: Option<ID3DBlob> = None;
    let mut error_blob: Option<ID3DBlob> = None;

    let result = unsafe {
        D3DCompileFromFile(
            PCWSTR(wide_path.as_ptr()),
            None,
            None,
            PCSTR(entry_cstr.as_ptr() as *const u8),
            PCSTR(target_cstr.as_ptr() as *const u8),
            0,
            0,
            &mut blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        let message = match error_blob {
            Some(errors) => String::from_utf8_lossy(blob_bytes(&errors))
                .trim_end_matches('\0')
                .trim()
                .to_string(),
            None => format!("{} ({})", e, path.display()),
        };
        log::error!("[pipeline] {} {} failed: {}", entry_point, target, message);
        return Err(compile_err(message));
    }

    blob.ok_or_else(|| compile_err("compiler returned no bytecode".to_string()))
}

/// View a blob's contents as bytes. Borrowed from the blob.
pub fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe { std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize()) }
}

/// `POSITION` float3 at 0, `COLOR` float4 at 12, both per-vertex in slot 0.
pub fn input_elements() -> [D3D11_INPUT_ELEMENT_DESC; 2] {
    [
        D3D11_INPUT_ELEMENT_DESC {
            SemanticName: s!("POSITION"),
            SemanticIndex: 0,
            Format: DXGI_FORMAT_R32G32B32_FLOAT,
            InputSlot: 0,
            AlignedByteOffset: 0,
            InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
            InstanceDataStepRate: 0,
        },
        D3D11_INPUT_ELEMENT_DESC {
            SemanticName: s!("COLOR"),
            SemanticIndex: 0,
            Format: DXGI_FORMAT_R32G32B32A32_FLOAT,
            InputSlot: 0,
            AlignedByteOffset: COLOR_OFFSET,
            InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
            InstanceDataStepRate: 0,
        },
    ]
}

/// Default-usage vertex buffer holding the fixed triangle. Never written
/// again after creation.
fn create_vertex_buffer(device: &ID3D11Device) -> OverlayResult<ID3D11Buffer> {
    let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);

    let desc = D3D11_BUFFER_DESC {
        ByteWidth: (std::mem::size_of::<Vertex>() * TRIANGLE.len()) as u32,
        Usage: D3D11_USAGE_DEFAULT,
        BindFlags: D3D11_BIND_VERTEX_BUFFER.0 as u32,
        CPUAccessFlags: 0,
        MiscFlags: 0,
        StructureByteStride: 0,
    };

    let data = D3D11_SUBRESOURCE_DATA {
        pSysMem: bytes.as_ptr() as *const _,
        SysMemPitch: 0,
        SysMemSlicePitch: 0,
    };

    let mut buffer: Option<ID3D11Buffer> = None;
    unsafe {
        device
            .CreateBuffer(&desc, Some(&data), Some(&mut buffer))
            .context_as(OverlayError::BufferCreation, "vertex buffer")?;
    }
    buffer.context_as(OverlayError::BufferCreation, "no vertex buffer returned")
}

/// Default-usage constant buffer sized for `FrameUniform`, left
/// uninitialized until the first frame uploads it.
fn create_uniform_buffer(device: &ID3D11Device) -> OverlayResult<ID3D11Buffer> {
    let desc = D3D11_BUFFER_DESC {
        ByteWidth: std::mem::size_of::<FrameUniform>() as u32,
        Usage: D3D11_USAGE_DEFAULT,
        BindFlags: D3D11_BIND_CONSTANT_BUFFER.0 as u32,
        CPUAccessFlags: 0,
        MiscFlags: 0,
        StructureByteStride: 0,
    };

    let mut buffer: Option<ID3D11Buffer> = None;
    unsafe {
        device
            .CreateBuffer(&desc, None, Some(&mut buffer))
            .context_as(OverlayError::BufferCreation, "uniform buffer")?;
    }
    buffer.context_as(OverlayError::BufferCreation, "no uniform buffer returned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_layout_matches_vertex() {
        let elements = input_elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].AlignedByteOffset, 0);
        assert_eq!(elements[1].AlignedByteOffset, 12);
        assert_eq!(elements[0].Format, DXGI_FORMAT_R32G32B32_FLOAT);
        assert_eq!(elements[1].Format, DXGI_FORMAT_R32G32B32A32_FLOAT);
        assert!(elements
            .iter()
            .all(|e| e.InputSlotClass == D3D11_INPUT_PER_VERTEX_DATA));
    }

    #[test]
    fn missing_shader_file_is_compile_error() {
        let path = std::env::temp_dir().join("host-overlay-missing-shader.hlsl");
        let err = compile_shader(&path, "VShader", "vs_4_0").unwrap_err();
        assert!(matches!(err, OverlayError::ShaderCompile { .. }));
    }
}
