//! Type definitions for the overlay renderer.
//!
//! Vertex and uniform layouts shared between the CPU side and
//! `shaders/overlay.hlsl`, plus the fixed triangle.

use bytemuck::{Pod, Zeroable};

// ============================================================================
// Constants
// ============================================================================

/// Number of vertices uploaded and drawn each frame.
pub const VERTEX_COUNT: u32 = 3;

/// Byte offset of `Vertex::color`, as declared in the input layout.
pub const COLOR_OFFSET: u32 = std::mem::offset_of!(Vertex, color) as u32;

/// Size of one vertex in the vertex buffer.
pub const VERTEX_STRIDE: u32 = std::mem::size_of::<Vertex>() as u32;

/// Constant buffers must be sized in multiples of 16 bytes.
pub const UNIFORM_ALIGNMENT: usize = 16;

// ============================================================================
// Vertex Data
// ============================================================================

/// Per-vertex input: `POSITION` (float3) then `COLOR` (float4).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Apex top-center red, bottom-right green, bottom-left blue.
pub const TRIANGLE: [Vertex; VERTEX_COUNT as usize] = [
    Vertex::new([0.0, 0.5, 0.0], [1.0, 0.0, 0.0, 1.0]),
    Vertex::new([0.5, -0.5, 0.0], [0.0, 1.0, 0.0, 1.0]),
    Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0, 1.0]),
];

// ============================================================================
// Frame Uniform
// ============================================================================

/// Vertex-shader constant buffer `b0`. Only `time` is meaningful; the
/// padding rounds the struct up to one 16-byte register.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub time: f32,
    pub _padding: [f32; 3],
}

impl FrameUniform {
    /// Uniform for elapsed time `seconds`, narrowed to the shader's `float`.
    pub fn at(seconds: f64) -> Self {
        Self {
            time: seconds as f32,
            ..Self::default()
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

// ============================================================================
// Loop State
// ============================================================================

/// Frame loop state. Starts `Running`; `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Terminated,
}

/// Outcome of draining the message queue once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// Queue empty, no destroy/quit seen.
    Idle,
    /// A destroy or quit message was observed.
    Quit,
}
