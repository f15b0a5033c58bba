//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors the renderer adds on top of the snapshot's own
pub mod colors {
    /// Translucent wash over everything left of the wall
    pub const CHASER_SHADOW: [f32; 4] = [0.5, 0.0, 0.05, 0.45];
    /// Dimming while the password prompt is up
    pub const LOCK_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.6];

    /// High contrast overrides
    pub const HC_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const HC_PLATFORM: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
