//! Shared GPU types and utilities used by both material pipelines.

use bytemuck::{Pod, Zeroable};

use crate::coords::{BBox, Viewport};

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight-alpha blending: colours carry non-premultiplied alpha end to end.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── vertex ────────────────────────────────────────────────────────────────

/// Tessellated mesh vertex.
///
/// `position` is the local-space position (logical pixels) that the fragment
/// stage maps into texture coordinates. `uv` is the bbox-normalized position
/// carried at location 1; the texture shader recomputes its coordinates from
/// `position` instead of consuming this field.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // local-space position
        1 => Float32x2  // bbox-normalized uv
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── material uniforms ─────────────────────────────────────────────────────

/// Uniforms of the colour-fill pipeline (group 0, binding 0).
///
/// Only `color` is read by the fragment stage; `origin` and `dimensions` are
/// reserved fields the host fills with the shape's bounding box.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ColourUniforms {
    pub transform: [[f32; 4]; 4],
    pub origin: [f32; 2],
    pub dimensions: [f32; 2],
    pub color: [f32; 4],
}

/// Uniforms of the texture-sample pipeline (group 0, binding 0).
///
/// `mode` is the wire representation of `paint::MapMode`; the shader treats
/// unknown values as a diagnostic condition, so the padding must stay zero.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct TextureUniforms {
    pub transform: [[f32; 4]; 4],
    pub bbox_min: [f32; 2],
    pub bbox_max: [f32; 2],
    pub mode: u32,
    pub _pad: [u32; 3],
}

pub(super) fn uniform_min_binding_size<T>() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
        .expect("uniform structs are non-empty")
}

// ── scissor ───────────────────────────────────────────────────────────────

/// Converts a logical clip box to physical scissor arguments, clamped to the
/// viewport.
///
/// Returns `None` for a zero-area result (the caller skips the draw).
/// `clip = None` means no scissor and yields the full viewport.
pub(super) fn logical_clip_to_scissor(
    clip: Option<BBox>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_w = (viewport.width * scale).max(1.0) as u32;
    let phys_h = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_w, phys_h),
        Some(b) => {
            let b = b.normalized();
            let x = ((b.min.x * scale).max(0.0) as u32).min(phys_w);
            let y = ((b.min.y * scale).max(0.0) as u32).min(phys_h);
            let x2 = ((b.max.x * scale).max(0.0) as u32).min(phys_w);
            let y2 = ((b.max.y * scale).max(0.0) as u32).min(phys_h);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    // The binding contract fixes both uniform blocks at 96 bytes
    // (mat4 + two vec2 + one 16-byte tail).
    #[test]
    fn uniform_blocks_match_the_wgsl_layout() {
        assert_eq!(std::mem::size_of::<ColourUniforms>(), 96);
        assert_eq!(std::mem::size_of::<TextureUniforms>(), 96);
    }

    #[test]
    fn scissor_without_clip_covers_the_viewport() {
        let s = logical_clip_to_scissor(None, Viewport::new(100.0, 50.0), 2.0);
        assert_eq!(s, Some((0, 0, 200, 100)));
    }

    #[test]
    fn scissor_clamps_to_the_viewport() {
        let clip = BBox::new(Vec2::new(-10.0, 10.0), Vec2::new(500.0, 40.0));
        let s = logical_clip_to_scissor(Some(clip), Viewport::new(100.0, 50.0), 1.0);
        assert_eq!(s, Some((0, 10, 100, 30)));
    }

    #[test]
    fn zero_area_scissor_is_none() {
        let clip = BBox::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 40.0));
        let s = logical_clip_to_scissor(Some(clip), Viewport::new(100.0, 50.0), 1.0);
        assert!(s.is_none());
    }
}
