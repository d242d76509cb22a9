//! Paint model shared between the scene and the renderers.
//!
//! Scope:
//! - colour representation (straight-alpha RGBA)
//! - the texture-mapping mode selector
//! - paint sources (solid colour, textured)

mod color;
mod map_mode;

pub use color::Color;
pub use map_mode::MapMode;

use crate::texture::{SamplerOptions, Texture};

/// Paint source for filling geometry.
///
/// Each variant selects a fragment pipeline: solid paints go through the
/// colour-fill shader, textured paints through the texture-sample shader.
#[derive(Debug, Clone)]
pub enum Paint {
    Solid(Color),
    Texture(TexturePaint),
}

/// A bound texture together with its mapping mode and sampling policy.
///
/// The sampling policy owns out-of-range texture-coordinate handling; the
/// mapping itself never clamps or wraps.
#[derive(Debug, Clone)]
pub struct TexturePaint {
    pub texture: Texture,
    pub mode: MapMode,
    pub sampler: SamplerOptions,
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Textured paint with the default (linear, clamp-to-edge) sampler.
    #[inline]
    pub fn textured(texture: Texture, mode: MapMode) -> Self {
        Paint::Texture(TexturePaint {
            texture,
            mode,
            sampler: SamplerOptions::default(),
        })
    }

    #[inline]
    pub fn is_textured(&self) -> bool {
        matches!(self, Paint::Texture(_))
    }
}
