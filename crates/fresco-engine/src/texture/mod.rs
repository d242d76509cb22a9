//! CPU-side textures and sampling policy.
//!
//! A [`Texture`] is an RGBA8 image owned by the host. The renderer uploads
//! it on first use and keeps the GPU copy keyed by [`TextureId`]; the
//! fingerprint changes whenever the pixel content changes so stale GPU
//! copies can be detected without comparing pixels.
//!
//! [`Texture::sample`] mirrors the GPU sampler on the CPU (same filtering
//! and wrap semantics) so the fragment contract can be tested headlessly.

mod sampler;

pub use sampler::{FilterMode, SamplerOptions, WrapMode};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Result};
use image::{DynamicImage, RgbaImage};

use crate::coords::Vec2;
use crate::paint::Color;

/// Stable identity of a texture, used as the GPU cache key.
///
/// Clones of a `Texture` share the id; a new id means a new GPU allocation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(u64);

static NEXT_TEXTURE_TAG: AtomicU64 = AtomicU64::new(1);

fn next_tag() -> u64 {
    NEXT_TEXTURE_TAG.fetch_add(1, Ordering::Relaxed)
}

/// An RGBA8 image plus caching metadata.
#[derive(Debug, Clone)]
pub struct Texture {
    image: Arc<RgbaImage>,
    id: TextureId,
    /// Changes whenever the pixel content changes.
    fingerprint: u64,
}

impl Texture {
    /// Wraps a decoded image, converting to RGBA8 if needed.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image.into_rgba8()),
            id: TextureId(next_tag()),
            fingerprint: next_tag(),
        }
    }

    /// Wraps a raw RGBA8 buffer (`width * height * 4` bytes).
    pub fn from_raw(buffer: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if buffer.len() != expected {
            bail!(
                "raw texture buffer is {} bytes, expected {} for {}x{} RGBA8",
                buffer.len(),
                expected,
                width,
                height
            );
        }
        let image = RgbaImage::from_raw(width, height, buffer)
            .ok_or_else(|| anyhow::anyhow!("raw texture buffer rejected by image crate"))?;
        Ok(Self {
            image: Arc::new(image),
            id: TextureId(next_tag()),
            fingerprint: next_tag(),
        })
    }

    /// Replaces the pixel content in place, keeping the texture identity.
    ///
    /// The GPU copy is refreshed (not reallocated) on the next frame, so the
    /// new image must match the current dimensions.
    pub fn update_image(&mut self, image: DynamicImage) -> Result<()> {
        let new_image = image.into_rgba8();
        if new_image.dimensions() != self.image.dimensions() {
            bail!(
                "replacement image is {:?}, texture is {:?}",
                new_image.dimensions(),
                self.image.dimensions()
            );
        }
        self.image = Arc::new(new_image);
        self.fingerprint = next_tag();
        Ok(())
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Native dimensions as f32, the quantity the mapping math divides by.
    #[inline]
    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    /// Raw RGBA8 bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Fetches one texel without filtering. `x`/`y` must be in range.
    #[inline]
    fn texel(&self, x: u32, y: u32) -> Color {
        let p = self.image.get_pixel(x, y).0;
        Color::from_rgba8(p[0], p[1], p[2], p[3])
    }

    /// Samples the texture at normalized coordinates under `options`,
    /// mirroring GPU sampler semantics.
    ///
    /// Out-of-[0,1] coordinates are resolved by the wrap modes; filtering is
    /// either nearest-texel or bilinear with texel centers at half-integers.
    pub fn sample(&self, uv: Vec2, options: &SamplerOptions) -> Color {
        let (w, h) = self.size();
        match options.filter {
            FilterMode::Nearest => {
                let x = wrap_texel((uv.x * w as f32).floor() as i64, w, options.wrap_x);
                let y = wrap_texel((uv.y * h as f32).floor() as i64, h, options.wrap_y);
                self.texel(x, y)
            }
            FilterMode::Linear => {
                // Texel centers sit at (i + 0.5) / n.
                let sx = uv.x * w as f32 - 0.5;
                let sy = uv.y * h as f32 - 0.5;
                let fx = sx - sx.floor();
                let fy = sy - sy.floor();
                let x0 = sx.floor() as i64;
                let y0 = sy.floor() as i64;

                let xa = wrap_texel(x0, w, options.wrap_x);
                let xb = wrap_texel(x0 + 1, w, options.wrap_x);
                let ya = wrap_texel(y0, h, options.wrap_y);
                let yb = wrap_texel(y0 + 1, h, options.wrap_y);

                let top = self.texel(xa, ya).lerp(self.texel(xb, ya), fx);
                let bottom = self.texel(xa, yb).lerp(self.texel(xb, yb), fx);
                top.lerp(bottom, fy)
            }
        }
    }
}

/// Resolves a (possibly out-of-range) texel index against one axis.
fn wrap_texel(i: i64, n: u32, mode: WrapMode) -> u32 {
    debug_assert!(n > 0);
    let n_i = n as i64;
    match mode {
        WrapMode::Clamp => i.clamp(0, n_i - 1) as u32,
        WrapMode::Repeat => i.rem_euclid(n_i) as u32,
        WrapMode::Mirror => {
            let period = 2 * n_i;
            let m = i.rem_euclid(period);
            if m < n_i { m as u32 } else { (period - 1 - m) as u32 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2×2 texture: white/black on the top row, black/white on the bottom.
    fn checker2() -> Texture {
        Texture::from_raw(
            vec![
                255, 255, 255, 255, /**/ 0, 0, 0, 255, //
                0, 0, 0, 255, /*   */ 255, 255, 255, 255,
            ],
            2,
            2,
        )
        .unwrap()
    }

    fn grey(c: Color) -> f32 {
        (c.r + c.g + c.b) / 3.0
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(Texture::from_raw(vec![0; 5], 2, 2).is_err());
    }

    #[test]
    fn update_keeps_id_and_bumps_fingerprint() {
        let mut t = checker2();
        let id = t.id();
        let fp = t.fingerprint();
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255])));
        t.update_image(img).unwrap();
        assert_eq!(t.id(), id);
        assert_ne!(t.fingerprint(), fp);
    }

    #[test]
    fn update_rejects_dimension_change() {
        let mut t = checker2();
        let img = DynamicImage::ImageRgba8(RgbaImage::new(3, 3));
        assert!(t.update_image(img).is_err());
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn nearest_picks_the_covering_texel() {
        let t = checker2();
        let opts = SamplerOptions { filter: FilterMode::Nearest, ..Default::default() };
        assert_eq!(t.sample(Vec2::new(0.25, 0.25), &opts), Color::opaque(1.0, 1.0, 1.0));
        assert_eq!(t.sample(Vec2::new(0.75, 0.25), &opts), Color::opaque(0.0, 0.0, 0.0));
    }

    #[test]
    fn linear_center_averages_the_four_texels() {
        let t = checker2();
        let c = t.sample(Vec2::new(0.5, 0.5), &SamplerOptions::default());
        assert!((grey(c) - 0.5).abs() < 1e-3, "expected mid grey, got {c:?}");
    }

    #[test]
    fn clamp_holds_the_edge_texel() {
        let t = checker2();
        let opts = SamplerOptions { filter: FilterMode::Nearest, ..Default::default() };
        // Far outside the box on both axes: clamps to the bottom-right texel.
        assert_eq!(t.sample(Vec2::new(9.0, 9.0), &opts), Color::opaque(1.0, 1.0, 1.0));
    }

    #[test]
    fn repeat_tiles_the_image() {
        let t = checker2();
        let opts = SamplerOptions {
            filter: FilterMode::Nearest,
            wrap_x: WrapMode::Repeat,
            wrap_y: WrapMode::Repeat,
        };
        // 1.25 ≡ 0.25 under repeat.
        assert_eq!(
            t.sample(Vec2::new(1.25, 2.25), &opts),
            t.sample(Vec2::new(0.25, 0.25), &opts)
        );
    }

    #[test]
    fn mirror_reflects_at_the_boundary() {
        let t = checker2();
        let opts = SamplerOptions {
            filter: FilterMode::Nearest,
            wrap_x: WrapMode::Mirror,
            wrap_y: WrapMode::Clamp,
        };
        // Just past the right edge reflects back onto the last texel.
        assert_eq!(
            t.sample(Vec2::new(1.25, 0.25), &opts),
            t.sample(Vec2::new(0.75, 0.25), &opts)
        );
    }
}
