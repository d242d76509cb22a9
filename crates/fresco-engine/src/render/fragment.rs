//! CPU reference of the per-fragment colour functions.
//!
//! The WGSL shaders in [`super::shaders`] implement exactly this math; keep
//! the two in lockstep. Everything here is a pure, stateless function of its
//! inputs — fragments carry no shared state and may be evaluated in any
//! order.
//!
//! The mappings never clamp or wrap the resulting coordinate; out-of-[0,1]
//! values are resolved by the bound sampler. Degenerate boxes and zero-sized
//! textures are not guarded — the division produces whatever IEEE 754 says.

use crate::coords::{BBox, Vec2};
use crate::paint::{Color, MapMode};
use crate::texture::{SamplerOptions, Texture};

/// Colour emitted for an unrecognized mapping-mode value: opaque red, loud
/// enough to spot on screen without aborting the draw call.
pub const INVALID_MODE_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Colour-fill material: emits the uniform colour for every fragment,
/// independent of position, without validation or clamping.
#[inline]
pub fn solid_fragment(color: Color) -> Color {
    color
}

/// Maps a fragment's local-space position into a texture coordinate.
///
/// `tex_dims` must be the bound texture's native dimensions as reported at
/// evaluation time (`textureDimensions` on the GPU), never a cached value.
///
/// The exact-centered offset deliberately mixes box-center-relative and
/// box-min-relative terms; it is reproduced from the shader contract as-is.
#[inline]
pub fn map_uv(mode: MapMode, p: Vec2, bbox: BBox, tex_dims: Vec2) -> Vec2 {
    match mode {
        MapMode::Exact => (p - bbox.min) / tex_dims,
        MapMode::ExactCentered => {
            let center = (bbox.min + bbox.max) * 0.5;
            let offset = (p - center) - tex_dims * 0.5;
            (p - bbox.min + offset) / tex_dims
        }
        MapMode::Stretch => (p - bbox.min) / (bbox.max - bbox.min),
    }
}

/// Texture-sample material: full per-fragment evaluation, from the raw mode
/// value on the wire to a sampled colour.
///
/// An unrecognized `mode_raw` yields [`INVALID_MODE_COLOR`] regardless of
/// the other inputs.
pub fn texture_fragment(
    mode_raw: u32,
    p: Vec2,
    bbox: BBox,
    texture: &Texture,
    sampler: &SamplerOptions,
) -> Color {
    let Some(mode) = MapMode::from_u32(mode_raw) else {
        return INVALID_MODE_COLOR;
    };
    // Dimensions are queried here, per evaluation, not precomputed.
    let uv = map_uv(mode, p, bbox, texture.dimensions());
    texture.sample(uv, sampler)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x0: f32, y0: f32, x1: f32, y1: f32) -> BBox {
        BBox::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn assert_uv(uv: Vec2, x: f32, y: f32) {
        assert!((uv.x - x).abs() < 1e-6 && (uv.y - y).abs() < 1e-6, "got {uv:?}, want ({x}, {y})");
    }

    /// 4×4 texture, all texels mid-grey except a white center block, so the
    /// center sample is distinguishable from the corners.
    fn center_marked_texture() -> Texture {
        let mut data = vec![0u8; 4 * 4 * 4];
        for y in 0..4u32 {
            for x in 0..4u32 {
                let i = ((y * 4 + x) * 4) as usize;
                let lum = if (1..=2).contains(&x) && (1..=2).contains(&y) { 255 } else { 64 };
                data[i..i + 4].copy_from_slice(&[lum, lum, lum, 255]);
            }
        }
        Texture::from_raw(data, 4, 4).unwrap()
    }

    // ── colour fill ───────────────────────────────────────────────────────

    #[test]
    fn solid_fill_is_the_identity_on_the_uniform_colour() {
        // Including out-of-range channels: no clamping, no validation.
        for c in [
            Color::new(0.0, 0.0, 0.0, 0.0),
            Color::new(0.25, 0.5, 0.75, 1.0),
            Color::new(2.0, -1.0, 0.5, 3.0),
        ] {
            assert_eq!(solid_fragment(c), c);
        }
    }

    // ── mode 0: exact ─────────────────────────────────────────────────────

    #[test]
    fn exact_spans_unit_uv_over_the_native_texture_size() {
        let b = bbox(10.0, 10.0, 500.0, 500.0);
        let dims = v(20.0, 20.0);
        assert_uv(map_uv(MapMode::Exact, v(10.0, 10.0), b, dims), 0.0, 0.0);
        assert_uv(map_uv(MapMode::Exact, v(30.0, 30.0), b, dims), 1.0, 1.0);
    }

    #[test]
    fn exact_ignores_the_box_max_corner() {
        let dims = v(64.0, 64.0);
        let p = v(42.0, 18.0);
        let small = bbox(10.0, 10.0, 20.0, 20.0);
        let large = bbox(10.0, 10.0, 900.0, 900.0);
        assert_eq!(
            map_uv(MapMode::Exact, p, small, dims),
            map_uv(MapMode::Exact, p, large, dims)
        );
    }

    // ── mode 1: exact-centered ────────────────────────────────────────────

    #[test]
    fn exact_centered_reproduces_the_literal_offset_formula() {
        let b = bbox(0.0, 0.0, 100.0, 100.0);
        let dims = v(40.0, 40.0);
        let p = v(50.0, 50.0);

        // center = (50, 50); offset = (p - center) - dims/2 = (-20, -20)
        // uv = (p - min + offset) / dims = (30, 30) / 40
        assert_uv(map_uv(MapMode::ExactCentered, p, b, dims), 0.75, 0.75);
    }

    #[test]
    fn exact_centered_is_linear_with_twice_the_exact_slope() {
        // The offset formula expands to uv = (2p - min - center - dims/2) / dims:
        // a step of dp moves uv by 2*dp/dims, twice mode 0's rate. Locked in
        // as-is; see the map_uv doc comment.
        let b = bbox(0.0, 0.0, 40.0, 40.0);
        let dims = v(40.0, 40.0);
        assert_uv(map_uv(MapMode::ExactCentered, v(0.0, 0.0), b, dims), -1.0, -1.0);
        assert_uv(map_uv(MapMode::ExactCentered, v(20.0, 20.0), b, dims), 0.0, 0.0);
        assert_uv(map_uv(MapMode::ExactCentered, v(40.0, 40.0), b, dims), 1.0, 1.0);
    }

    // ── mode 2: stretch ───────────────────────────────────────────────────

    #[test]
    fn stretch_normalizes_over_the_box_for_any_texture_size() {
        let b = bbox(0.0, 0.0, 100.0, 50.0);
        for dims in [v(1.0, 1.0), v(17.0, 1024.0)] {
            assert_uv(map_uv(MapMode::Stretch, v(0.0, 0.0), b, dims), 0.0, 0.0);
            assert_uv(map_uv(MapMode::Stretch, v(100.0, 50.0), b, dims), 1.0, 1.0);
            assert_uv(map_uv(MapMode::Stretch, v(50.0, 25.0), b, dims), 0.5, 0.5);
        }
    }

    #[test]
    fn stretch_is_translation_invariant() {
        let b = bbox(5.0, -3.0, 65.0, 27.0);
        let p = v(20.0, 10.0);
        let t = v(123.5, -77.25);
        let shifted = BBox::new(b.min + t, b.max + t);

        let a = map_uv(MapMode::Stretch, p, b, v(32.0, 32.0));
        let c = map_uv(MapMode::Stretch, p + t, shifted, v(32.0, 32.0));
        assert_uv(a, c.x, c.y);
    }

    // ── invalid mode ──────────────────────────────────────────────────────

    #[test]
    fn unknown_mode_yields_the_red_sentinel() {
        let t = center_marked_texture();
        let b = bbox(0.0, 0.0, 4.0, 4.0);
        for mode in [3, 7, u32::MAX] {
            let c = texture_fragment(mode, v(1.0, 1.0), b, &t, &SamplerOptions::default());
            assert_eq!(c, INVALID_MODE_COLOR);
            assert_eq!(c, Color::new(1.0, 0.0, 0.0, 1.0));
        }
    }

    // ── end-to-end scenarios ──────────────────────────────────────────────

    #[test]
    fn stretch_center_samples_the_texture_center() {
        let t = center_marked_texture();
        let b = bbox(0.0, 0.0, 100.0, 50.0);
        let c = texture_fragment(
            MapMode::Stretch.as_u32(),
            v(50.0, 25.0),
            b,
            &t,
            &SamplerOptions::default(),
        );
        // uv = (0.5, 0.5): under linear filtering this is the average of the
        // four center texels, which are all white.
        assert!((c.r - 1.0).abs() < 1e-3, "expected white center, got {c:?}");
    }

    #[test]
    fn exact_anchors_the_native_texture_at_the_box_min() {
        let t = center_marked_texture();
        let b = bbox(10.0, 10.0, 200.0, 200.0);
        let opts = SamplerOptions::nearest();

        // p = min → uv = (0, 0) → the dark corner texel.
        let corner = texture_fragment(MapMode::Exact.as_u32(), v(10.0, 10.0), b, &t, &opts);
        assert!((corner.r - 64.0 / 255.0).abs() < 1e-3);

        // p = min + dims/2 → uv = (0.5, 0.5) → inside the white center block.
        let center = texture_fragment(MapMode::Exact.as_u32(), v(12.0, 12.0), b, &t, &opts);
        assert!((center.r - 1.0).abs() < 1e-3);
    }
}
