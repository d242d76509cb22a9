use bytemuck::{Pod, Zeroable};

use super::Viewport;

/// Column-major 4×4 matrix, laid out exactly as the `transform` field of the
/// shader uniforms.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Transform(pub [[f32; 4]; 4]);

impl Transform {
    pub const IDENTITY: Transform = Transform([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Maps logical pixels (top-left origin, +Y down) to NDC for `viewport`.
    #[inline]
    pub fn ortho(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Transform([
            [2.0 / w, 0.0, 0.0, 0.0],
            [0.0, -2.0 / h, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0, 1.0],
        ])
    }

    #[inline]
    pub const fn to_cols(self) -> [[f32; 4]; 4] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(m: &Transform, x: f32, y: f32) -> (f32, f32) {
        let c = m.0;
        (
            c[0][0] * x + c[1][0] * y + c[3][0],
            c[0][1] * x + c[1][1] * y + c[3][1],
        )
    }

    #[test]
    fn ortho_maps_corners_to_ndc() {
        let m = Transform::ortho(Viewport::new(800.0, 600.0));
        assert_eq!(apply(&m, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(apply(&m, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(apply(&m, 400.0, 300.0), (0.0, 0.0));
    }
}
