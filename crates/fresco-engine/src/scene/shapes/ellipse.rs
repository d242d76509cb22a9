use crate::coords::Vec2;
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::DrawStyle;

/// Ellipse draw payload.
#[derive(Debug, Clone)]
pub struct EllipseCmd {
    pub center: Vec2,
    /// Half-extents along the (pre-rotation) x and y axes.
    pub radii: Vec2,
    /// Rotation around the center, in degrees.
    pub rotation: f32,
    pub style: DrawStyle,
    pub paint: Paint,
}

impl EllipseCmd {
    #[inline]
    pub fn new(center: Vec2, radii: Vec2, rotation: f32, style: DrawStyle, paint: Paint) -> Self {
        Self { center, radii, rotation, style, paint }
    }
}

impl DrawList {
    /// Records an ellipse draw command.
    #[inline]
    pub fn push_ellipse(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        style: DrawStyle,
        paint: Paint,
    ) {
        self.push(z, DrawCmd::Ellipse(EllipseCmd::new(center, radii, rotation, style, paint)));
    }
}
