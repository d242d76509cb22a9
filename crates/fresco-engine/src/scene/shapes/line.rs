use crate::coords::Vec2;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Line-segment draw payload. Lines are always stroked.
#[derive(Debug, Clone)]
pub struct LineCmd {
    pub a: Vec2,
    pub b: Vec2,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub paint: Paint,
}

impl LineCmd {
    #[inline]
    pub fn new(a: Vec2, b: Vec2, width: f32, paint: Paint) -> Self {
        Self { a, b, width, paint }
    }
}

impl DrawList {
    /// Records a line draw command.
    #[inline]
    pub fn push_line(&mut self, z: ZIndex, a: Vec2, b: Vec2, width: f32, paint: Paint) {
        self.push(z, DrawCmd::Line(LineCmd::new(a, b, width, paint)));
    }

    /// Records a solid-colour line.
    #[inline]
    pub fn push_solid_line(&mut self, z: ZIndex, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.push_line(z, a, b, width, Paint::Solid(color));
    }
}
