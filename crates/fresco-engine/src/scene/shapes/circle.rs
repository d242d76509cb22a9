use crate::coords::Vec2;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::DrawStyle;

/// Circle draw payload.
#[derive(Debug, Clone)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub style: DrawStyle,
    pub paint: Paint,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, style: DrawStyle, paint: Paint) -> Self {
        Self { center, radius, style, paint }
    }
}

impl DrawList {
    /// Records a circle draw command.
    #[inline]
    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        style: DrawStyle,
        paint: Paint,
    ) {
        self.push(z, DrawCmd::Circle(CircleCmd::new(center, radius, style, paint)));
    }

    /// Records a filled solid-colour circle.
    #[inline]
    pub fn push_solid_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push_circle(z, center, radius, DrawStyle::Fill, Paint::Solid(color));
    }
}
