use crate::coords::BBox;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::DrawStyle;

/// Rectangle draw payload.
#[derive(Debug, Clone)]
pub struct RectCmd {
    pub rect: BBox,
    pub style: DrawStyle,
    pub paint: Paint,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: BBox, style: DrawStyle, paint: Paint) -> Self {
        Self { rect, style, paint }
    }
}

impl DrawList {
    /// Records a rectangle draw command.
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: BBox, style: DrawStyle, paint: Paint) {
        self.push(z, DrawCmd::Rect(RectCmd::new(rect, style, paint)));
    }

    /// Records a filled solid-colour rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: BBox, color: Color) {
        self.push_rect(z, rect, DrawStyle::Fill, Paint::Solid(color));
    }
}
