use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::ellipse::EllipseCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::rect::RectCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - teach the tessellator about the new geometry
#[derive(Debug, Clone)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Ellipse(EllipseCmd),
    Line(LineCmd),
}
