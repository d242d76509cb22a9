pub(crate) mod circle;
pub(crate) mod ellipse;
pub(crate) mod line;
pub(crate) mod rect;

pub use circle::CircleCmd;
pub use ellipse::EllipseCmd;
pub use line::LineCmd;
pub use rect::RectCmd;

/// How a shape's outline is turned into geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawStyle {
    /// Fill the interior.
    Fill,
    /// Stroke the outline with the given width (logical pixels).
    Stroke { width: f32 },
}
