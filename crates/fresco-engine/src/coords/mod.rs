//! Coordinate and geometry types shared across the engine.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Shaders receive a transform matrix in their uniforms and convert logical
//! pixels to NDC in the vertex stage.

mod bbox;
mod transform;
mod vec2;
mod viewport;

pub use bbox::BBox;
pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;
