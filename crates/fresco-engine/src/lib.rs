//! Fresco engine crate.
//!
//! A small 2D shape-painting engine over wgpu. Shapes are recorded into a
//! [`scene::DrawList`], tessellated with lyon, and painted with one of two
//! materials: a solid colour fill or a textured fill with a selectable
//! texture-mapping mode.

pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod texture;
