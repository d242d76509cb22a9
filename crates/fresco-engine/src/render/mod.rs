//! GPU rendering subsystem.
//!
//! The [`Renderer`] consumes a `scene::DrawList`, tessellates shapes with
//! lyon, and paints them with one of two fragment pipelines: solid colour
//! fill or textured fill. [`fragment`] is the CPU reference of the
//! per-fragment colour functions the WGSL shaders implement.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The vertex stage converts to NDC with the `transform` uniform.

mod common;
mod ctx;
mod fill;
mod renderer;
mod tessellate;
mod textured;

pub mod fragment;
pub mod shaders;

pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::Renderer;
