//! GPU device + surface management.
//!
//! Owns the wgpu Instance/Adapter/Device/Queue, configures the window
//! surface, and hands out per-frame encoders and views.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
