//! Frame renderer: tessellates the draw list, prepares per-draw GPU state,
//! then records a single render pass in paint order.

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::coords::Transform;
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList};

use super::common::{logical_clip_to_scissor, ColourUniforms, TextureUniforms};
use super::fill::FillRenderer;
use super::tessellate::Tessellator;
use super::textured::TexturedRenderer;
use super::{RenderCtx, RenderTarget};

enum DrawKind {
    Fill,
    Textured { texture_bind_group: Arc<wgpu::BindGroup> },
}

/// Everything a single draw needs once the pass is open.
struct PreparedDraw {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_bind_group: wgpu::BindGroup,
    kind: DrawKind,
    scissor: (u32, u32, u32, u32),
}

/// Top-level 2D renderer.
///
/// Stateless between frames apart from caches (meshes, GPU textures,
/// pipelines). Call [`render`](Self::render) once per frame with the
/// recorded draw list.
pub struct Renderer {
    tessellator: Tessellator,
    fill: FillRenderer,
    textured: TexturedRenderer,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            tessellator: Tessellator::new(),
            fill: FillRenderer::new(),
            textured: TexturedRenderer::new(),
        }
    }

    /// Drops cached meshes. GPU texture and pipeline caches stay; they
    /// invalidate themselves on format or content changes.
    pub fn clear_mesh_cache(&mut self) {
        self.tessellator.clear_cache();
    }

    /// Renders `list` into the target, back to front.
    ///
    /// The pass loads the existing target contents; clear beforehand with a
    /// separate pass if needed.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &mut DrawList) {
        self.fill.ensure_pipeline(ctx);
        self.textured.ensure_pipeline(ctx);

        let transform = Transform::ortho(ctx.viewport).to_cols();

        // TODO: pool the per-draw vertex/uniform buffers instead of creating
        // fresh ones each frame (a ring of reusable buffers keyed by size).
        let mut prepared = Vec::new();
        for item in list.iter_in_paint_order() {
            let Some(scissor) = logical_clip_to_scissor(item.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };

            let mesh = match self.tessellator.mesh_for(&item.cmd) {
                Ok(mesh) => mesh,
                Err(err) => {
                    log::warn!("tessellation failed, skipping draw: {err:?}");
                    continue;
                }
            };
            if mesh.is_empty() {
                continue;
            }

            let kind;
            let uniform_bind_group;
            match paint_of(&item.cmd) {
                Paint::Solid(color) => {
                    let uniforms = ColourUniforms {
                        transform,
                        origin: mesh.bbox.min.to_array(),
                        dimensions: mesh.bbox.size().to_array(),
                        color: color.to_array(),
                    };
                    let Some(bg) = self.fill.prepare(ctx, uniforms) else {
                        continue;
                    };
                    uniform_bind_group = bg;
                    kind = DrawKind::Fill;
                }
                Paint::Texture(tp) => {
                    let Some(texture_bind_group) = self.textured.bind_texture(ctx, tp) else {
                        continue;
                    };
                    let uniforms = TextureUniforms {
                        transform,
                        bbox_min: mesh.bbox.min.to_array(),
                        bbox_max: mesh.bbox.max.to_array(),
                        mode: tp.mode.as_u32(),
                        _pad: [0; 3],
                    };
                    let Some(bg) = self.textured.prepare(ctx, uniforms) else {
                        continue;
                    };
                    uniform_bind_group = bg;
                    kind = DrawKind::Textured { texture_bind_group };
                }
            }

            let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("fresco vertex buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("fresco index buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            prepared.push(PreparedDraw {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
                uniform_bind_group,
                kind,
                scissor,
            });
        }

        if prepared.is_empty() {
            return;
        }
        let (Some(fill_pipeline), Some(textured_pipeline)) =
            (self.fill.pipeline(), self.textured.pipeline())
        else {
            return;
        };

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("fresco scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for draw in &prepared {
            let (x, y, w, h) = draw.scissor;
            pass.set_scissor_rect(x, y, w, h);

            match &draw.kind {
                DrawKind::Fill => {
                    pass.set_pipeline(fill_pipeline);
                    pass.set_bind_group(0, &draw.uniform_bind_group, &[]);
                }
                DrawKind::Textured { texture_bind_group } => {
                    pass.set_pipeline(textured_pipeline);
                    pass.set_bind_group(0, &draw.uniform_bind_group, &[]);
                    pass.set_bind_group(1, texture_bind_group.as_ref(), &[]);
                }
            }

            pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
            pass.set_index_buffer(draw.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
    }
}

fn paint_of(cmd: &DrawCmd) -> &Paint {
    match cmd {
        DrawCmd::Rect(c) => &c.paint,
        DrawCmd::Circle(c) => &c.paint,
        DrawCmd::Ellipse(c) => &c.paint,
        DrawCmd::Line(c) => &c.paint,
    }
}
