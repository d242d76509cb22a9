//! Texture-sample pipeline (textured paints).
//!
//! Owns the GPU copies of CPU textures: uploaded on first use, refreshed
//! when the fingerprint changes, keyed by `TextureId`.

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::paint::TexturePaint;
use crate::texture::{FilterMode, SamplerOptions, TextureId, WrapMode};

use super::common::{straight_alpha_blend, uniform_min_binding_size, TextureUniforms, Vertex};
use super::RenderCtx;

struct GpuTexture {
    fingerprint: u64,
    sampler: SamplerOptions,
    size: (u32, u32),
    texture: wgpu::Texture,
    /// Group-1 bind group (texture view + sampler), shared across draws.
    bind_group: Arc<wgpu::BindGroup>,
}

#[derive(Default)]
pub(super) struct TexturedRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    uniform_layout: Option<wgpu::BindGroupLayout>,
    texture_layout: Option<wgpu::BindGroupLayout>,

    cache: HashMap<TextureId, GpuTexture>,
}

impl TexturedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pipeline(&self) -> Option<&wgpu::RenderPipeline> {
        self.pipeline.as_ref()
    }

    /// Creates the per-draw uniform buffer + bind group (group 0).
    pub fn prepare(&self, ctx: &RenderCtx<'_>, uniforms: TextureUniforms) -> Option<wgpu::BindGroup> {
        let layout = self.uniform_layout.as_ref()?;

        let ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fresco texture ubo"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fresco texture uniform bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        }))
    }

    /// Returns the group-1 bind group for `paint`, uploading or refreshing
    /// the GPU copy as needed.
    pub fn bind_texture(
        &mut self,
        ctx: &RenderCtx<'_>,
        paint: &TexturePaint,
    ) -> Option<Arc<wgpu::BindGroup>> {
        let layout = self.texture_layout.as_ref()?;

        let id = paint.texture.id();
        let size = paint.texture.size();
        if size.0 == 0 || size.1 == 0 {
            // wgpu rejects zero-sized textures outright; skip the draw.
            log::warn!("textured paint with zero-sized texture {id:?}, skipping");
            return None;
        }

        if let Some(entry) = self.cache.get_mut(&id) {
            if entry.sampler == paint.sampler && entry.size == size {
                if entry.fingerprint != paint.texture.fingerprint() {
                    upload_pixels(ctx, &entry.texture, &paint.texture);
                    entry.fingerprint = paint.texture.fingerprint();
                }
                return Some(Arc::clone(&entry.bind_group));
            }
        }

        // First use, content resize, or a sampler change: (re)build everything.
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("fresco paint texture"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        upload_pixels(ctx, &texture, &paint.texture);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(ctx, paint.sampler);

        let bind_group = Arc::new(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fresco texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        }));

        let shared = Arc::clone(&bind_group);
        self.cache.insert(
            id,
            GpuTexture {
                fingerprint: paint.texture.fingerprint(),
                sampler: paint.sampler,
                size,
                texture,
                bind_group,
            },
        );
        Some(shared)
    }

    pub fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fresco texture shader"),
            source: wgpu::ShaderSource::Wgsl(super::shaders::TEXTURE.into()),
        });

        let uniform_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("fresco texture uniform bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(uniform_min_binding_size::<TextureUniforms>()),
                    },
                    count: None,
                }],
            });

        let texture_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("fresco texture bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("fresco texture pipeline layout"),
                bind_group_layouts: &[&uniform_layout, &texture_layout],
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("fresco texture pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(straight_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.uniform_layout = Some(uniform_layout);
        self.texture_layout = Some(texture_layout);

        // Bind groups reference the old layout; rebuild on next use.
        self.cache.clear();
    }
}

fn upload_pixels(ctx: &RenderCtx<'_>, gpu: &wgpu::Texture, cpu: &crate::texture::Texture) {
    let (w, h) = cpu.size();
    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: gpu,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        cpu.data(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * w),
            rows_per_image: Some(h),
        },
        wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: 1,
        },
    );
}

fn create_sampler(ctx: &RenderCtx<'_>, options: SamplerOptions) -> wgpu::Sampler {
    let filter = match options.filter {
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
        FilterMode::Linear => wgpu::FilterMode::Linear,
    };
    ctx.device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("fresco paint sampler"),
        address_mode_u: address_mode(options.wrap_x),
        address_mode_v: address_mode(options.wrap_y),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

fn address_mode(wrap: WrapMode) -> wgpu::AddressMode {
    match wrap {
        WrapMode::Clamp => wgpu::AddressMode::ClampToEdge,
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::Mirror => wgpu::AddressMode::MirrorRepeat,
    }
}
