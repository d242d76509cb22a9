//! Demo app: draws a small scene exercising every shape and paint mode.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use image::{DynamicImage, Rgba, RgbaImage};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use fresco_engine::coords::{BBox, Vec2};
use fresco_engine::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use fresco_engine::logging::{init_logging, LoggingConfig};
use fresco_engine::paint::{Color, MapMode, Paint};
use fresco_engine::render::{RenderCtx, RenderTarget, Renderer};
use fresco_engine::scene::shapes::DrawStyle;
use fresco_engine::scene::{DrawList, ZIndex};
use fresco_engine::texture::{SamplerOptions, Texture};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    gpu: Option<Gpu>,
    renderer: Renderer,
    scene: DrawList,
    checker: Texture,
}

impl App {
    fn new() -> Self {
        Self {
            gpu: None,
            renderer: Renderer::new(),
            scene: DrawList::new(),
            checker: checkerboard(8, 8, 16),
        }
    }

    fn build_scene(&mut self) {
        let scene = &mut self.scene;
        scene.clear();

        // Background card.
        scene.push_solid_rect(
            ZIndex::new(0),
            BBox::new(Vec2::new(20.0, 20.0), Vec2::new(780.0, 580.0)),
            Color::new(0.92, 0.92, 0.95, 1.0),
        );

        // One textured rect per mapping mode, left to right.
        let modes = [MapMode::Exact, MapMode::ExactCentered, MapMode::Stretch];
        for (i, mode) in modes.into_iter().enumerate() {
            let x = 40.0 + i as f32 * 250.0;
            scene.push_rect(
                ZIndex::new(1),
                BBox::new(Vec2::new(x, 40.0), Vec2::new(x + 220.0, 260.0)),
                DrawStyle::Fill,
                Paint::Texture(fresco_engine::paint::TexturePaint {
                    texture: self.checker.clone(),
                    mode,
                    sampler: SamplerOptions::repeat(),
                }),
            );
        }

        // Solid circle, half transparent to show blending over the card.
        scene.push_solid_circle(
            ZIndex::new(2),
            Vec2::new(200.0, 430.0),
            110.0,
            Color::new(0.1, 0.45, 0.85, 0.6),
        );

        // Textured rotated ellipse.
        scene.push_ellipse(
            ZIndex::new(2),
            Vec2::new(480.0, 430.0),
            Vec2::new(150.0, 90.0),
            25.0,
            DrawStyle::Fill,
            Paint::textured(self.checker.clone(), MapMode::Stretch),
        );

        // Stroked crosshair on top, clipped to the card.
        scene.push_clip(BBox::new(Vec2::new(20.0, 20.0), Vec2::new(780.0, 580.0)));
        scene.push_line(
            ZIndex::new(3),
            Vec2::new(680.0, 330.0),
            Vec2::new(680.0, 560.0),
            8.0,
            Paint::solid(Color::opaque(0.85, 0.2, 0.25)),
        );
        scene.push_line(
            ZIndex::new(3),
            Vec2::new(580.0, 445.0),
            Vec2::new(780.0, 445.0),
            8.0,
            Paint::solid(Color::opaque(0.85, 0.2, 0.25)),
        );
        scene.pop_clip();

        // Stroked rect outline around the whole card.
        scene.push_rect(
            ZIndex::new(4),
            BBox::new(Vec2::new(20.0, 20.0), Vec2::new(780.0, 580.0)),
            DrawStyle::Stroke { width: 4.0 },
            Paint::solid(Color::opaque(0.25, 0.25, 0.3)),
        );
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else { return };

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        gpu.window().request_redraw();
                    }
                    SurfaceErrorAction::Fatal => {
                        log::error!("fatal surface error, exiting");
                        event_loop.exit();
                    }
                }
                return;
            }
        };

        let t0 = Instant::now();
        clear_pass(&mut frame, wgpu::Color::WHITE);

        let ctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            gpu.viewport(),
            gpu.scale_factor(),
        );
        let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
        self.renderer.render(&ctx, &mut target, &mut self.scene);
        drop(target);
        drop(ctx);

        gpu.submit(frame);
        log::debug!("frame encoded in {:?}", t0.elapsed());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("fresco demo")
            .with_inner_size(LogicalSize::new(800.0, 600.0));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(Gpu::new(Arc::clone(&window), GpuInit::default())) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.build_scene();
                window.request_redraw();
            }
            Err(err) => {
                log::error!("GPU init failed: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size);
                    gpu.window().request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(gpu) = self.gpu.as_ref() {
                    gpu.window().request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Clears the frame before the scene pass, which loads existing contents.
fn clear_pass(frame: &mut GpuFrame, color: wgpu::Color) {
    frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("clear pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(color),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}

/// Procedural checkerboard with a red top-left cell marking the texture
/// origin, so the mapping modes are easy to tell apart on screen.
fn checkerboard(cells_x: u32, cells_y: u32, cell_px: u32) -> Texture {
    let (w, h) = (cells_x * cell_px, cells_y * cell_px);
    let mut image = RgbaImage::new(w, h);
    for (x, y, px) in image.enumerate_pixels_mut() {
        let (cx, cy) = (x / cell_px, y / cell_px);
        *px = if cx == 0 && cy == 0 {
            Rgba([200, 40, 40, 255])
        } else if (cx + cy) % 2 == 0 {
            Rgba([235, 235, 235, 255])
        } else {
            Rgba([60, 60, 70, 255])
        };
    }
    Texture::from_image(DynamicImage::ImageRgba8(image))
}
