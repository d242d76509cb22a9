//! Shape tessellation (lyon) and the per-primitive mesh cache.
//!
//! Geometry is keyed by shape + style with f32 bit patterns, so repeated
//! frames of a static scene tessellate each shape once. Paint is not part of
//! the key; the same mesh serves any material.

use std::collections::HashMap;
use std::sync::Arc;

use lyon::math::{point, vector, Angle, Box2D};
use lyon::path::traits::PathBuilder as _;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeOptions, StrokeTessellator,
    StrokeVertex, TessellationError, VertexBuffers,
};

use crate::coords::{BBox, Vec2};
use crate::scene::shapes::DrawStyle;
use crate::scene::DrawCmd;

use super::common::Vertex;

/// A tessellated shape: triangle list + the bounding box the fragment stage
/// maps texture coordinates against.
pub(super) struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bbox: BBox,
}

impl Mesh {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Cache key: shape geometry + style, hashed by f32 bit patterns.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Rect { min: [u32; 2], max: [u32; 2], stroke: Option<u32> },
    Circle { center: [u32; 2], radius: u32, stroke: Option<u32> },
    Ellipse { center: [u32; 2], radii: [u32; 2], rotation: u32, stroke: Option<u32> },
    Line { a: [u32; 2], b: [u32; 2], width: u32 },
}

#[inline]
fn bits(v: Vec2) -> [u32; 2] {
    [v.x.to_bits(), v.y.to_bits()]
}

#[inline]
fn stroke_bits(style: DrawStyle) -> Option<u32> {
    match style {
        DrawStyle::Fill => None,
        DrawStyle::Stroke { width } => Some(width.to_bits()),
    }
}

fn key_for(cmd: &DrawCmd) -> MeshKey {
    match cmd {
        DrawCmd::Rect(c) => MeshKey::Rect {
            min: bits(c.rect.min),
            max: bits(c.rect.max),
            stroke: stroke_bits(c.style),
        },
        DrawCmd::Circle(c) => MeshKey::Circle {
            center: bits(c.center),
            radius: c.radius.to_bits(),
            stroke: stroke_bits(c.style),
        },
        DrawCmd::Ellipse(c) => MeshKey::Ellipse {
            center: bits(c.center),
            radii: bits(c.radii),
            rotation: c.rotation.to_bits(),
            stroke: stroke_bits(c.style),
        },
        DrawCmd::Line(c) => MeshKey::Line {
            a: bits(c.a),
            b: bits(c.b),
            width: c.width.to_bits(),
        },
    }
}

/// Owns the lyon tessellators and the mesh cache.
pub(super) struct Tessellator {
    fill: FillTessellator,
    stroke: StrokeTessellator,
    cache: HashMap<MeshKey, Arc<Mesh>>,
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            fill: FillTessellator::new(),
            stroke: StrokeTessellator::new(),
            cache: HashMap::new(),
        }
    }

    /// Returns the mesh for `cmd`, tessellating on first encounter.
    pub fn mesh_for(&mut self, cmd: &DrawCmd) -> Result<Arc<Mesh>, TessellationError> {
        let key = key_for(cmd);
        if let Some(mesh) = self.cache.get(&key) {
            return Ok(Arc::clone(mesh));
        }

        let mesh = Arc::new(self.tessellate(cmd)?);
        self.cache.insert(key, Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Drops all cached meshes (e.g. after a scene rebuild with fresh geometry).
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn tessellate(&mut self, cmd: &DrawCmd) -> Result<Mesh, TessellationError> {
        let path = build_path(cmd);
        let style = match cmd {
            DrawCmd::Rect(c) => c.style,
            DrawCmd::Circle(c) => c.style,
            DrawCmd::Ellipse(c) => c.style,
            DrawCmd::Line(c) => DrawStyle::Stroke { width: c.width },
        };

        let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();

        match style {
            DrawStyle::Fill => {
                self.fill.tessellate_path(
                    &path,
                    &FillOptions::default(),
                    &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
                        [v.position().x, v.position().y]
                    }),
                )?;
            }
            DrawStyle::Stroke { width } => {
                self.stroke.tessellate_path(
                    &path,
                    &StrokeOptions::default().with_line_width(width),
                    &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| {
                        [v.position().x, v.position().y]
                    }),
                )?;
            }
        }

        Ok(finish(buffers))
    }
}

fn build_path(cmd: &DrawCmd) -> Path {
    let mut builder = Path::builder();
    match cmd {
        DrawCmd::Rect(c) => {
            let r = c.rect.normalized();
            builder.add_rectangle(
                &Box2D::new(point(r.min.x, r.min.y), point(r.max.x, r.max.y)),
                Winding::Positive,
            );
        }
        DrawCmd::Circle(c) => {
            builder.add_circle(point(c.center.x, c.center.y), c.radius, Winding::Positive);
        }
        DrawCmd::Ellipse(c) => {
            builder.add_ellipse(
                point(c.center.x, c.center.y),
                vector(c.radii.x, c.radii.y),
                Angle::degrees(c.rotation),
                Winding::Positive,
            );
        }
        DrawCmd::Line(c) => {
            builder.begin(point(c.a.x, c.a.y));
            builder.line_to(point(c.b.x, c.b.y));
            builder.end(false);
        }
    }
    builder.build()
}

/// Computes the mesh bbox from the tessellated positions, then fills in the
/// bbox-normalized uv attribute.
fn finish(buffers: VertexBuffers<[f32; 2], u32>) -> Mesh {
    let mut bbox = match buffers.vertices.first() {
        Some(&[x, y]) => BBox::new(Vec2::new(x, y), Vec2::new(x, y)),
        None => BBox::default(),
    };
    for &[x, y] in &buffers.vertices {
        bbox = bbox.expanded_to(Vec2::new(x, y));
    }

    let size = bbox.size();
    let vertices = buffers
        .vertices
        .iter()
        .map(|&[x, y]| {
            let uv = [
                if size.x > 0.0 { (x - bbox.min.x) / size.x } else { 0.0 },
                if size.y > 0.0 { (y - bbox.min.y) / size.y } else { 0.0 },
            ];
            Vertex { position: [x, y], uv }
        })
        .collect();

    Mesh {
        vertices,
        indices: buffers.indices,
        bbox,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{Color, Paint};
    use crate::scene::shapes::{CircleCmd, RectCmd};

    fn solid() -> Paint {
        Paint::Solid(Color::opaque(1.0, 1.0, 1.0))
    }

    fn rect_cmd(x0: f32, y0: f32, x1: f32, y1: f32) -> DrawCmd {
        DrawCmd::Rect(RectCmd::new(
            BBox::new(Vec2::new(x0, y0), Vec2::new(x1, y1)),
            DrawStyle::Fill,
            solid(),
        ))
    }

    #[test]
    fn filled_rect_mesh_spans_the_rect() {
        let mut tess = Tessellator::new();
        let mesh = tess.mesh_for(&rect_cmd(10.0, 20.0, 110.0, 70.0)).unwrap();

        assert!(!mesh.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert_eq!(mesh.bbox, BBox::new(Vec2::new(10.0, 20.0), Vec2::new(110.0, 70.0)));

        // Every uv must lie in the unit square, with the extremes reached.
        let mut max_uv = [0.0f32; 2];
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
            max_uv[0] = max_uv[0].max(v.uv[0]);
            max_uv[1] = max_uv[1].max(v.uv[1]);
        }
        assert_eq!(max_uv, [1.0, 1.0]);
    }

    #[test]
    fn circle_mesh_bbox_approximates_the_circle() {
        let mut tess = Tessellator::new();
        let cmd = DrawCmd::Circle(CircleCmd::new(
            Vec2::new(0.0, 0.0),
            100.0,
            DrawStyle::Fill,
            solid(),
        ));
        let mesh = tess.mesh_for(&cmd).unwrap();

        // Tessellation flattens the arc within the default tolerance.
        let tol = 1.0;
        assert!((mesh.bbox.min.x + 100.0).abs() < tol, "min {:?}", mesh.bbox.min);
        assert!((mesh.bbox.max.y - 100.0).abs() < tol, "max {:?}", mesh.bbox.max);
    }

    #[test]
    fn identical_shapes_share_one_cached_mesh() {
        let mut tess = Tessellator::new();
        let a = tess.mesh_for(&rect_cmd(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = tess.mesh_for(&rect_cmd(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let c = tess.mesh_for(&rect_cmd(0.0, 0.0, 11.0, 10.0)).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn stroked_line_mesh_covers_the_width() {
        use crate::scene::shapes::LineCmd;

        let mut tess = Tessellator::new();
        let cmd = DrawCmd::Line(LineCmd::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            10.0,
            solid(),
        ));
        let mesh = tess.mesh_for(&cmd).unwrap();

        assert!(!mesh.is_empty());
        // A horizontal stroke extends half the width above and below.
        assert!((mesh.bbox.min.y + 5.0).abs() < 1e-3);
        assert!((mesh.bbox.max.y - 5.0).abs() < 1e-3);
    }
}
