//! Lyon-based surface canvas.
//!
//! Stages describe their surface with fills and strokes; the canvas tessellates
//! them on the CPU into a flat triangle-list vertex buffer the host uploads as is.
//!
//! ```ignore
//! canvas.fill_rect(Vec2::ZERO, 300.0, 300.0, InkColor::WOOD);
//! canvas.stroke_segment(a, b, 8.0, InkColor::INK);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

/// Per-vertex data: position plus straight RGBA. 6 floats = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl SurfaceVertex {
    pub const FLOATS: usize = 6;
}

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl InkColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 0-255 channels. Out-of-range channels are clamped.
    pub fn rgb8(r: i32, g: i32, b: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as f32 / 255.0;
        Self::new(c(r), c(g), c(b), 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Xuan paper.
    pub const PAPER: Self = Self::new(0.961, 0.941, 0.902, 1.0);
    /// Pine soot ink.
    pub const INK: Self = Self::new(0.102, 0.102, 0.102, 1.0);
    /// Pear-wood block, mid tone.
    pub const WOOD: Self = Self::new(0.545, 0.451, 0.333, 1.0);
    /// Wood grain line.
    pub const GRAIN: Self = Self::new(0.0, 0.0, 0.0, 0.1);
    /// Dashed target outline on the block.
    pub const TARGET: Self = Self::new(1.0, 1.0, 1.0, 0.5);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Cinnabar seal paste.
    pub const SEAL: Self = Self::new(0.698, 0.133, 0.133, 1.0);
}

struct FillCtor {
    color: InkColor,
}

impl FillVertexConstructor<SurfaceVertex> for FillCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> SurfaceVertex {
        let p = vertex.position();
        SurfaceVertex { x: p.x, y: p.y, r: self.color.r, g: self.color.g, b: self.color.b, a: self.color.a }
    }
}

struct StrokeCtor {
    color: InkColor,
}

impl StrokeVertexConstructor<SurfaceVertex> for StrokeCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> SurfaceVertex {
        let p = vertex.position();
        SurfaceVertex { x: p.x, y: p.y, r: self.color.r, g: self.color.g, b: self.color.b, a: self.color.a }
    }
}

/// Per-frame tessellation target for one stage surface.
pub struct SurfaceCanvas {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<SurfaceVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
    over_budget: bool,
}

impl SurfaceCanvas {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices.min(16384) * SurfaceVertex::FLOATS),
            max_vertices,
            over_budget: false,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.over_budget = false;
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / SurfaceVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for the host's memory view).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn vertices(&self) -> &[SurfaceVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    /// Whether this frame went past `max_vertices`.
    pub fn over_budget(&self) -> bool {
        self.over_budget
    }

    /// Flush indexed geometry as a triangle list.
    ///
    /// `max_vertices` is a soft limit: the buffer keeps growing past it and the
    /// first overflow of a frame is logged.
    fn flush_geometry(&mut self) {
        let total = self.vertex_count() + self.geometry.indices.len();
        if total > self.max_vertices && !self.over_budget {
            self.over_budget = true;
            log::warn!("surface canvas past its budget of {} vertices", self.max_vertices);
        }
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    pub fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: InkColor) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(pos.x, pos.y));
        builder.line_to(point(pos.x + width, pos.y));
        builder.line_to(point(pos.x + width, pos.y + height));
        builder.line_to(point(pos.x, pos.y + height));
        builder.close();
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: InkColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_path(&mut self, path: &Path, color: InkColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Stroke one straight segment with round caps, like a brush or chisel pass.
    pub fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: InkColor) {
        self.stroke_polyline(&[from, to], width, color);
    }

    /// Stroke an open polyline with round caps and joins.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: InkColor) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        self.stroke_path(&builder.build(), width, color);
    }

    /// Stroke a rectangle outline.
    pub fn stroke_rect(&mut self, pos: Vec2, width: f32, height: f32, line_width: f32, color: InkColor) {
        let mut builder = Path::builder();
        builder.begin(point(pos.x, pos.y));
        builder.line_to(point(pos.x + width, pos.y));
        builder.line_to(point(pos.x + width, pos.y + height));
        builder.line_to(point(pos.x, pos.y + height));
        builder.close();
        self.stroke_path(&builder.build(), line_width, color);
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: InkColor) {
        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_cap(LineCap::Round)
            .with_line_join(LineJoin::Round);
        let result = self.stroke_tess.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Wood block background with horizontal grain lines.
    pub fn wood_block(&mut self, size: Vec2) {
        self.fill_rect(Vec2::ZERO, size.x, size.y, InkColor::WOOD);
        let lines = 15;
        for i in 0..lines {
            let y = (i as f32 + 0.5) * size.y / lines as f32;
            let points: Vec<Vec2> = (0..=10)
                .map(|k| {
                    let x = k as f32 * size.x / 10.0;
                    Vec2::new(x, y + (x / 50.0).sin() * 3.0)
                })
                .collect();
            self.stroke_polyline(&points, 1.0, InkColor::GRAIN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn vertex_is_24_bytes() {
        assert_eq!(size_of::<SurfaceVertex>(), SurfaceVertex::FLOATS * 4);
    }

    #[test]
    fn rgb8_clamps_channels() {
        let c = InkColor::rgb8(300, 128, -5);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.502).abs() < 0.01);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn fill_rect_is_two_triangles() {
        let mut canvas = SurfaceCanvas::new(1024);
        canvas.fill_rect(Vec2::ZERO, 10.0, 10.0, InkColor::INK);
        assert_eq!(canvas.vertex_count(), 6);
        assert_eq!(canvas.vertices()[0].r, InkColor::INK.r);
    }

    #[test]
    fn segment_and_circle_produce_vertices() {
        let mut canvas = SurfaceCanvas::new(4096);
        canvas.stroke_segment(Vec2::ZERO, Vec2::new(50.0, 50.0), 6.0, InkColor::INK);
        let after_stroke = canvas.vertex_count();
        assert!(after_stroke > 0);
        canvas.fill_circle(Vec2::new(20.0, 20.0), 5.0, InkColor::INK);
        assert!(canvas.vertex_count() > after_stroke);
    }

    #[test]
    fn degenerate_shapes_produce_nothing() {
        let mut canvas = SurfaceCanvas::new(1024);
        canvas.stroke_polyline(&[Vec2::ZERO], 4.0, InkColor::INK);
        canvas.fill_circle(Vec2::ZERO, 0.0, InkColor::INK);
        canvas.fill_rect(Vec2::ZERO, 0.0, 10.0, InkColor::INK);
        assert_eq!(canvas.vertex_count(), 0);
    }

    #[test]
    fn budget_is_a_soft_limit() {
        let mut canvas = SurfaceCanvas::new(6);
        canvas.fill_rect(Vec2::ZERO, 10.0, 10.0, InkColor::INK);
        assert!(!canvas.over_budget());
        canvas.fill_rect(Vec2::ZERO, 10.0, 10.0, InkColor::INK);
        assert_eq!(canvas.vertex_count(), 12);
        assert!(canvas.over_budget());
        canvas.clear();
        assert!(!canvas.over_budget());
    }

    #[test]
    fn clear_resets_buffer() {
        let mut canvas = SurfaceCanvas::new(1024);
        canvas.wood_block(Vec2::new(300.0, 300.0));
        assert!(canvas.vertex_count() > 0);
        canvas.clear();
        assert_eq!(canvas.vertex_count(), 0);
    }
}
