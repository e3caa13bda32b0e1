use glam::Vec2;

use crate::core::rng::Rng;
use crate::render::canvas::{InkColor, SurfaceCanvas};

/// Allowed brush widths, in surface units.
pub const MIN_BRUSH_WIDTH: f32 = 4.0;
pub const MAX_BRUSH_WIDTH: f32 = 20.0;

/// Opacity of a brush segment.
const STROKE_ALPHA: f32 = 0.85;
/// Opacity of a bleed blob.
const BLEED_ALPHA: f32 = 0.1;
/// Bleed radius relative to the brush width.
const BLEED_SCALE: f32 = 1.5;

/// One straight piece of a freehand brush stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
}

/// A translucent ink diffusion blob. Decoration only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkBlot {
    pub center: Vec2,
    pub radius: f32,
}

/// Records freehand brush gestures as connected line segments.
#[derive(Debug, Clone)]
pub struct StrokeRecorder {
    segments: Vec<InkSegment>,
    blots: Vec<InkBlot>,
    /// Press points, drawn as dots so a tap leaves a mark.
    dots: Vec<InkBlot>,
    last: Option<Vec2>,
    width: f32,
    gestures: usize,
}

impl StrokeRecorder {
    pub fn new(width: f32) -> Self {
        Self {
            segments: Vec::with_capacity(512),
            blots: Vec::new(),
            dots: Vec::new(),
            last: None,
            width: width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH),
            gestures: 0,
        }
    }

    /// Begin a gesture at `pos`.
    pub fn begin(&mut self, pos: Vec2) {
        self.last = Some(pos);
        self.gestures += 1;
        self.dots.push(InkBlot {
            center: pos,
            radius: self.width / 2.0,
        });
    }

    /// Extend the current gesture to `pos`. With probability `bleed_chance`
    /// a bleed blob is left at `pos`. Returns false when no gesture is active.
    pub fn extend(&mut self, pos: Vec2, rng: &mut Rng, bleed_chance: f32) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        self.segments.push(InkSegment {
            from: last,
            to: pos,
            width: self.width,
        });
        if rng.chance(bleed_chance) {
            self.blots.push(InkBlot {
                center: pos,
                radius: self.width * BLEED_SCALE,
            });
        }
        self.last = Some(pos);
        true
    }

    /// Finish the current gesture.
    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Whether anything has been drawn since the last clear.
    pub fn has_drawn(&self) -> bool {
        self.gestures > 0
    }

    pub fn gesture_count(&self) -> usize {
        self.gestures
    }

    pub fn segments(&self) -> &[InkSegment] {
        &self.segments
    }

    pub fn blots(&self) -> &[InkBlot] {
        &self.blots
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Set the brush width for subsequent segments (clamped to 4-20).
    pub fn set_width(&mut self, width: f32) {
        self.width = width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
    }

    /// Wipe the surface. The brush width is kept.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.blots.clear();
        self.dots.clear();
        self.last = None;
        self.gestures = 0;
    }

    pub fn render(&self, canvas: &mut SurfaceCanvas) {
        let ink = InkColor::INK.with_alpha(STROKE_ALPHA);
        for dot in &self.dots {
            canvas.fill_circle(dot.center, dot.radius, ink);
        }
        for seg in &self.segments {
            canvas.stroke_segment(seg.from, seg.to, seg.width, ink);
        }
        let bleed = InkColor::INK.with_alpha(BLEED_ALPHA);
        for blot in &self.blots {
            canvas.fill_circle(blot.center, blot.radius, bleed);
        }
    }
}
