use glam::Vec2;

use crate::api::stage::{Stage, StageContext, StagePayload};
use crate::api::types::{events, GameEvent, StageId};
use crate::config::WorkshopConfig;
use crate::error::WorkshopError;
use crate::input::actions::Action;
use crate::input::queue::{PointerEvent, PointerPhase};
use crate::input::region::{InputRegion, RegionKind};
use crate::primitives::force::{ForceAccumulator, ForceLevel};
use crate::render::canvas::{InkColor, SurfaceCanvas};
use crate::state::{CarvePoint, CarveStroke};

const REGIONS: &[InputRegion] = &[InputRegion::interactive("carving-canvas", RegionKind::Canvas)];

/// Selected carving tool. Cosmetic only: both cut the same groove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarvingTool {
    /// Flat chisel.
    #[default]
    Chisel,
    /// Angled knife.
    Knife,
}

/// Rendering parameters of one groove segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrooveStyle {
    pub force: f32,
    pub outer_width: f32,
    pub inner_width: f32,
    pub outer_color: InkColor,
    pub inner_color: InkColor,
    pub highlight_color: InkColor,
    pub highlight_width: f32,
    /// Applied to both axes.
    pub highlight_offset: f32,
}

/// Groove look between two consecutive samples, driven by their mean force.
pub fn groove_style(prev: &CarvePoint, curr: &CarvePoint) -> GrooveStyle {
    let f = ((prev.force + curr.force) / 2.0).clamp(0.0, 1.0);
    let dark = (58.0 - 20.0 * f).floor() as i32;
    let inner = (73.0 - 15.0 * f).floor() as i32;
    GrooveStyle {
        force: f,
        outer_width: 4.0 + 12.0 * f,
        inner_width: 2.0 + 8.0 * f,
        outer_color: InkColor::rgb8(dark + 16, dark, dark - 12),
        inner_color: InkColor::rgb8(inner + 20, inner + 5, inner - 8),
        highlight_color: InkColor::WHITE.with_alpha(0.05 + 0.15 * f),
        highlight_width: 1.0 + f,
        highlight_offset: -(1.0 + f),
    }
}

/// Carving progress over the full history: each sample is worth 0.1 to 0.2.
pub fn carve_progress(paths: &[CarveStroke]) -> f32 {
    let total: f32 = paths
        .iter()
        .flatten()
        .map(|p| 0.5 + 0.5 * p.force)
        .sum();
    (total / 5.0).min(100.0)
}

/// Carve the mirrored glyph into the block with a press-to-deepen chisel.
pub struct CarvingStage {
    paths: Vec<CarveStroke>,
    live: CarveStroke,
    force: ForceAccumulator,
    tool: CarvingTool,
    progress: f32,
    guard: f32,
    surface: Vec2,
}

impl CarvingStage {
    pub fn new(config: &WorkshopConfig) -> Self {
        Self {
            paths: Vec::new(),
            live: Vec::new(),
            force: ForceAccumulator::new(config.force_ramp_ms, config.force_sample_ms),
            tool: CarvingTool::default(),
            progress: 0.0,
            guard: config.carve_guard,
            surface: Vec2::new(config.surface_width, config.surface_height),
        }
    }

    pub fn paths(&self) -> &[CarveStroke] {
        &self.paths
    }

    pub fn live(&self) -> &[CarvePoint] {
        &self.live
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn force(&self) -> f32 {
        self.force.force()
    }

    pub fn tool(&self) -> CarvingTool {
        self.tool
    }

    pub fn is_carving(&self) -> bool {
        self.force.is_pressed()
    }

    /// Drop the last committed stroke.
    pub fn undo(&mut self, ctx: &mut StageContext) {
        if self.paths.pop().is_some() {
            self.recompute(ctx);
        }
    }

    /// Drop every committed stroke.
    pub fn clear(&mut self, ctx: &mut StageContext) {
        self.paths.clear();
        self.recompute(ctx);
    }

    fn recompute(&mut self, ctx: &mut StageContext) {
        self.progress = carve_progress(&self.paths);
        let met = if self.progress >= self.guard { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(events::METRIC, self.progress, met, 0.0));
    }

    fn emit_force(&self, ctx: &mut StageContext) {
        let force = self.force.force();
        let level = ForceLevel::from_force(force);
        ctx.emit_event(GameEvent::new(events::FORCE, force, level.code() as f32, 0.0));
    }

    fn commit(&mut self, ctx: &mut StageContext) {
        self.force.release();
        let stroke = std::mem::take(&mut self.live);
        if stroke.len() >= 2 {
            log::debug!("carve stroke committed ({} samples)", stroke.len());
            self.paths.push(stroke);
            self.recompute(ctx);
        }
        self.emit_force(ctx);
    }

    /// Draw a stroke, batching consecutive segments of similar force into
    /// one polyline per groove layer.
    fn render_stroke(canvas: &mut SurfaceCanvas, stroke: &[CarvePoint]) {
        let mut run: Vec<Vec2> = Vec::new();
        let mut run_style: Option<GrooveStyle> = None;
        for pair in stroke.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let style = groove_style(prev, curr);
            let b = Vec2::new(curr.x, curr.y);
            match run_style {
                Some(current) if force_bucket(current.force) == force_bucket(style.force) => run.push(b),
                _ => {
                    if let Some(current) = run_style {
                        Self::render_run(canvas, &run, &current);
                    }
                    run.clear();
                    run.push(Vec2::new(prev.x, prev.y));
                    run.push(b);
                    run_style = Some(style);
                }
            }
        }
        if let Some(current) = run_style {
            Self::render_run(canvas, &run, &current);
        }
    }

    fn render_run(canvas: &mut SurfaceCanvas, points: &[Vec2], style: &GrooveStyle) {
        canvas.stroke_polyline(points, style.outer_width, style.outer_color);
        canvas.stroke_polyline(points, style.inner_width, style.inner_color);
        let shift = Vec2::splat(style.highlight_offset);
        let shifted: Vec<Vec2> = points.iter().map(|&p| p + shift).collect();
        canvas.stroke_polyline(&shifted, style.highlight_width, style.highlight_color);
    }
}

/// Force quantized to tenths, the granularity groove runs are batched at.
fn force_bucket(force: f32) -> i32 {
    (force * 10.0).round() as i32
}

impl Stage for CarvingStage {
    fn id(&self) -> StageId {
        StageId::Carving
    }

    fn regions(&self) -> &'static [InputRegion] {
        REGIONS
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut StageContext) {
        match event.phase {
            PointerPhase::Start => {
                self.force.press();
                self.live = vec![CarvePoint::new(event.pos.x, event.pos.y, 0.0)];
                self.emit_force(ctx);
            }
            PointerPhase::Move => {
                if !self.force.is_pressed() {
                    return;
                }
                let force = self.force.sample();
                self.live.push(CarvePoint::new(event.pos.x, event.pos.y, force));
            }
            PointerPhase::End | PointerPhase::Cancel => {
                if self.force.is_pressed() {
                    self.commit(ctx);
                }
            }
        }
    }

    fn on_action(&mut self, action: Action, ctx: &mut StageContext) {
        match action {
            Action::Undo => self.undo(ctx),
            Action::Reset => self.clear(ctx),
            Action::SelectTool(tool) => self.tool = tool,
            _ => {}
        }
    }

    fn tick(&mut self, dt: f32, ctx: &mut StageContext) {
        if self.force.tick(dt * 1000.0).is_some() {
            self.emit_force(ctx);
        }
    }

    fn render(&self, canvas: &mut SurfaceCanvas) {
        canvas.wood_block(self.surface);
        for stroke in &self.paths {
            Self::render_stroke(canvas, stroke);
        }
        Self::render_stroke(canvas, &self.live);
        if self.force.is_pressed() {
            if let Some(tip) = self.live.last() {
                let radius = 6.0 + 10.0 * self.force.force();
                canvas.fill_circle(Vec2::new(tip.x, tip.y), radius, InkColor::WHITE.with_alpha(0.2));
            }
        }
    }

    fn metric(&self) -> Option<f32> {
        Some(self.progress)
    }

    fn completion(&self) -> Result<StagePayload, WorkshopError> {
        if self.progress < self.guard {
            return Err(WorkshopError::guard(
                StageId::Carving,
                format!("carving progress {:.0} < {:.0}", self.progress, self.guard),
            ));
        }
        Ok(StagePayload::Carving {
            paths: self.paths.clone(),
        })
    }
}
