use glam::Vec2;

use crate::api::stage::{Stage, StageContext, StagePayload};
use crate::api::types::{events, GameEvent, StageId};
use crate::config::WorkshopConfig;
use crate::error::WorkshopError;
use crate::input::actions::Action;
use crate::input::queue::{PointerEvent, PointerPhase};
use crate::input::region::{InputRegion, RegionKind};
use crate::input::viewport::Viewport;
use crate::primitives::coverage::{CoverageGrid, GRID_SIZE};
use crate::render::canvas::{InkColor, SurfaceCanvas};

const REGIONS: &[InputRegion] = &[InputRegion::interactive("inking-block", RegionKind::CoverageSurface)];

/// Opacity of an inked cell.
const INKED_ALPHA: f32 = 0.85;

/// Coaching line shown under the ink meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkFeedback {
    Insufficient,
    InProgress,
    Adequate,
    Ample,
}

impl InkFeedback {
    pub fn from_level(level: f32) -> Self {
        if level < 30.0 {
            InkFeedback::Insufficient
        } else if level < 70.0 {
            InkFeedback::InProgress
        } else if level < 90.0 {
            InkFeedback::Adequate
        } else {
            InkFeedback::Ample
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            InkFeedback::Insufficient => "墨量不足，继续刷墨...",
            InkFeedback::InProgress => "刷墨中，尽量覆盖整个版面",
            InkFeedback::Adequate => "墨量适中",
            InkFeedback::Ample => "墨量充足！可以开始印刷了",
        }
    }
}

/// Brush ink over the carved block.
pub struct InkingStage {
    grid: CoverageGrid,
    ink_level: f32,
    increment: f32,
    guard: f32,
    brushing: bool,
    /// Last brush position in percent, for the brush cursor.
    brush: Vec2,
    viewport: Viewport,
}

impl InkingStage {
    pub fn new(config: &WorkshopConfig) -> Self {
        Self {
            grid: CoverageGrid::new(),
            ink_level: 0.0,
            increment: config.ink_increment,
            guard: config.ink_guard,
            brushing: false,
            brush: Vec2::splat(50.0),
            viewport: Viewport::new(config.surface_width, config.surface_height),
        }
    }

    pub fn ink_level(&self) -> f32 {
        self.ink_level
    }

    pub fn grid(&self) -> &CoverageGrid {
        &self.grid
    }

    pub fn feedback(&self) -> InkFeedback {
        InkFeedback::from_level(self.ink_level)
    }

    /// Wash the block: no cells, no ink.
    pub fn reset(&mut self, ctx: &mut StageContext) {
        self.grid.clear();
        self.ink_level = 0.0;
        log::debug!("inking reset");
        self.emit_metric(ctx);
    }

    /// One brush move at a percent position.
    pub fn brush_at(&mut self, percent: Vec2, ctx: &mut StageContext) {
        self.brush = CoverageGrid::clamp_percent(percent);
        self.grid.mark(self.brush);
        self.ink_level = (self.ink_level + self.increment).min(100.0);
        self.emit_metric(ctx);
    }

    fn emit_metric(&self, ctx: &mut StageContext) {
        let met = if self.ink_level >= self.guard { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(events::METRIC, self.ink_level, met, 0.0));
    }
}

impl Stage for InkingStage {
    fn id(&self) -> StageId {
        StageId::Inking
    }

    fn regions(&self) -> &'static [InputRegion] {
        REGIONS
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut StageContext) {
        match event.phase {
            PointerPhase::Start => self.brushing = true,
            PointerPhase::Move if self.brushing => {
                let percent = self.viewport.to_percent(event.pos);
                self.brush_at(percent, ctx);
            }
            PointerPhase::Move => {}
            PointerPhase::End | PointerPhase::Cancel => self.brushing = false,
        }
    }

    fn on_action(&mut self, action: Action, ctx: &mut StageContext) {
        if action == Action::Reset {
            self.reset(ctx);
        }
    }

    fn render(&self, canvas: &mut SurfaceCanvas) {
        let size = self.viewport.surface_size();
        canvas.wood_block(size);
        let cell = size / GRID_SIZE as f32;
        let ink = InkColor::INK.with_alpha(INKED_ALPHA);
        for (gx, gy) in self.grid.iter() {
            let origin = Vec2::new(gx as f32, gy as f32) * cell;
            canvas.fill_rect(origin, cell.x, cell.y, ink);
        }
        if self.brushing {
            let pos = self.viewport.from_percent(self.brush);
            canvas.fill_circle(pos, 12.0, InkColor::INK.with_alpha(0.6));
        }
    }

    fn metric(&self) -> Option<f32> {
        Some(self.ink_level)
    }

    fn completion(&self) -> Result<StagePayload, WorkshopError> {
        if self.ink_level < self.guard {
            return Err(WorkshopError::guard(
                StageId::Inking,
                format!("ink level {:.1} < {:.0}", self.ink_level, self.guard),
            ));
        }
        Ok(StagePayload::Inking {
            ink_level: self.ink_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> (InkingStage, StageContext) {
        (InkingStage::new(&WorkshopConfig::default()), StageContext::new(1))
    }

    /// Press, then `moves` moves spread over the block (surface units).
    fn brush(stage: &mut InkingStage, ctx: &mut StageContext, moves: usize) {
        stage.on_pointer(PointerEvent::start(0.0, 0.0), ctx);
        for i in 0..moves {
            let x = (i * 7 % 300) as f32;
            let y = (i * 13 % 300) as f32;
            stage.on_pointer(PointerEvent::moved(x, y), ctx);
        }
        stage.on_pointer(PointerEvent::end(0.0, 0.0), ctx);
    }

    #[test]
    fn each_move_adds_ink() {
        let (mut stage, mut ctx) = stage();
        brush(&mut stage, &mut ctx, 40);
        assert_eq!(stage.ink_level(), 20.0);
        assert!(stage.completion().is_err());
        brush(&mut stage, &mut ctx, 20);
        assert_eq!(stage.ink_level(), 30.0);
        assert_eq!(stage.completion().unwrap(), StagePayload::Inking { ink_level: 30.0 });
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let (mut stage, mut ctx) = stage();
        stage.on_pointer(PointerEvent::moved(100.0, 100.0), &mut ctx);
        assert_eq!(stage.ink_level(), 0.0);
        assert!(stage.grid().is_empty());
    }

    #[test]
    fn ink_level_caps_at_hundred() {
        let (mut stage, mut ctx) = stage();
        brush(&mut stage, &mut ctx, 500);
        assert_eq!(stage.ink_level(), 100.0);
        assert_eq!(stage.feedback(), InkFeedback::Ample);
    }

    #[test]
    fn surface_edge_maps_to_last_cell() {
        let (mut stage, mut ctx) = stage();
        stage.on_pointer(PointerEvent::start(300.0, 300.0), &mut ctx);
        stage.on_pointer(PointerEvent::moved(300.0, 300.0), &mut ctx);
        stage.on_pointer(PointerEvent::moved(-40.0, 500.0), &mut ctx);
        assert!(stage.grid().is_covered(9, 9));
        assert!(stage.grid().is_covered(0, 9));
        assert_eq!(stage.grid().len(), 2);
    }

    #[test]
    fn reset_washes_everything() {
        let (mut stage, mut ctx) = stage();
        brush(&mut stage, &mut ctx, 80);
        stage.on_action(Action::Reset, &mut ctx);
        assert_eq!(stage.ink_level(), 0.0);
        assert!(stage.grid().is_empty());
        assert_eq!(stage.feedback(), InkFeedback::Insufficient);
    }

    #[test]
    fn feedback_bands() {
        assert_eq!(InkFeedback::from_level(29.9), InkFeedback::Insufficient);
        assert_eq!(InkFeedback::from_level(30.0), InkFeedback::InProgress);
        assert_eq!(InkFeedback::from_level(70.0), InkFeedback::Adequate);
        assert_eq!(InkFeedback::from_level(90.0), InkFeedback::Ample);
    }

    #[test]
    fn renders_inked_cells() {
        let (mut stage, mut ctx) = stage();
        let mut canvas = SurfaceCanvas::new(65536);
        stage.render(&mut canvas);
        let blank = canvas.vertex_count();
        stage.brush_at(Vec2::new(55.0, 55.0), &mut ctx);
        canvas.clear();
        stage.render(&mut canvas);
        assert_eq!(canvas.vertex_count(), blank + 6);
    }
}
