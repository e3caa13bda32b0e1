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

const REGIONS: &[InputRegion] = &[InputRegion::interactive("printing-paper", RegionKind::CoverageSurface)];

/// Print quality from the rub count and the ink on the block.
pub fn print_quality(rub_count: f32, full_count: f32, ink_level: f32) -> f32 {
    if full_count <= 0.0 {
        return 0.0;
    }
    ((rub_count / full_count) * 100.0 * (ink_level / 100.0)).clamp(0.0, 100.0)
}

/// Lay paper on the inked block, rub it, and reveal the print.
pub struct PrintingStage {
    ink_level: f32,
    grid: CoverageGrid,
    rub_count: f32,
    placed: bool,
    revealed: bool,
    rubbing: bool,
    increment: f32,
    full_count: f32,
    reveal_guard: f32,
    viewport: Viewport,
}

impl PrintingStage {
    pub fn new(config: &WorkshopConfig, ink_level: f32) -> Self {
        Self {
            ink_level: ink_level.clamp(0.0, 100.0),
            grid: CoverageGrid::new(),
            rub_count: 0.0,
            placed: false,
            revealed: false,
            rubbing: false,
            increment: config.rub_increment,
            full_count: config.rub_full_count,
            reveal_guard: config.reveal_guard,
            viewport: Viewport::new(config.surface_width, config.surface_height),
        }
    }

    pub fn quality(&self) -> f32 {
        print_quality(self.rub_count, self.full_count, self.ink_level)
    }

    pub fn rub_count(&self) -> f32 {
        self.rub_count
    }

    pub fn grid(&self) -> &CoverageGrid {
        &self.grid
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Opacity of the ink transferred to a cell.
    pub fn transfer_opacity(&self, gx: usize, gy: usize) -> f32 {
        if self.grid.is_covered(gx, gy) {
            (self.ink_level / 100.0).min(1.0)
        } else {
            0.0
        }
    }

    pub fn place_paper(&mut self) {
        if !self.revealed {
            self.placed = true;
        }
    }

    /// One rubbing move at a percent position. Ignored unless placed and not revealed.
    pub fn rub_at(&mut self, percent: Vec2, ctx: &mut StageContext) -> bool {
        if !self.placed || self.revealed {
            return false;
        }
        self.grid.mark(percent);
        self.rub_count += self.increment;
        self.emit_metric(ctx);
        true
    }

    /// Peel the paper off. Needs enough quality; rubbing is over afterwards.
    pub fn reveal(&mut self, ctx: &mut StageContext) -> Result<(), WorkshopError> {
        let quality = self.quality();
        if !self.placed || quality < self.reveal_guard {
            return Err(WorkshopError::guard(
                StageId::Printing,
                format!("print quality {quality:.1} < {:.0}", self.reveal_guard),
            ));
        }
        self.revealed = true;
        self.rubbing = false;
        log::info!("print revealed at quality {quality:.1}");
        ctx.emit_event(GameEvent::new(events::REVEALED, quality, 0.0, 0.0));
        Ok(())
    }

    /// Start over with a fresh sheet. Not possible once revealed.
    pub fn reset(&mut self, ctx: &mut StageContext) -> bool {
        if self.revealed {
            return false;
        }
        self.placed = false;
        self.grid.clear();
        self.rub_count = 0.0;
        log::debug!("printing reset");
        self.emit_metric(ctx);
        true
    }

    fn emit_metric(&self, ctx: &mut StageContext) {
        let quality = self.quality();
        let met = if quality >= self.reveal_guard { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(events::METRIC, quality, met, 0.0));
    }
}

impl Stage for PrintingStage {
    fn id(&self) -> StageId {
        StageId::Printing
    }

    fn regions(&self) -> &'static [InputRegion] {
        REGIONS
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut StageContext) {
        match event.phase {
            PointerPhase::Start => self.rubbing = self.placed && !self.revealed,
            PointerPhase::Move if self.rubbing => {
                let percent = CoverageGrid::clamp_percent(self.viewport.to_percent(event.pos));
                self.rub_at(percent, ctx);
            }
            PointerPhase::Move => {}
            PointerPhase::End | PointerPhase::Cancel => self.rubbing = false,
        }
    }

    fn on_action(&mut self, action: Action, ctx: &mut StageContext) {
        match action {
            Action::PlacePaper => self.place_paper(),
            Action::Reveal => {
                if let Err(err) = self.reveal(ctx) {
                    log::warn!("{err}");
                }
            }
            Action::Reset => {
                self.reset(ctx);
            }
            _ => {}
        }
    }

    fn render(&self, canvas: &mut SurfaceCanvas) {
        let size = self.viewport.surface_size();
        if !self.placed {
            canvas.wood_block(size);
            let cell = size / GRID_SIZE as f32;
            let alpha = (self.ink_level / 100.0).min(1.0) * 0.85;
            canvas.fill_rect(Vec2::ZERO, size.x, size.y, InkColor::INK.with_alpha(alpha * 0.5));
            canvas.stroke_rect(cell, size.x - 2.0 * cell.x, size.y - 2.0 * cell.y, 2.0, InkColor::TARGET);
            return;
        }
        canvas.fill_rect(Vec2::ZERO, size.x, size.y, InkColor::PAPER);
        let cell = size / GRID_SIZE as f32;
        // The finished print is as strong as its quality.
        let strength = if self.revealed { self.quality() / 100.0 } else { 1.0 };
        for (gx, gy) in self.grid.iter() {
            let opacity = self.transfer_opacity(gx, gy) * strength;
            let origin = Vec2::new(gx as f32, gy as f32) * cell;
            canvas.fill_rect(origin, cell.x, cell.y, InkColor::INK.with_alpha(opacity));
        }
        if self.revealed {
            canvas.stroke_rect(cell * 0.5, size.x - cell.x, size.y - cell.y, 2.0, InkColor::INK.with_alpha(0.6));
            let seal = Vec2::new(size.x - cell.x * 2.0, size.y - cell.y * 2.0);
            canvas.fill_rect(seal, cell.x, cell.y, InkColor::SEAL);
        }
    }

    fn metric(&self) -> Option<f32> {
        Some(self.quality())
    }

    fn completion(&self) -> Result<StagePayload, WorkshopError> {
        if !self.revealed {
            return Err(WorkshopError::guard(StageId::Printing, "print has not been revealed"));
        }
        Ok(StagePayload::Printing {
            quality: self.quality(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(ink: f32) -> (PrintingStage, StageContext) {
        (PrintingStage::new(&WorkshopConfig::default(), ink), StageContext::new(1))
    }

    fn rub(stage: &mut PrintingStage, ctx: &mut StageContext, moves: usize) {
        stage.on_pointer(PointerEvent::start(150.0, 150.0), ctx);
        for i in 0..moves {
            let x = (i * 11 % 300) as f32;
            stage.on_pointer(PointerEvent::moved(x, 150.0), ctx);
        }
        stage.on_pointer(PointerEvent::end(150.0, 150.0), ctx);
    }

    #[test]
    fn quality_formula() {
        assert_eq!(print_quality(80.0, 80.0, 100.0), 100.0);
        assert_eq!(print_quality(40.0, 80.0, 100.0), 50.0);
        assert_eq!(print_quality(80.0, 80.0, 50.0), 50.0);
        assert_eq!(print_quality(400.0, 80.0, 100.0), 100.0);
    }

    #[test]
    fn rubbing_requires_placed_paper() {
        let (mut stage, mut ctx) = stage(100.0);
        rub(&mut stage, &mut ctx, 10);
        assert_eq!(stage.rub_count(), 0.0);
        stage.on_action(Action::PlacePaper, &mut ctx);
        rub(&mut stage, &mut ctx, 10);
        assert_eq!(stage.rub_count(), 10.0);
    }

    #[test]
    fn half_ink_needs_twice_the_rubbing() {
        let (mut stage, mut ctx) = stage(50.0);
        stage.place_paper();
        rub(&mut stage, &mut ctx, 80);
        assert_eq!(stage.quality(), 50.0);
        rub(&mut stage, &mut ctx, 80);
        assert_eq!(stage.quality(), 100.0);
        rub(&mut stage, &mut ctx, 800);
        assert_eq!(stage.quality(), 100.0);
    }

    #[test]
    fn no_ink_never_prints() {
        assert_eq!(print_quality(10_000.0, 80.0, 0.0), 0.0);

        let (mut stage, mut ctx) = stage(0.0);
        stage.place_paper();
        rub(&mut stage, &mut ctx, 2000);
        assert_eq!(stage.rub_count(), 2000.0);
        assert_eq!(stage.quality(), 0.0);
        assert!(stage.reveal(&mut ctx).is_err());
        assert!(!stage.is_revealed());
        assert!(stage.completion().is_err());
    }

    #[test]
    fn full_rub_with_thirty_ink_scores_thirty() {
        let (mut stage, mut ctx) = stage(30.0);
        stage.place_paper();
        rub(&mut stage, &mut ctx, 80);
        assert!((stage.quality() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn reveal_needs_quality() {
        let (mut stage, mut ctx) = stage(100.0);
        stage.place_paper();
        rub(&mut stage, &mut ctx, 20);
        assert!(stage.reveal(&mut ctx).is_err());
        assert!(stage.completion().is_err());
        rub(&mut stage, &mut ctx, 10);
        // 30 rubs at full ink → 37.5
        stage.reveal(&mut ctx).unwrap();
        assert_eq!(
            stage.completion().unwrap(),
            StagePayload::Printing { quality: 37.5 }
        );
    }

    #[test]
    fn reveal_freezes_rubbing_and_reset() {
        let (mut stage, mut ctx) = stage(100.0);
        stage.place_paper();
        rub(&mut stage, &mut ctx, 40);
        stage.on_action(Action::Reveal, &mut ctx);
        assert!(stage.is_revealed());
        let count = stage.rub_count();
        rub(&mut stage, &mut ctx, 40);
        assert_eq!(stage.rub_count(), count);
        assert!(!stage.reset(&mut ctx));
        assert!(stage.is_placed());
    }

    #[test]
    fn reset_before_reveal_starts_over() {
        let (mut stage, mut ctx) = stage(100.0);
        stage.place_paper();
        rub(&mut stage, &mut ctx, 40);
        stage.on_action(Action::Reset, &mut ctx);
        assert!(!stage.is_placed());
        assert_eq!(stage.rub_count(), 0.0);
        assert!(stage.grid().is_empty());
        assert_eq!(stage.quality(), 0.0);
    }

    #[test]
    fn transfer_follows_ink() {
        let (mut stage, mut ctx) = stage(60.0);
        stage.place_paper();
        stage.rub_at(Vec2::new(5.0, 5.0), &mut ctx);
        assert_eq!(stage.transfer_opacity(0, 0), 0.6);
        assert_eq!(stage.transfer_opacity(1, 0), 0.0);
    }

    #[test]
    fn reveal_shows_the_finished_print() {
        let (mut stage, mut ctx) = stage(100.0);
        stage.place_paper();
        rub(&mut stage, &mut ctx, 80);
        let has_seal = |canvas: &SurfaceCanvas| {
            canvas.vertices().iter().any(|v| v.r == InkColor::SEAL.r && v.g == InkColor::SEAL.g)
        };

        let mut canvas = SurfaceCanvas::new(65536);
        stage.render(&mut canvas);
        assert!(!has_seal(&canvas));
        let before = canvas.vertex_count();

        stage.reveal(&mut ctx).unwrap();
        canvas.clear();
        stage.render(&mut canvas);
        assert!(has_seal(&canvas));
        assert!(canvas.vertex_count() > before);
    }
}
