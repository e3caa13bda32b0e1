use glam::Vec2;

use crate::api::stage::{Stage, StageContext, StagePayload};
use crate::api::types::{events, GameEvent, StageId};
use crate::config::WorkshopConfig;
use crate::error::WorkshopError;
use crate::input::actions::Action;
use crate::input::queue::{PointerEvent, PointerPhase};
use crate::input::region::{InputRegion, RegionKind};
use crate::primitives::placement::PlacementController;
use crate::render::canvas::{InkColor, SurfaceCanvas};

const REGIONS: &[InputRegion] = &[
    InputRegion::interactive("mounting-block", RegionKind::Draggable),
    InputRegion::interactive("mounting-paper", RegionKind::Draggable),
];

/// Paste the written sheet face down onto the wood block.
pub struct MountingStage {
    paper: PlacementController,
    surface: Vec2,
}

impl MountingStage {
    pub fn new(config: &WorkshopConfig) -> Self {
        Self {
            paper: PlacementController::new(
                Vec2::from(config.paper_home),
                config.mount_tolerance,
                config.paper_half_size,
            ),
            surface: Vec2::new(config.surface_width, config.surface_height),
        }
    }

    pub fn paper(&self) -> &PlacementController {
        &self.paper
    }

    /// Surface position → offset from the block centre.
    fn to_block(&self, pos: Vec2) -> Vec2 {
        pos - self.surface / 2.0
    }
}

impl Stage for MountingStage {
    fn id(&self) -> StageId {
        StageId::Mounting
    }

    fn regions(&self) -> &'static [InputRegion] {
        REGIONS
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut StageContext) {
        let pos = self.to_block(event.pos);
        match event.phase {
            PointerPhase::Start => {
                self.paper.grab(pos);
            }
            PointerPhase::Move => {
                self.paper.drag_to(pos);
            }
            PointerPhase::End | PointerPhase::Cancel => {
                if self.paper.release() {
                    log::info!("paper mounted");
                    ctx.emit_event(GameEvent::new(events::MOUNTED, 0.0, 0.0, 0.0));
                    ctx.emit_event(GameEvent::new(events::METRIC, 100.0, 1.0, 0.0));
                }
            }
        }
    }

    fn on_action(&mut self, action: Action, _ctx: &mut StageContext) {
        if action == Action::Flip && !self.paper.flip() {
            log::debug!("flip ignored, paper already mounted");
        }
    }

    fn tick(&mut self, dt: f32, _ctx: &mut StageContext) {
        self.paper.tick(dt);
    }

    fn render(&self, canvas: &mut SurfaceCanvas) {
        canvas.wood_block(self.surface);

        let center = self.surface / 2.0;
        let half = self.paper.half_size();
        canvas.stroke_rect(center - half, half * 2.0, half * 2.0, 2.0, InkColor::TARGET);

        // The sheet narrows to nothing mid-flip, then widens showing its back.
        let turn = self.paper.flip_progress();
        let squash = (1.0 - 2.0 * turn).abs();
        let paper_center = center + self.paper.display_offset();
        let size = Vec2::new(half * 2.0 * squash, half * 2.0);
        let face = if turn < 0.5 {
            InkColor::PAPER
        } else {
            InkColor::rgb8(232, 224, 208)
        };
        canvas.fill_rect(paper_center - size / 2.0, size.x, size.y, face.with_alpha(0.95));
    }

    fn metric(&self) -> Option<f32> {
        Some(if self.paper.mounted() { 100.0 } else { 0.0 })
    }

    fn completion(&self) -> Result<StagePayload, WorkshopError> {
        if !self.paper.mounted() {
            return Err(WorkshopError::guard(StageId::Mounting, "paper is not mounted"));
        }
        Ok(StagePayload::Mounting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Block centre is (150, 150); the paper starts at (150, 0).
    fn drag(stage: &mut MountingStage, ctx: &mut StageContext, from: Vec2, to: Vec2) {
        stage.on_pointer(PointerEvent::start(from.x, from.y), ctx);
        stage.on_pointer(PointerEvent::moved(to.x, to.y), ctx);
        stage.on_pointer(PointerEvent::end(to.x, to.y), ctx);
    }

    #[test]
    fn flip_then_drag_onto_block_mounts() {
        let mut stage = MountingStage::new(&WorkshopConfig::default());
        let mut ctx = StageContext::new(1);
        stage.on_action(Action::Flip, &mut ctx);
        drag(&mut stage, &mut ctx, Vec2::new(150.0, 0.0), Vec2::new(160.0, 160.0));
        assert!(stage.paper().mounted());
        assert_eq!(stage.paper().offset(), Vec2::ZERO);
        assert_eq!(stage.completion().unwrap(), StagePayload::Mounting);
        assert!(ctx.events.iter().any(|e| e.kind == events::MOUNTED));
    }

    #[test]
    fn unflipped_sheet_does_not_mount() {
        let mut stage = MountingStage::new(&WorkshopConfig::default());
        let mut ctx = StageContext::new(1);
        drag(&mut stage, &mut ctx, Vec2::new(150.0, 0.0), Vec2::new(160.0, 160.0));
        assert!(!stage.paper().mounted());
        assert_eq!(stage.paper().offset(), Vec2::new(10.0, 10.0));
        assert!(stage.completion().is_err());
    }

    #[test]
    fn cancel_counts_as_release() {
        let mut stage = MountingStage::new(&WorkshopConfig::default());
        let mut ctx = StageContext::new(1);
        stage.on_action(Action::Flip, &mut ctx);
        stage.on_pointer(PointerEvent::start(150.0, 0.0), &mut ctx);
        stage.on_pointer(PointerEvent::moved(150.0, 150.0), &mut ctx);
        stage.on_pointer(PointerEvent::cancel(150.0, 150.0), &mut ctx);
        assert!(stage.paper().mounted());
    }

    #[test]
    fn flip_is_locked_after_mounting() {
        let mut stage = MountingStage::new(&WorkshopConfig::default());
        let mut ctx = StageContext::new(1);
        stage.on_action(Action::Flip, &mut ctx);
        drag(&mut stage, &mut ctx, Vec2::new(150.0, 0.0), Vec2::new(150.0, 150.0));
        stage.on_action(Action::Flip, &mut ctx);
        assert!(stage.paper().flipped());
    }

    #[test]
    fn renders_block_and_paper() {
        let mut stage = MountingStage::new(&WorkshopConfig::default());
        let mut ctx = StageContext::new(1);
        stage.tick(1.0 / 60.0, &mut ctx);
        let mut canvas = SurfaceCanvas::new(65536);
        stage.render(&mut canvas);
        assert!(canvas.vertex_count() > 0);
    }
}
