use crate::api::types::{GameEvent, StageId};
use crate::core::rng::Rng;
use crate::error::WorkshopError;
use crate::input::actions::Action;
use crate::input::queue::PointerEvent;
use crate::input::region::InputRegion;
use crate::render::canvas::SurfaceCanvas;
use crate::state::CarveStroke;

/// The result a stage hands to the orchestrator when it completes.
#[derive(Debug, Clone, PartialEq)]
pub enum StagePayload {
    Writing { glyph: String },
    Mounting,
    Carving { paths: Vec<CarveStroke> },
    Inking { ink_level: f32 },
    Printing { quality: f32 },
}

impl StagePayload {
    /// The stage this payload belongs to.
    pub fn stage(&self) -> StageId {
        match self {
            StagePayload::Writing { .. } => StageId::Writing,
            StagePayload::Mounting => StageId::Mounting,
            StagePayload::Carving { .. } => StageId::Carving,
            StagePayload::Inking { .. } => StageId::Inking,
            StagePayload::Printing { .. } => StageId::Printing,
        }
    }
}

/// The contract every stage controller fulfills.
///
/// A controller owns all stage-local buffers. It is built when its stage
/// becomes current and dropped when the stage completes, so nothing it holds
/// outlives the stage.
pub trait Stage {
    fn id(&self) -> StageId;

    /// Interactive regions the host must keep free of page scrolling.
    fn regions(&self) -> &'static [InputRegion] {
        &[]
    }

    /// A pointer sample in surface units, already resolved to the tracked pointer.
    fn on_pointer(&mut self, _event: PointerEvent, _ctx: &mut StageContext) {}

    /// A stage-local UI action (clear, undo, flip, ...).
    fn on_action(&mut self, _action: Action, _ctx: &mut StageContext) {}

    /// Advance stage-local timers and cosmetic motion by `dt` seconds.
    fn tick(&mut self, _dt: f32, _ctx: &mut StageContext) {}

    /// Tessellate the stage surface.
    fn render(&self, _canvas: &mut SurfaceCanvas) {}

    /// The headline progress metric (0-100), if the stage has one.
    fn metric(&self) -> Option<f32> {
        None
    }

    /// Check the completion guard and produce the payload.
    fn completion(&self) -> Result<StagePayload, WorkshopError>;
}

/// Mutable services passed to stage controllers.
pub struct StageContext {
    pub events: Vec<GameEvent>,
    pub rng: Rng,
}

impl StageContext {
    pub fn new(seed: u64) -> Self {
        Self {
            events: Vec::new(),
            rng: Rng::new(seed),
        }
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_knows_its_stage() {
        assert_eq!(StagePayload::Mounting.stage(), StageId::Mounting);
        assert_eq!(
            StagePayload::Inking { ink_level: 40.0 }.stage(),
            StageId::Inking
        );
    }

    #[test]
    fn context_collects_events() {
        let mut ctx = StageContext::new(1);
        ctx.emit_event(GameEvent::new(1.0, 2.0, 0.0, 0.0));
        assert_eq!(ctx.drain_events().len(), 1);
        assert!(ctx.events.is_empty());
    }
}
