use glam::Vec2;
use serde::Serialize;

use crate::api::stage::{Stage, StageContext, StagePayload};
use crate::api::types::{events, GameEvent, StageId};
use crate::catalog::{GlyphCatalog, StageCatalog};
use crate::config::WorkshopConfig;
use crate::error::WorkshopError;
use crate::input::actions::Action;
use crate::input::queue::InputEvent;
use crate::input::region::InputRegion;
use crate::input::tracker::PointerTracker;
use crate::input::viewport::Viewport;
use crate::render::canvas::SurfaceCanvas;
use crate::stages::complete::{star_rating, Rating};
use crate::stages::controller_for;
use crate::state::GameState;

/// One entry of the five-step progress indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressMarker {
    pub stage: StageId,
    pub name: String,
    pub icon: String,
    pub completed: bool,
    pub current: bool,
}

/// Owns the game state and the active stage controller.
///
/// `GameState` only changes through [`Workshop::start`],
/// [`Workshop::complete_stage`] and [`Workshop::restart`]; every transition
/// replaces it whole and rebuilds the controller, discarding stage-local buffers.
pub struct Workshop {
    config: WorkshopConfig,
    glyphs: GlyphCatalog,
    labels: StageCatalog,
    state: GameState,
    controller: Option<Box<dyn Stage>>,
    ctx: StageContext,
    viewport: Viewport,
    tracker: PointerTracker,
}

impl Workshop {
    pub fn new(config: WorkshopConfig) -> Self {
        Self::with_catalogs(config, GlyphCatalog::default(), StageCatalog::default())
    }

    pub fn with_catalogs(config: WorkshopConfig, glyphs: GlyphCatalog, labels: StageCatalog) -> Self {
        let viewport = Viewport::new(config.surface_width, config.surface_height);
        let ctx = StageContext::new(config.seed);
        Self {
            config,
            glyphs,
            labels,
            state: GameState::initial(),
            controller: None,
            ctx,
            viewport,
            tracker: PointerTracker::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_stage(&self) -> StageId {
        self.state.current_stage
    }

    pub fn config(&self) -> &WorkshopConfig {
        &self.config
    }

    pub fn glyphs(&self) -> &GlyphCatalog {
        &self.glyphs
    }

    /// The active stage controller (none during the intro).
    pub fn controller(&self) -> Option<&dyn Stage> {
        self.controller.as_deref()
    }

    /// Leave the intro and enter the writing stage.
    pub fn start(&mut self) -> Result<&GameState, WorkshopError> {
        if self.state.current_stage != StageId::Intro {
            return Err(self.reject(StageId::Writing));
        }
        self.state = GameState {
            current_stage: StageId::Writing,
            ..self.state.clone()
        };
        self.enter();
        Ok(&self.state)
    }

    /// Complete `stage` with its payload and advance to the next stage.
    ///
    /// Completing any stage but the current one is rejected and changes nothing.
    pub fn complete_stage(
        &mut self,
        stage: StageId,
        payload: StagePayload,
    ) -> Result<&GameState, WorkshopError> {
        let current = self.state.current_stage;
        if stage != current || !stage.is_craft() {
            return Err(self.reject(stage));
        }
        if payload.stage() != stage {
            log::warn!("payload for {} handed to {stage}", payload.stage());
            return Err(WorkshopError::PayloadMismatch { stage });
        }
        self.state = self.state.advanced(payload);
        log::info!(
            "{stage} complete, score {} -> next stage {}",
            self.state.score,
            self.state.current_stage
        );
        self.enter();
        Ok(&self.state)
    }

    /// Ask the active controller for its payload and complete its stage.
    pub fn request_completion(&mut self) -> Result<&GameState, WorkshopError> {
        let current = self.state.current_stage;
        let payload = match self.controller.as_deref() {
            Some(stage) if current.is_craft() => stage.completion()?,
            _ => return Err(self.reject(current)),
        };
        self.complete_stage(current, payload)
    }

    /// Back to the initial state.
    pub fn restart(&mut self) -> &GameState {
        log::info!("workshop restarted from {}", self.state.current_stage);
        self.state = GameState::initial();
        self.enter();
        &self.state
    }

    /// Route one host input event.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), WorkshopError> {
        match event {
            InputEvent::Pointer(mut pointer) => {
                pointer.pos = self.viewport.to_surface(pointer.pos);
                let Some(pointer) = self.tracker.resolve(pointer) else {
                    return Ok(());
                };
                if let Some(stage) = self.controller.as_mut() {
                    stage.on_pointer(pointer, &mut self.ctx);
                }
                Ok(())
            }
            InputEvent::Custom { kind, a, .. } => match Action::from_custom(kind, a) {
                Some(action) => self.handle_action(action),
                None => {
                    log::warn!("ignoring unknown custom event kind {kind}");
                    Ok(())
                }
            },
        }
    }

    /// Apply a UI action. Transitions are handled here, the rest goes to the stage.
    pub fn handle_action(&mut self, action: Action) -> Result<(), WorkshopError> {
        match action {
            Action::Start => self.start().map(|_| ()),
            Action::Complete => self.request_completion().map(|_| ()),
            Action::Restart => {
                self.restart();
                Ok(())
            }
            other => {
                if let Some(stage) = self.controller.as_mut() {
                    stage.on_action(other, &mut self.ctx);
                }
                Ok(())
            }
        }
    }

    /// Advance stage timers and cosmetic motion by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if let Some(stage) = self.controller.as_mut() {
            stage.tick(dt, &mut self.ctx);
        }
    }

    pub fn render(&self, canvas: &mut SurfaceCanvas) {
        if let Some(stage) = self.controller.as_deref() {
            stage.render(canvas);
        }
    }

    /// Regions of the active stage the host must shield from page scrolling.
    pub fn regions(&self) -> &'static [InputRegion] {
        match self.controller.as_deref() {
            Some(stage) => stage.regions(),
            None => &[],
        }
    }

    /// The progress indicator. Hidden (empty) on the intro and result screens.
    pub fn progress_markers(&self) -> Vec<ProgressMarker> {
        if !self.state.current_stage.is_craft() {
            return Vec::new();
        }
        StageId::CRAFT
            .iter()
            .map(|&stage| {
                let (name, icon) = match self.labels.label(stage) {
                    Some(label) => (label.name.clone(), label.icon.clone()),
                    None => (stage.as_str().to_string(), String::new()),
                };
                ProgressMarker {
                    stage,
                    name,
                    icon,
                    completed: self.state.completed_stages.contains(&stage),
                    current: self.state.current_stage == stage,
                }
            })
            .collect()
    }

    /// The final rating, once the result screen is reached.
    pub fn rating(&self) -> Option<Rating> {
        (self.state.current_stage == StageId::Complete).then(|| Rating::for_state(&self.state))
    }

    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.viewport.set_display_size(width, height);
    }

    pub fn surface_size(&self) -> Vec2 {
        self.viewport.surface_size()
    }

    /// Take all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.ctx.drain_events()
    }

    fn reject(&self, requested: StageId) -> WorkshopError {
        let current = self.state.current_stage;
        log::warn!("rejected transition to {requested} while in {current}");
        WorkshopError::InvalidTransition { current, requested }
    }

    /// Build the controller for the new current stage and announce it.
    fn enter(&mut self) {
        self.tracker.reset();
        self.controller = controller_for(&self.state, &self.config, &self.glyphs);
        let stage = self.state.current_stage;
        self.ctx.emit_event(GameEvent::new(events::STAGE_ENTERED, stage.code() as f32, 0.0, 0.0));
        if stage == StageId::Complete {
            let stars = star_rating(self.state.score);
            self.ctx.emit_event(GameEvent::new(
                events::RATING,
                stars as f32,
                self.state.score as f32,
                0.0,
            ));
        }
    }
}
