use glam::Vec2;

use crate::api::stage::{Stage, StageContext, StagePayload};
use crate::api::types::{events, GameEvent, StageId};
use crate::catalog::GlyphCatalog;
use crate::config::WorkshopConfig;
use crate::error::WorkshopError;
use crate::input::actions::Action;
use crate::input::queue::{PointerEvent, PointerPhase};
use crate::input::region::{InputRegion, RegionKind};
use crate::primitives::stroke::StrokeRecorder;
use crate::render::canvas::{InkColor, SurfaceCanvas};

const REGIONS: &[InputRegion] = &[InputRegion::interactive("writing-canvas", RegionKind::Canvas)];

/// Brush calligraphy on xuan paper over a faint reference glyph.
pub struct WritingStage {
    glyphs: GlyphCatalog,
    selected: usize,
    recorder: StrokeRecorder,
    bleed_chance: f32,
    surface: Vec2,
}

impl WritingStage {
    pub fn new(config: &WorkshopConfig, glyphs: GlyphCatalog) -> Self {
        Self {
            glyphs,
            selected: 0,
            recorder: StrokeRecorder::new(config.brush_width),
            bleed_chance: config.bleed_chance,
            surface: Vec2::new(config.surface_width, config.surface_height),
        }
    }

    pub fn selected_glyph(&self) -> &str {
        self.glyphs.get(self.selected).unwrap_or_else(|| self.glyphs.first())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn recorder(&self) -> &StrokeRecorder {
        &self.recorder
    }

    /// Switch the reference glyph. The surface is wiped.
    pub fn select_glyph(&mut self, index: usize, ctx: &mut StageContext) -> bool {
        if index >= self.glyphs.len() {
            log::warn!("glyph index {index} out of range ({} glyphs)", self.glyphs.len());
            return false;
        }
        self.selected = index;
        self.clear(ctx);
        true
    }

    /// Wipe the surface without changing the glyph.
    pub fn clear(&mut self, ctx: &mut StageContext) {
        self.recorder.clear();
        log::debug!("writing surface cleared");
        ctx.emit_event(GameEvent::new(events::SURFACE_CLEARED, self.selected as f32, 0.0, 0.0));
        ctx.emit_event(GameEvent::new(events::METRIC, 0.0, 0.0, 0.0));
    }
}

impl Stage for WritingStage {
    fn id(&self) -> StageId {
        StageId::Writing
    }

    fn regions(&self) -> &'static [InputRegion] {
        REGIONS
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut StageContext) {
        match event.phase {
            PointerPhase::Start => {
                let first = !self.recorder.has_drawn();
                self.recorder.begin(event.pos);
                if first {
                    ctx.emit_event(GameEvent::new(events::METRIC, 100.0, 1.0, 0.0));
                }
            }
            PointerPhase::Move => {
                self.recorder.extend(event.pos, &mut ctx.rng, self.bleed_chance);
            }
            PointerPhase::End | PointerPhase::Cancel => self.recorder.end(),
        }
    }

    fn on_action(&mut self, action: Action, ctx: &mut StageContext) {
        match action {
            Action::SelectGlyph(index) => {
                self.select_glyph(index, ctx);
            }
            Action::SetBrushWidth(width) => self.recorder.set_width(width),
            Action::Reset => self.clear(ctx),
            _ => {}
        }
    }

    fn render(&self, canvas: &mut SurfaceCanvas) {
        canvas.fill_rect(Vec2::ZERO, self.surface.x, self.surface.y, InkColor::PAPER);
        // 田 grid guide
        let guide = InkColor::rgb8(200, 180, 150).with_alpha(0.3);
        let (w, h) = (self.surface.x, self.surface.y);
        canvas.stroke_rect(Vec2::splat(1.0), w - 2.0, h - 2.0, 1.0, guide);
        canvas.stroke_segment(Vec2::new(w / 2.0, 0.0), Vec2::new(w / 2.0, h), 1.0, guide);
        canvas.stroke_segment(Vec2::new(0.0, h / 2.0), Vec2::new(w, h / 2.0), 1.0, guide);
        self.recorder.render(canvas);
    }

    fn metric(&self) -> Option<f32> {
        Some(if self.recorder.has_drawn() { 100.0 } else { 0.0 })
    }

    fn completion(&self) -> Result<StagePayload, WorkshopError> {
        if !self.recorder.has_drawn() {
            return Err(WorkshopError::guard(StageId::Writing, "nothing has been written"));
        }
        Ok(StagePayload::Writing {
            glyph: self.selected_glyph().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> (WritingStage, StageContext) {
        (
            WritingStage::new(&WorkshopConfig::default(), GlyphCatalog::default()),
            StageContext::new(7),
        )
    }

    fn scribble(stage: &mut WritingStage, ctx: &mut StageContext) {
        stage.on_pointer(PointerEvent::start(100.0, 100.0), ctx);
        stage.on_pointer(PointerEvent::moved(120.0, 110.0), ctx);
        stage.on_pointer(PointerEvent::moved(140.0, 130.0), ctx);
        stage.on_pointer(PointerEvent::end(140.0, 130.0), ctx);
    }

    #[test]
    fn blank_surface_cannot_complete() {
        let (stage, _) = stage();
        assert!(matches!(
            stage.completion(),
            Err(WorkshopError::GuardViolation { stage: StageId::Writing, .. })
        ));
    }

    #[test]
    fn stroke_enables_completion_with_selected_glyph() {
        let (mut stage, mut ctx) = stage();
        scribble(&mut stage, &mut ctx);
        assert_eq!(stage.recorder().segments().len(), 2);
        assert_eq!(
            stage.completion().unwrap(),
            StagePayload::Writing { glyph: "福".into() }
        );
    }

    #[test]
    fn selecting_a_glyph_wipes_the_surface() {
        let (mut stage, mut ctx) = stage();
        scribble(&mut stage, &mut ctx);
        stage.on_action(Action::SelectGlyph(4), &mut ctx);
        assert_eq!(stage.selected_glyph(), "春");
        assert!(!stage.recorder().has_drawn());
        assert!(stage.completion().is_err());

        scribble(&mut stage, &mut ctx);
        assert_eq!(
            stage.completion().unwrap(),
            StagePayload::Writing { glyph: "春".into() }
        );
    }

    #[test]
    fn out_of_range_glyph_is_ignored() {
        let (mut stage, mut ctx) = stage();
        scribble(&mut stage, &mut ctx);
        assert!(!stage.select_glyph(99, &mut ctx));
        assert_eq!(stage.selected_index(), 0);
        assert!(stage.recorder().has_drawn());
    }

    #[test]
    fn reset_keeps_glyph() {
        let (mut stage, mut ctx) = stage();
        stage.on_action(Action::SelectGlyph(2), &mut ctx);
        scribble(&mut stage, &mut ctx);
        stage.on_action(Action::Reset, &mut ctx);
        assert_eq!(stage.selected_glyph(), "寿");
        assert_eq!(stage.metric(), Some(0.0));
    }

    #[test]
    fn brush_width_applies_to_new_segments() {
        let (mut stage, mut ctx) = stage();
        stage.on_action(Action::SetBrushWidth(30.0), &mut ctx);
        scribble(&mut stage, &mut ctx);
        assert!(stage.recorder().segments().iter().all(|s| s.width == 20.0));
    }

    #[test]
    fn renders_paper_and_ink() {
        let (mut stage, mut ctx) = stage();
        let mut canvas = SurfaceCanvas::new(65536);
        stage.render(&mut canvas);
        let blank = canvas.vertex_count();
        scribble(&mut stage, &mut ctx);
        canvas.clear();
        stage.render(&mut canvas);
        assert!(canvas.vertex_count() > blank);
    }
}
