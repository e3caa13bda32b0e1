use serde::{Deserialize, Serialize};

use crate::api::stage::StagePayload;
use crate::api::types::StageId;
use crate::catalog::PLACEHOLDER_GLYPH;

/// Score awarded for finishing the writing stage.
pub const WRITING_POINTS: u32 = 20;
/// Score awarded for mounting the paper.
pub const MOUNTING_POINTS: u32 = 20;
/// Base score for carving, before the force bonus.
pub const CARVING_POINTS: u32 = 20;

/// One sample of a carve stroke. `force` is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarvePoint {
    pub x: f32,
    pub y: f32,
    pub force: f32,
}

impl CarvePoint {
    pub fn new(x: f32, y: f32, force: f32) -> Self {
        Self { x, y, force }
    }
}

/// A committed carve stroke: the samples of one press-drag-release.
pub type CarveStroke = Vec<CarvePoint>;

/// Cross-stage record of the user's journey.
///
/// Owned by the orchestrator and replaced whole on every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub current_stage: StageId,
    /// Append-only; only ever holds crafting stages.
    pub completed_stages: Vec<StageId>,
    pub score: u32,
    pub written_text: String,
    pub carved_paths: Vec<CarveStroke>,
    pub ink_level: f32,
    pub print_quality: f32,
}

impl GameState {
    pub fn initial() -> Self {
        Self {
            current_stage: StageId::Intro,
            completed_stages: Vec::new(),
            score: 0,
            written_text: PLACEHOLDER_GLYPH.to_string(),
            carved_paths: Vec::new(),
            ink_level: 0.0,
            print_quality: 0.0,
        }
    }

    /// The state after the current stage completed with `payload`.
    ///
    /// The caller has already checked that `payload` belongs to the current stage.
    pub fn advanced(&self, payload: StagePayload) -> Self {
        let stage = payload.stage();
        let mut next = self.clone();
        next.current_stage = stage.successor().unwrap_or(StageId::Complete);
        next.completed_stages.push(stage);
        next.score += score_delta(&payload);
        match payload {
            StagePayload::Writing { glyph } => next.written_text = glyph,
            StagePayload::Mounting => {}
            StagePayload::Carving { paths } => next.carved_paths = paths,
            StagePayload::Inking { ink_level } => next.ink_level = ink_level.clamp(0.0, 100.0),
            StagePayload::Printing { quality } => next.print_quality = quality.clamp(0.0, 100.0),
        }
        next
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Mean force over every sample of every stroke; 0 when there are none.
pub fn mean_force(paths: &[CarveStroke]) -> f32 {
    let (sum, count) = paths
        .iter()
        .flatten()
        .fold((0.0f32, 0usize), |(s, n), p| (s + p.force, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// Score increment for completing a stage with `payload`.
pub fn score_delta(payload: &StagePayload) -> u32 {
    let points = |v: f32| v.max(0.0).round() as u32;
    match payload {
        StagePayload::Writing { .. } => WRITING_POINTS,
        StagePayload::Mounting => MOUNTING_POINTS,
        StagePayload::Carving { paths } => CARVING_POINTS + points(10.0 * mean_force(paths)),
        StagePayload::Inking { ink_level } => points(0.2 * ink_level.clamp(0.0, 100.0)),
        StagePayload::Printing { quality } => points(0.2 * quality.clamp(0.0, 100.0)),
    }
}
