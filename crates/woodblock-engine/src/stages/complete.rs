use serde::Serialize;

use crate::api::stage::{Stage, StagePayload};
use crate::api::types::StageId;
use crate::error::WorkshopError;
use crate::state::GameState;

/// Star rating (1-5) for a cumulative score.
pub fn star_rating(score: u32) -> u32 {
    match score {
        90.. => 5,
        70..=89 => 4,
        50..=69 => 3,
        30..=49 => 2,
        _ => 1,
    }
}

/// Closing remark for a star rating.
pub fn rating_message(stars: u32) -> &'static str {
    match stars {
        5 => "精妙绝伦！堪比古代大师！",
        4 => "技艺精湛！已得雕版真传！",
        3 => "初窥门径！继续努力！",
        2 => "略有小成！再接再厉！",
        _ => "学徒之路！从头开始吧！",
    }
}

/// Summary of a finished run, as shown on the result screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub score: u32,
    pub stars: u32,
    pub message: &'static str,
    pub glyph: String,
    pub print_quality: f32,
}

impl Rating {
    pub fn for_state(state: &GameState) -> Self {
        let stars = star_rating(state.score);
        Self {
            score: state.score,
            stars,
            message: rating_message(stars),
            glyph: state.written_text.clone(),
            print_quality: state.print_quality,
        }
    }
}

/// Result screen. Only a restart leaves it, and that is handled by the workshop.
pub struct CompleteStage {
    rating: Rating,
}

impl CompleteStage {
    pub fn new(state: &GameState) -> Self {
        Self {
            rating: Rating::for_state(state),
        }
    }

    pub fn rating(&self) -> &Rating {
        &self.rating
    }
}

impl Stage for CompleteStage {
    fn id(&self) -> StageId {
        StageId::Complete
    }

    fn completion(&self) -> Result<StagePayload, WorkshopError> {
        Err(WorkshopError::InvalidTransition {
            current: StageId::Complete,
            requested: StageId::Complete,
        })
    }
}
