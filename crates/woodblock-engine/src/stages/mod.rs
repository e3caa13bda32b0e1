pub mod carving;
pub mod complete;
pub mod inking;
pub mod mounting;
pub mod printing;
pub mod writing;

pub use carving::{CarvingStage, CarvingTool};
pub use complete::{CompleteStage, Rating};
pub use inking::{InkFeedback, InkingStage};
pub use mounting::MountingStage;
pub use printing::PrintingStage;
pub use writing::WritingStage;

use crate::api::stage::Stage;
use crate::api::types::StageId;
use crate::catalog::GlyphCatalog;
use crate::config::WorkshopConfig;
use crate::state::GameState;

/// Build a fresh controller for the current stage of `state`.
/// The intro has no controller.
pub fn controller_for(
    state: &GameState,
    config: &WorkshopConfig,
    glyphs: &GlyphCatalog,
) -> Option<Box<dyn Stage>> {
    let stage: Box<dyn Stage> = match state.current_stage {
        StageId::Intro => return None,
        StageId::Writing => Box::new(WritingStage::new(config, glyphs.clone())),
        StageId::Mounting => Box::new(MountingStage::new(config)),
        StageId::Carving => Box::new(CarvingStage::new(config)),
        StageId::Inking => Box::new(InkingStage::new(config)),
        StageId::Printing => Box::new(PrintingStage::new(config, state.ink_level)),
        StageId::Complete => Box::new(CompleteStage::new(state)),
    };
    Some(stage)
}
