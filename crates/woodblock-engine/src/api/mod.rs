pub mod stage;
pub mod types;

pub use stage::{Stage, StageContext, StagePayload};
pub use types::{events, GameEvent, StageId};
