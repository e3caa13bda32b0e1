pub mod api;
pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod primitives;
pub mod render;
pub mod stages;
pub mod state;
pub mod workshop;

// Re-export key types at crate root for convenience
pub use api::stage::{Stage, StageContext, StagePayload};
pub use api::types::{events, GameEvent, StageId};
pub use catalog::{GlyphCatalog, StageCatalog, StageLabel};
pub use config::WorkshopConfig;
pub use crate::core::rng::Rng;
pub use crate::core::time::{FixedTimestep, IntervalTimer};
pub use error::WorkshopError;
pub use input::actions::{kinds, Action};
pub use input::queue::{InputEvent, InputQueue, PointerEvent, PointerPhase};
pub use input::region::{InputRegion, RegionKind};
pub use render::canvas::{InkColor, SurfaceCanvas, SurfaceVertex};
pub use stages::{CarvingTool, InkFeedback, Rating};
pub use state::{CarvePoint, CarveStroke, GameState};
pub use workshop::{ProgressMarker, Workshop};

// Extensions: cosmetic motion, never consulted by gameplay rules
pub use extensions::{lerp, Easing, Spring, Transition};
