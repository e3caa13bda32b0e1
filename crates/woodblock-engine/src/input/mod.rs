pub mod actions;
pub mod queue;
pub mod region;
pub mod tracker;
pub mod viewport;

pub use actions::Action;
pub use queue::{InputEvent, InputQueue, PointerEvent, PointerPhase};
pub use region::{InputRegion, RegionKind};
pub use tracker::PointerTracker;
pub use viewport::Viewport;
