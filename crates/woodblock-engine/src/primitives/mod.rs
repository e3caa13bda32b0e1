//! Reusable interaction primitives the stage controllers are built from.

pub mod coverage;
pub mod force;
pub mod placement;
pub mod stroke;

pub use coverage::CoverageGrid;
pub use force::{ForceAccumulator, ForceLevel};
pub use placement::PlacementController;
pub use stroke::StrokeRecorder;
