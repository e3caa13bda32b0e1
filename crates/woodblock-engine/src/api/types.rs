use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Identifies a stage of the workshop, including the intro/complete bookends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageId {
    Intro,
    Writing,
    Mounting,
    Carving,
    Inking,
    Printing,
    Complete,
}

impl StageId {
    /// The five crafting stages in their fixed order.
    pub const CRAFT: [StageId; 5] = [
        StageId::Writing,
        StageId::Mounting,
        StageId::Carving,
        StageId::Inking,
        StageId::Printing,
    ];

    /// The stage that follows this one, or `None` for `Complete`.
    pub fn successor(self) -> Option<StageId> {
        match self {
            StageId::Intro => Some(StageId::Writing),
            StageId::Writing => Some(StageId::Mounting),
            StageId::Mounting => Some(StageId::Carving),
            StageId::Carving => Some(StageId::Inking),
            StageId::Inking => Some(StageId::Printing),
            StageId::Printing => Some(StageId::Complete),
            StageId::Complete => None,
        }
    }

    /// Whether this is one of the five crafting stages.
    pub fn is_craft(self) -> bool {
        !matches!(self, StageId::Intro | StageId::Complete)
    }

    /// Numeric code used on the event wire (intro = 0 … complete = 6).
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StageId::Intro => "intro",
            StageId::Writing => "writing",
            StageId::Mounting => "mounting",
            StageId::Carving => "carving",
            StageId::Inking => "inking",
            StageId::Printing => "printing",
            StageId::Complete => "complete",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Event kinds (Rust → host).
pub mod events {
    /// A new stage became current. `a` = stage code.
    pub const STAGE_ENTERED: f32 = 1.0;
    /// The active stage's headline metric changed. `a` = value (0-100), `b` = 1 if the guard is met.
    pub const METRIC: f32 = 2.0;
    /// Carving force changed. `a` = force (0-1), `b` = force level code.
    pub const FORCE: f32 = 3.0;
    /// Paper adhered to the block.
    pub const MOUNTED: f32 = 4.0;
    /// Print revealed. `a` = quality.
    pub const REVEALED: f32 = 5.0;
    /// Final rating. `a` = stars, `b` = score.
    pub const RATING: f32 = 6.0;
    /// The writing surface was cleared. `a` = selected glyph index.
    pub const SURFACE_CLEARED: f32 = 7.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn successor_walks_the_fixed_order() {
        let mut stage = StageId::Intro;
        let mut seen = vec![stage];
        while let Some(next) = stage.successor() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(
            seen,
            vec![
                StageId::Intro,
                StageId::Writing,
                StageId::Mounting,
                StageId::Carving,
                StageId::Inking,
                StageId::Printing,
                StageId::Complete,
            ]
        );
    }

    #[test]
    fn bookends_are_not_craft_stages() {
        assert!(!StageId::Intro.is_craft());
        assert!(!StageId::Complete.is_craft());
        assert!(StageId::CRAFT.iter().all(|s| s.is_craft()));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&StageId::Carving).unwrap();
        assert_eq!(json, "\"carving\"");
        let back: StageId = serde_json::from_str("\"inking\"").unwrap();
        assert_eq!(back, StageId::Inking);
    }

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }
}
