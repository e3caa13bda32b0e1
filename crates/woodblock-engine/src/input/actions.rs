use crate::stages::carving::CarvingTool;

/// Custom event kinds (host → Rust).
pub mod kinds {
    pub const START: u32 = 1;
    pub const COMPLETE: u32 = 2;
    pub const RESTART: u32 = 3;
    /// `a` = glyph index in the catalog.
    pub const SELECT_GLYPH: u32 = 10;
    /// `a` = brush width.
    pub const SET_BRUSH_WIDTH: u32 = 11;
    /// Stage-local redo: clear writing, clear all carving, re-ink, re-print.
    pub const RESET: u32 = 12;
    pub const UNDO: u32 = 13;
    pub const FLIP: u32 = 20;
    /// `a` = 0 flat chisel, 1 angled knife.
    pub const SELECT_TOOL: u32 = 30;
    pub const PLACE_PAPER: u32 = 40;
    pub const REVEAL: u32 = 41;
}

/// A button press from the UI, decoded from a custom input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Start,
    Complete,
    Restart,
    SelectGlyph(usize),
    SetBrushWidth(f32),
    Reset,
    Undo,
    Flip,
    SelectTool(CarvingTool),
    PlacePaper,
    Reveal,
}

impl Action {
    /// Decode a custom event. Unknown kinds and malformed arguments yield `None`.
    pub fn from_custom(kind: u32, a: f32) -> Option<Self> {
        let action = match kind {
            kinds::START => Action::Start,
            kinds::COMPLETE => Action::Complete,
            kinds::RESTART => Action::Restart,
            kinds::SELECT_GLYPH => {
                if !a.is_finite() || a < 0.0 {
                    return None;
                }
                Action::SelectGlyph(a as usize)
            }
            kinds::SET_BRUSH_WIDTH => {
                if !a.is_finite() {
                    return None;
                }
                Action::SetBrushWidth(a)
            }
            kinds::RESET => Action::Reset,
            kinds::UNDO => Action::Undo,
            kinds::FLIP => Action::Flip,
            kinds::SELECT_TOOL => Action::SelectTool(if a >= 1.0 {
                CarvingTool::Knife
            } else {
                CarvingTool::Chisel
            }),
            kinds::PLACE_PAPER => Action::PlacePaper,
            kinds::REVEAL => Action::Reveal,
            _ => return None,
        };
        Some(action)
    }
}
