use super::queue::{PointerEvent, PointerPhase};

/// Resolves multi-touch input to a single tracked pointer.
///
/// The first pointer to start owns the gesture until it ends or is cancelled;
/// every other pointer id is dropped in the meantime.
#[derive(Debug, Default)]
pub struct PointerTracker {
    active: Option<u32>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Filter an incoming event. Returns it if it belongs to the tracked gesture.
    pub fn resolve(&mut self, event: PointerEvent) -> Option<PointerEvent> {
        match (event.phase, self.active) {
            (PointerPhase::Start, None) => {
                self.active = Some(event.id);
                Some(event)
            }
            (PointerPhase::Start, Some(_)) => None,
            (PointerPhase::Move, Some(id)) if id == event.id => Some(event),
            (PointerPhase::End | PointerPhase::Cancel, Some(id)) if id == event.id => {
                self.active = None;
                Some(event)
            }
            _ => None,
        }
    }

    pub fn active(&self) -> Option<u32> {
        self.active
    }

    /// Forget the tracked pointer (used when the active stage changes).
    pub fn reset(&mut self) {
        self.active = None;
    }
}
