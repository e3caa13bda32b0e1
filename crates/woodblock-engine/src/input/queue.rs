use glam::Vec2;

/// Phase of a pointer gesture. Mouse, touch and pen all map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    /// Touch cancel or the pointer leaving the surface. Handled exactly like `End`.
    Cancel,
}

impl PointerPhase {
    /// Decode the wire code used by the host (0 start, 1 move, 2 end, 3 cancel).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(PointerPhase::Start),
            1 => Some(PointerPhase::Move),
            2 => Some(PointerPhase::End),
            3 => Some(PointerPhase::Cancel),
            _ => None,
        }
    }

    /// Whether this phase finishes the gesture.
    pub fn is_release(self) -> bool {
        matches!(self, PointerPhase::End | PointerPhase::Cancel)
    }
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Host pointer id (touch identifier, or 0 for the mouse).
    pub id: u32,
    pub phase: PointerPhase,
    /// Position; display pixels on the wire, surface units once routed to a stage.
    pub pos: Vec2,
}

impl PointerEvent {
    pub fn new(id: u32, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            id,
            phase,
            pos: Vec2::new(x, y),
        }
    }

    pub fn start(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::Start, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::Move, x, y)
    }

    pub fn end(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::End, x, y)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::Cancel, x, y)
    }
}

/// Input event types the workshop understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// A button press from the UI layer.
    /// `kind` identifies the action; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host writes events into the queue; the runner drains them each frame, in order.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
