use glam::Vec2;

use crate::extensions::motion::{Easing, Spring, Transition};

/// Spring stiffness for the displayed paper position.
const FOLLOW_OMEGA: f32 = 18.0;
/// Duration of the flip animation, in seconds.
const FLIP_SECONDS: f32 = 0.3;

/// Whether a release at `offset` with the given orientation adheres the paper.
pub fn accepts(offset: Vec2, flipped: bool, tolerance: f32) -> bool {
    flipped && offset.x.abs() < tolerance && offset.y.abs() < tolerance
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    pointer_start: Vec2,
    offset_start: Vec2,
}

/// Drag-flip-place controller for a sheet that must land face down on a target.
///
/// All positions are relative to the target centre. The logical offset tracks
/// the pointer exactly; `display_offset` follows it on a spring for rendering.
#[derive(Debug, Clone)]
pub struct PlacementController {
    offset: Vec2,
    flipped: bool,
    mounted: bool,
    drag: Option<Drag>,
    tolerance: f32,
    half_size: f32,
    display: Spring,
    flip_anim: Transition,
}

impl PlacementController {
    pub fn new(home: Vec2, tolerance: f32, half_size: f32) -> Self {
        Self {
            offset: home,
            flipped: false,
            mounted: false,
            drag: None,
            tolerance,
            half_size,
            display: Spring::new(home, FOLLOW_OMEGA),
            flip_anim: Transition::settled(0.0, FLIP_SECONDS, Easing::CubicInOut),
        }
    }

    /// Whether `pointer` lies on the sheet.
    pub fn hit(&self, pointer: Vec2) -> bool {
        let d = (pointer - self.offset).abs();
        d.x <= self.half_size && d.y <= self.half_size
    }

    /// Start dragging if `pointer` is on the sheet. Disabled once mounted.
    pub fn grab(&mut self, pointer: Vec2) -> bool {
        if self.mounted || !self.hit(pointer) {
            return false;
        }
        self.drag = Some(Drag {
            pointer_start: pointer,
            offset_start: self.offset,
        });
        true
    }

    /// Follow the pointer 1:1 from the drag start.
    pub fn drag_to(&mut self, pointer: Vec2) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        self.offset = drag.offset_start + (pointer - drag.pointer_start);
        true
    }

    /// End the drag and test acceptance. Returns true if the sheet just adhered.
    pub fn release(&mut self) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        if accepts(self.offset, self.flipped, self.tolerance) {
            self.mounted = true;
            self.offset = Vec2::ZERO;
            return true;
        }
        false
    }

    /// Toggle the orientation. Disabled once mounted.
    pub fn flip(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.flipped = !self.flipped;
        self.flip_anim.retarget(if self.flipped { 1.0 } else { 0.0 });
        true
    }

    /// Advance cosmetic motion by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.drag.is_some() {
            self.display.snap(self.offset);
        } else {
            self.display.step(self.offset, dt);
        }
        self.flip_anim.tick(dt);
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn display_offset(&self) -> Vec2 {
        self.display.position
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Flip animation progress, 0 = face up, 1 = face down.
    pub fn flip_progress(&self) -> f32 {
        self.flip_anim.value()
    }

    pub fn mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn half_size(&self) -> f32 {
        self.half_size
    }
}
