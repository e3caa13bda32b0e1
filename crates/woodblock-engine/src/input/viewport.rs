use glam::Vec2;

/// Maps display pixels (as the host measures its element) to surface units.
///
/// The host may render a 300×300 surface at any CSS size; pointer positions
/// arrive in display pixels relative to the element's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    display: Vec2,
    surface: Vec2,
}

impl Viewport {
    pub fn new(surface_width: f32, surface_height: f32) -> Self {
        let surface = Vec2::new(surface_width, surface_height);
        Self {
            display: surface,
            surface,
        }
    }

    /// Update the displayed size. Non-positive sizes are ignored.
    pub fn set_display_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.display = Vec2::new(width, height);
        }
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface
    }

    /// Display pixels → surface units.
    pub fn to_surface(&self, display_pos: Vec2) -> Vec2 {
        display_pos * (self.surface / self.display)
    }

    /// Surface units → percent of the surface (unclamped).
    pub fn to_percent(&self, surface_pos: Vec2) -> Vec2 {
        surface_pos / self.surface * 100.0
    }

    /// Percent of the surface → surface units.
    pub fn from_percent(&self, percent: Vec2) -> Vec2 {
        percent / 100.0 * self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_until_resized() {
        let vp = Viewport::new(300.0, 300.0);
        assert_eq!(vp.to_surface(Vec2::new(12.0, 34.0)), Vec2::new(12.0, 34.0));
    }

    #[test]
    fn scales_by_display_ratio() {
        let mut vp = Viewport::new(300.0, 300.0);
        vp.set_display_size(150.0, 600.0);
        assert_eq!(vp.to_surface(Vec2::new(75.0, 300.0)), Vec2::new(150.0, 150.0));
    }

    #[test]
    fn ignores_degenerate_display() {
        let mut vp = Viewport::new(300.0, 300.0);
        vp.set_display_size(0.0, 100.0);
        assert_eq!(vp.to_surface(Vec2::new(10.0, 10.0)), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn percent_round_trip() {
        let vp = Viewport::new(300.0, 200.0);
        let pct = vp.to_percent(Vec2::new(150.0, 50.0));
        assert_eq!(pct, Vec2::new(50.0, 25.0));
        assert_eq!(vp.from_percent(pct), Vec2::new(150.0, 50.0));
    }
}
