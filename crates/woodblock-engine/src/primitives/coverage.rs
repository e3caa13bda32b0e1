use glam::Vec2;

/// Cells per side of the coverage grid.
pub const GRID_SIZE: usize = 10;

/// Fixed-resolution occupancy set over a rectangular surface.
///
/// Positions are given in percent of the surface; each cell spans
/// `100 / GRID_SIZE` percent in both axes. Marking is idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageGrid {
    cells: [bool; GRID_SIZE * GRID_SIZE],
    covered: usize,
}

impl CoverageGrid {
    pub fn new() -> Self {
        Self {
            cells: [false; GRID_SIZE * GRID_SIZE],
            covered: 0,
        }
    }

    /// Clamp a percent position to the surface, in both axes.
    pub fn clamp_percent(pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, Vec2::splat(100.0))
    }

    /// Cell under a percent position. The far edge (100%) belongs to the last cell.
    pub fn cell_at(pos: Vec2) -> (usize, usize) {
        let pos = Self::clamp_percent(pos);
        let span = 100.0 / GRID_SIZE as f32;
        let gx = ((pos.x / span).floor() as usize).min(GRID_SIZE - 1);
        let gy = ((pos.y / span).floor() as usize).min(GRID_SIZE - 1);
        (gx, gy)
    }

    /// Mark the cell under `pos`. Returns the cell and whether it was newly covered.
    pub fn mark(&mut self, pos: Vec2) -> ((usize, usize), bool) {
        let (gx, gy) = Self::cell_at(pos);
        let idx = gy * GRID_SIZE + gx;
        let fresh = !self.cells[idx];
        if fresh {
            self.cells[idx] = true;
            self.covered += 1;
        }
        ((gx, gy), fresh)
    }

    pub fn is_covered(&self, gx: usize, gy: usize) -> bool {
        gx < GRID_SIZE && gy < GRID_SIZE && self.cells[gy * GRID_SIZE + gx]
    }

    /// Number of covered cells (never more than `GRID_SIZE²`).
    pub fn len(&self) -> usize {
        self.covered
    }

    pub fn is_empty(&self) -> bool {
        self.covered == 0
    }

    /// Covered fraction of the surface, 0.0 - 1.0.
    pub fn fraction(&self) -> f32 {
        self.covered as f32 / (GRID_SIZE * GRID_SIZE) as f32
    }

    pub fn clear(&mut self) {
        self.cells = [false; GRID_SIZE * GRID_SIZE];
        self.covered = 0;
    }

    /// Iterate over covered cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(|(i, _)| (i % GRID_SIZE, i / GRID_SIZE))
    }
}

impl Default for CoverageGrid {
    fn default() -> Self {
        Self::new()
    }
}
