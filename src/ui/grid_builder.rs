use crate::game::shape::Cell;

/// Resumable construction order for the visual cell grid. Building every
/// cell widget in one pass stalls the first frame on large grids, so the
/// screen drains a bounded batch per scheduling tick instead and the
/// renderer constructs just those cells.
#[derive(Clone, Debug)]
pub struct GridBuildQueue {
    width: u32,
    cells_per_step: usize,
    next: usize,
    total: usize,
}

impl GridBuildQueue {
    pub fn new(width: u32, height: u32, cells_per_step: usize) -> Self {
        Self {
            width,
            cells_per_step: cells_per_step.max(1),
            next: 0,
            total: (width * height) as usize,
        }
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.total
    }

    pub fn remaining(&self) -> usize {
        self.total - self.next
    }

    /// Next batch of cell coordinates in row-major order, at most
    /// `cells_per_step` long. Empty once the grid is fully enumerated.
    pub fn next_batch(&mut self) -> Vec<Cell> {
        let end = (self.next + self.cells_per_step).min(self.total);
        let batch = (self.next..end)
            .map(|i| {
                let i = i as u32;
                ((i % self.width) as i32, (i / self.width) as i32)
            })
            .collect();
        self.next = end;
        batch
    }
}
