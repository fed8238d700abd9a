use glam::Vec2;

use crate::game::shape::{Cell, Shape};

/// Highlight for one footprint cell at its translated grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellHighlight {
    pub cell: Cell,
    pub valid: bool,
}

/// Fan the placement verdict out to the translated footprint for the hover
/// preview. Pure: the verdict comes from `GridStore::can_place`, this never
/// touches the grid.
pub fn highlight_cells(shape: &Shape, origin: Cell, valid: bool) -> Vec<CellHighlight> {
    shape
        .occupied_cells()
        .iter()
        .map(|&(cx, cy)| CellHighlight {
            cell: (origin.0 + cx, origin.1 + cy),
            valid,
        })
        .collect()
}

/// Offset that keeps the pickup cell under the pointer: the pickup cell's
/// center minus the bounding box's center, in shape-local pixels. Translate
/// the floating preview by `pointer - offset` and the anchor stays put no
/// matter the footprint. Fixed for the whole drag; it does not depend on
/// the hovered cell.
pub fn cursor_offset(shape: &Shape, pickup: Cell, cell_px: f32) -> Vec2 {
    let pickup_center = Vec2::new(
        (pickup.0 as f32 + 0.5) * cell_px,
        (pickup.1 as f32 + 0.5) * cell_px,
    );
    let box_center = Vec2::new(shape.width() as f32, shape.height() as f32) * cell_px * 0.5;
    pickup_center - box_center
}
