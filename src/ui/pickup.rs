use glam::Vec2;

use crate::game::shape::{Cell, Shape};

/// Rendered geometry of one storage slot. The shape preview fills the slot
/// interior minus a label strip at the bottom, inset by `padding` on every
/// side, with the bounding box scaled to fit.
#[derive(Clone, Copy, Debug)]
pub struct SlotLayout {
    pub size: Vec2,
    pub padding: Vec2,
    pub label_strip: f32,
}

impl SlotLayout {
    /// Rendered size of one cell of `shape` in this slot.
    pub fn cell_size(&self, shape: &Shape) -> Vec2 {
        let inner = self.size - self.padding * 2.0 - Vec2::new(0.0, self.label_strip);
        Vec2::new(
            inner.x / shape.width() as f32,
            inner.y / shape.height() as f32,
        )
    }
}

/// The occupied shape-local cell that anchors a drag to the pointer.
///
/// Priority order:
/// 1. the shape's explicit pickup point (construction guarantees it is
///    occupied when present);
/// 2. the caller's clicked cell, when it lands on an occupied cell;
/// 3. the first occupied cell in reading order;
/// 4. the rounded bounding-box center — unreachable for validated shapes,
///    but it keeps the anchor inside the box even then.
///
/// Deterministic: the same shape and clicked cell always resolve to the
/// same anchor, even for shapes whose geometric center is empty (rings,
/// crosses).
pub fn resolve_pickup(shape: &Shape, clicked: Option<Cell>) -> Cell {
    if let Some(point) = shape.pickup_point() {
        return point;
    }
    if let Some(cell) = clicked {
        if shape.is_occupied(cell) {
            return cell;
        }
    }
    if let Some(&first) = shape.occupied_cells().first() {
        return first;
    }
    (shape.width() as i32 / 2, shape.height() as i32 / 2)
}

/// Invert a slot click into a shape-local cell: slot-local position minus
/// the preview padding, divided by the rendered cell size, floored, then
/// clamped to the bounding box. Returns `None` when the landed cell is
/// unoccupied so the caller falls through to reading-order resolution.
pub fn slot_cell(shape: &Shape, local_pos: Vec2, layout: &SlotLayout) -> Option<Cell> {
    let cell = layout.cell_size(shape);
    if cell.x <= 0.0 || cell.y <= 0.0 {
        return None;
    }
    let rel = local_pos - layout.padding;
    let cx = ((rel.x / cell.x).floor() as i32).clamp(0, shape.width() as i32 - 1);
    let cy = ((rel.y / cell.y).floor() as i32).clamp(0, shape.height() as i32 - 1);
    shape.is_occupied((cx, cy)).then_some((cx, cy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross() -> Shape {
        Shape::from_rows(&[".#.", "###", ".#."]).unwrap()
    }

    fn layout(size: Vec2) -> SlotLayout {
        SlotLayout {
            size,
            padding: Vec2::ZERO,
            label_strip: 0.0,
        }
    }

    #[test]
    fn test_pickup_point_wins() {
        let shape = Shape::new(
            3,
            3,
            vec![false, true, false, true, true, true, false, true, false],
            Some((2, 1)),
        )
        .unwrap();
        assert_eq!(resolve_pickup(&shape, Some((1, 1))), (2, 1));
    }

    #[test]
    fn test_clicked_cell_when_occupied() {
        let shape = cross();
        assert_eq!(resolve_pickup(&shape, Some((1, 2))), (1, 2));
    }

    #[test]
    fn test_unoccupied_click_falls_to_reading_order() {
        // Corner click on a cross: (0, 0) is empty, so the anchor is the
        // first occupied cell in reading order, not the clicked one.
        let shape = cross();
        assert_eq!(resolve_pickup(&shape, Some((0, 0))), (1, 0));
    }

    #[test]
    fn test_out_of_box_click_falls_to_reading_order() {
        let shape = cross();
        assert_eq!(resolve_pickup(&shape, Some((5, -2))), (1, 0));
    }

    #[test]
    fn test_no_click_uses_reading_order() {
        let shape = cross();
        assert_eq!(resolve_pickup(&shape, None), (1, 0));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let shape = cross();
        let first = resolve_pickup(&shape, Some((0, 0)));
        for _ in 0..10 {
            assert_eq!(resolve_pickup(&shape, Some((0, 0))), first);
        }
    }

    #[test]
    fn test_slot_cell_basic() {
        let shape = Shape::from_rows(&["##", "##"]).unwrap();
        // 2x2 box in a 20x20 slot: 10px cells.
        let layout = layout(Vec2::new(20.0, 20.0));
        assert_eq!(slot_cell(&shape, Vec2::new(3.0, 4.0), &layout), Some((0, 0)));
        assert_eq!(
            slot_cell(&shape, Vec2::new(15.0, 12.0), &layout),
            Some((1, 1))
        );
    }

    #[test]
    fn test_slot_cell_unoccupied_is_none() {
        // 3x1 bar occupied at (0,0) and (2,0) only: a fractional click at
        // shape coordinates (1.9, 0.4) floors to the hole at (1, 0).
        let shape = Shape::from_rows(&["#.#"]).unwrap();
        let layout = layout(Vec2::new(30.0, 10.0));
        assert_eq!(slot_cell(&shape, Vec2::new(19.0, 4.0), &layout), None);
        // The caller then falls back to reading-order-first.
        assert_eq!(resolve_pickup(&shape, None), (0, 0));
    }

    #[test]
    fn test_slot_cell_clamps_to_box() {
        let shape = Shape::from_rows(&["##"]).unwrap();
        let layout = layout(Vec2::new(20.0, 10.0));
        // Click past the right edge and below (inside the label strip area)
        // clamps back into the box.
        assert_eq!(
            slot_cell(&shape, Vec2::new(45.0, 25.0), &layout),
            Some((1, 0))
        );
        assert_eq!(
            slot_cell(&shape, Vec2::new(-8.0, -3.0), &layout),
            Some((0, 0))
        );
    }

    #[test]
    fn test_slot_cell_respects_padding_and_label_strip() {
        let shape = Shape::from_rows(&["##"]).unwrap();
        // Inner area: 20x10 after 5px padding and a 10px label strip,
        // so cells are 10x10 starting at (5, 5).
        let layout = SlotLayout {
            size: Vec2::new(30.0, 30.0),
            padding: Vec2::new(5.0, 5.0),
            label_strip: 10.0,
        };
        assert_eq!(
            slot_cell(&shape, Vec2::new(6.0, 6.0), &layout),
            Some((0, 0))
        );
        assert_eq!(
            slot_cell(&shape, Vec2::new(24.0, 6.0), &layout),
            Some((1, 0))
        );
    }

    #[test]
    fn test_slot_cell_degenerate_layout() {
        let shape = Shape::from_rows(&["#"]).unwrap();
        let layout = SlotLayout {
            size: Vec2::new(10.0, 10.0),
            padding: Vec2::new(6.0, 6.0),
            label_strip: 0.0,
        };
        // Padding eats the whole slot; there is no preview to click.
        assert_eq!(slot_cell(&shape, Vec2::new(5.0, 5.0), &layout), None);
    }
}
