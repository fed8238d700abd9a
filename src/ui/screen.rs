use std::collections::HashSet;
use std::sync::Arc;

use glam::Vec2;

use crate::game::config::ScreenConfig;
use crate::game::grid::GridStore;
use crate::game::item::{Item, ItemId, ItemRegistry};
use crate::game::pool::Pool;
use crate::game::shape::{Cell, Shape};

use super::drag::{DragOrigin, DragOutcome, DragSession};
use super::grid_builder::GridBuildQueue;
use super::pickup::{slot_cell, SlotLayout};
use super::pointer::PointerSnapshot;
use super::preview::{cursor_offset, highlight_cells, CellHighlight};

/// Consumer of placement changes; external stat recalculation hangs off
/// this. Fired after every drag outcome that changed the placed-item set,
/// and after the direct equip/unequip paths.
pub trait EquipmentSink {
    fn equipment_changed(&mut self, placed: &HashSet<ItemId>);
}

impl<F: FnMut(&HashSet<ItemId>)> EquipmentSink for F {
    fn equipment_changed(&mut self, placed: &HashSet<ItemId>) {
        self(placed)
    }
}

/// What the renderer needs to draw the floating preview this tick.
#[derive(Clone, Debug)]
pub struct DragView {
    pub item: ItemId,
    pub pickup: Cell,
    /// Translate the preview by `pointer - cursor_offset` to keep the
    /// pickup cell under the pointer.
    pub cursor_offset: Vec2,
    /// Per-cell hover highlights; empty while the pointer is off-grid.
    pub highlights: Vec<CellHighlight>,
}

/// The equipment screen's logic core: one grid, one pool, at most one
/// active drag, driven by one pointer snapshot per UI tick. Collaborators
/// are injected — no ambient singletons.
pub struct GridScreen {
    config: ScreenConfig,
    registry: ItemRegistry,
    grid: GridStore,
    pool: Pool,
    drag: Option<DragSession>,
    build_queue: GridBuildQueue,
    sink: Box<dyn EquipmentSink>,
}

impl GridScreen {
    pub fn new(config: ScreenConfig, sink: impl EquipmentSink + 'static) -> Self {
        let grid = GridStore::new(config.grid.width, config.grid.height);
        let build_queue = GridBuildQueue::new(
            config.grid.width,
            config.grid.height,
            config.init.cells_per_step,
        );
        Self {
            config,
            registry: ItemRegistry::new(),
            grid,
            pool: Pool::new(),
            drag: None,
            build_queue,
            sink: Box::new(sink),
        }
    }

    /// Register a newly owned item; it starts in the pool.
    pub fn add_owned_item(&mut self, name: impl Into<String>, shape: Arc<Shape>) -> ItemId {
        let id = self.registry.insert(name, shape);
        self.pool.add(id);
        id
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.registry.get(id)
    }

    pub fn drag_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Slot geometry derived from the layout config, shared with the
    /// renderer so clicks invert through the same numbers it drew with.
    pub fn slot_layout(&self) -> SlotLayout {
        let layout = &self.config.layout;
        SlotLayout {
            size: Vec2::from(layout.slot_size),
            padding: Vec2::from(layout.slot_padding),
            label_strip: layout.label_strip_px,
        }
    }

    /// Next batch of visual cells to construct this scheduling tick.
    /// Returns an empty batch once setup is complete.
    pub fn init_step(&mut self) -> Vec<Cell> {
        self.build_queue.next_batch()
    }

    pub fn is_initialized(&self) -> bool {
        self.build_queue.is_done()
    }

    /// Direct placement path for character load: moves `item` from the
    /// pool onto the grid.
    pub fn equip_at(&mut self, item: ItemId, origin: Cell) -> bool {
        if !self.pool.contains(item) {
            return false;
        }
        let Some(shape) = self.registry.shape(item) else {
            return false;
        };
        if !self.grid.try_place(item, &shape, origin) {
            return false;
        }
        self.pool.remove(item);
        self.notify();
        true
    }

    /// Take `item` off the grid and back into the pool.
    pub fn unequip(&mut self, item: ItemId) -> bool {
        if !self.grid.contains(item) {
            return false;
        }
        self.grid.remove(item);
        self.pool.add(item);
        self.notify();
        true
    }

    /// One UI tick: dispatch this tick's pointer state into the drag state
    /// machine. All grid and pool mutation happens synchronously in here.
    pub fn handle_pointer(&mut self, input: &PointerSnapshot) {
        if input.pressed {
            self.begin_drag(input);
        }

        if let Some(drag) = self.drag.as_mut() {
            drag.update_hover(input.grid_cell, &self.grid);
        }

        if input.cancel {
            // Cancel wins over a release arriving the same tick.
            if let Some(drag) = self.drag.take() {
                let outcome = drag.cancel(&mut self.grid, &mut self.pool);
                self.finish_drag(outcome);
            }
            return;
        }

        if input.released {
            if let Some(drag) = self.drag.take() {
                let outcome = match input.grid_cell {
                    Some(cell) => drag.commit(cell, &mut self.grid, &mut self.pool),
                    None => drag.drop_outside(&mut self.pool),
                };
                self.finish_drag(outcome);
            }
        }
    }

    /// Floating-preview state for the renderer, present while a drag is
    /// active.
    pub fn drag_view(&self) -> Option<DragView> {
        let drag = self.drag.as_ref()?;
        let highlights = drag
            .hover()
            .map(|cell| {
                let origin = drag.placement_origin(cell);
                let valid = self.grid.can_place(drag.item(), drag.shape(), origin);
                highlight_cells(drag.shape(), origin, valid)
            })
            .unwrap_or_default();
        Some(DragView {
            item: drag.item(),
            pickup: drag.pickup(),
            cursor_offset: cursor_offset(drag.shape(), drag.pickup(), self.config.layout.cell_px),
            highlights,
        })
    }

    fn begin_drag(&mut self, input: &PointerSnapshot) {
        // A second pointer-down while a drag is active has no defined
        // behavior; fail fast rather than guess.
        assert!(
            self.drag.is_none(),
            "pointer pressed while a drag is already active"
        );

        if let Some(cell) = input.grid_cell {
            if let Some(item) = self.grid.item_at(cell) {
                let Some(origin_cell) = self.grid.origin_of(item) else {
                    return;
                };
                let Some(shape) = self.registry.shape(item) else {
                    return;
                };
                let clicked = (cell.0 - origin_cell.0, cell.1 - origin_cell.1);
                self.drag = Some(DragSession::start(
                    item,
                    shape,
                    DragOrigin::FromGrid(origin_cell),
                    Some(clicked),
                    &mut self.grid,
                ));
                return;
            }
        }

        if let Some(hit) = &input.slot {
            if !self.pool.contains(hit.item) {
                return;
            }
            let Some(shape) = self.registry.shape(hit.item) else {
                return;
            };
            let clicked = slot_cell(&shape, hit.local_pos, &self.slot_layout());
            self.drag = Some(DragSession::start(
                hit.item,
                shape,
                DragOrigin::FromPool,
                clicked,
                &mut self.grid,
            ));
        }
    }

    fn finish_drag(&mut self, outcome: DragOutcome) {
        log::debug!("drag ended: {outcome:?}");
        if outcome.equipment_changed() {
            self.notify();
        }
    }

    fn notify(&mut self) {
        let placed = self.grid.placed_items();
        self.sink.equipment_changed(&placed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pointer::SlotHit;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn screen_with_log() -> (GridScreen, Rc<RefCell<Vec<usize>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink_log = log.clone();
        let screen = GridScreen::new(
            ScreenConfig::default(),
            move |placed: &HashSet<ItemId>| sink_log.borrow_mut().push(placed.len()),
        );
        (screen, log)
    }

    fn shape(rows: &[&str]) -> Arc<Shape> {
        Arc::new(Shape::from_rows(rows).unwrap())
    }

    fn press_on_grid(cell: Cell) -> PointerSnapshot {
        PointerSnapshot {
            pressed: true,
            grid_cell: Some(cell),
            ..Default::default()
        }
    }

    fn release_on_grid(cell: Cell) -> PointerSnapshot {
        PointerSnapshot {
            released: true,
            grid_cell: Some(cell),
            ..Default::default()
        }
    }

    fn press_on_slot(item: ItemId, local: Vec2) -> PointerSnapshot {
        PointerSnapshot {
            pressed: true,
            slot: Some(SlotHit {
                item,
                local_pos: local,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_slot_drag_to_grid_places_and_notifies_once() {
        let (mut screen, log) = screen_with_log();
        let id = screen.add_owned_item("Idol", shape(&["##"]));

        screen.handle_pointer(&press_on_slot(id, Vec2::new(10.0, 10.0)));
        assert!(screen.drag_active());
        assert!(screen.pool().contains(id)); // still pooled mid-drag

        screen.handle_pointer(&PointerSnapshot::hover(Some((2, 4))));
        screen.handle_pointer(&release_on_grid((2, 4)));

        assert!(!screen.drag_active());
        assert!(!screen.pool().contains(id));
        assert!(screen.grid().contains(id));
        assert_eq!(log.borrow().as_slice(), &[1]);
    }

    #[test]
    fn test_grid_drag_to_new_cell_moves_item() {
        let (mut screen, log) = screen_with_log();
        let id = screen.add_owned_item("Idol", shape(&["##"]));
        assert!(screen.equip_at(id, (0, 0)));
        log.borrow_mut().clear();

        screen.handle_pointer(&press_on_grid((1, 0)));
        assert!(screen.drag_active());
        assert!(!screen.grid().contains(id)); // lifted

        screen.handle_pointer(&release_on_grid((4, 5)));
        // Anchor was the clicked cell (1, 0), so the origin lands at (3, 5).
        assert_eq!(screen.grid().origin_of(id), Some((3, 5)));
        assert_eq!(log.borrow().as_slice(), &[1]);
    }

    #[test]
    fn test_failed_grid_drop_restores_without_notify() {
        let (mut screen, log) = screen_with_log();
        let blocker = screen.add_owned_item("Blocker", shape(&["##"]));
        let id = screen.add_owned_item("Idol", shape(&["##"]));
        assert!(screen.equip_at(blocker, (0, 0)));
        assert!(screen.equip_at(id, (0, 1)));
        log.borrow_mut().clear();

        screen.handle_pointer(&press_on_grid((0, 1)));
        // Drop so the footprint overlaps the blocker.
        screen.handle_pointer(&release_on_grid((1, 0)));

        assert_eq!(screen.grid().origin_of(id), Some((0, 1)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_release_off_grid_returns_grid_item_to_pool() {
        let (mut screen, log) = screen_with_log();
        let id = screen.add_owned_item("Idol", shape(&["#"]));
        assert!(screen.equip_at(id, (2, 2)));
        log.borrow_mut().clear();

        screen.handle_pointer(&press_on_grid((2, 2)));
        screen.handle_pointer(&PointerSnapshot {
            released: true,
            ..Default::default()
        });

        assert!(screen.pool().contains(id));
        assert!(!screen.grid().contains(id));
        assert_eq!(screen.pool().len(), 1);
        assert_eq!(log.borrow().as_slice(), &[0]);
    }

    #[test]
    fn test_cancel_leaves_pool_item_untouched() {
        let (mut screen, log) = screen_with_log();
        let id = screen.add_owned_item("Idol", shape(&["#"]));

        screen.handle_pointer(&press_on_slot(id, Vec2::ZERO));
        screen.handle_pointer(&PointerSnapshot {
            cancel: true,
            ..Default::default()
        });

        assert!(!screen.drag_active());
        assert!(screen.pool().contains(id));
        assert!(log.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "drag is already active")]
    fn test_second_press_during_drag_panics() {
        let (mut screen, _log) = screen_with_log();
        let id = screen.add_owned_item("Idol", shape(&["#"]));
        screen.handle_pointer(&press_on_slot(id, Vec2::ZERO));
        screen.handle_pointer(&press_on_slot(id, Vec2::ZERO));
    }

    #[test]
    fn test_drag_view_reports_highlights_and_offset() {
        let (mut screen, _log) = screen_with_log();
        let id = screen.add_owned_item("Idol", shape(&["##"]));

        screen.handle_pointer(&press_on_slot(id, Vec2::ZERO));
        // Click in the slot corner resolves the anchor to (0, 0).
        let view = screen.drag_view().unwrap();
        assert_eq!(view.item, id);
        assert_eq!(view.pickup, (0, 0));
        assert_eq!(view.cursor_offset, Vec2::new(-24.0, 0.0)); // half of 48px
        assert!(view.highlights.is_empty()); // off-grid

        screen.handle_pointer(&PointerSnapshot::hover(Some((1, 1))));
        let view = screen.drag_view().unwrap();
        assert_eq!(view.highlights.len(), 2);
        assert!(view.highlights.iter().all(|h| h.valid));
        assert_eq!(view.highlights[0].cell, (1, 1));
        assert_eq!(view.highlights[1].cell, (2, 1));
    }

    #[test]
    fn test_unequip_and_equip_at_round_trip() {
        let (mut screen, log) = screen_with_log();
        let id = screen.add_owned_item("Idol", shape(&["#", "#"]));

        assert!(screen.equip_at(id, (1, 1)));
        assert!(!screen.equip_at(id, (1, 1))); // no longer pooled
        assert!(screen.unequip(id));
        assert!(!screen.unequip(id)); // already pooled
        assert!(screen.equip_at(id, (1, 1)));
        assert_eq!(log.borrow().as_slice(), &[1, 0, 1]);
    }

    #[test]
    fn test_init_steps_cover_grid_then_stop() {
        let (mut screen, _log) = screen_with_log();
        let mut seen = 0;
        while !screen.is_initialized() {
            let batch = screen.init_step();
            assert!(batch.len() <= screen.config().init.cells_per_step);
            assert!(!batch.is_empty());
            seen += batch.len();
        }
        assert_eq!(seen, 120); // 6 x 20
        assert!(screen.init_step().is_empty());
    }

    #[test]
    fn test_press_on_empty_grid_cell_does_nothing() {
        let (mut screen, log) = screen_with_log();
        screen.handle_pointer(&press_on_grid((3, 3)));
        assert!(!screen.drag_active());
        assert!(log.borrow().is_empty());
    }
}
