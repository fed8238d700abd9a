//! Shape-based equipment grid: items with polyomino footprints placed on a
//! fixed grid without overlap, picked up and dropped via pointer, with the
//! clicked position mapped back to an occupied shape cell so re-placement
//! stays anchored correctly.
//!
//! `game` is the placement authority (shapes, grid, pool, layout config);
//! `ui` is the interaction layer (pointer snapshots, pickup resolution, the
//! drag session, preview math, staggered grid construction). Rendering and
//! persistence live in the consumer: it feeds one [`PointerSnapshot`] per
//! tick into a [`GridScreen`] and draws from the screen's read surface.

pub mod game;
pub mod ui;

pub use game::config::ScreenConfig;
pub use game::grid::GridStore;
pub use game::item::{Item, ItemId, ItemRegistry};
pub use game::pool::Pool;
pub use game::shape::{Cell, Shape, ShapeError, ShapeSpec};
pub use ui::drag::{DragOrigin, DragOutcome, DragSession};
pub use ui::pointer::{PointerSnapshot, SlotHit};
pub use ui::screen::{DragView, EquipmentSink, GridScreen};
