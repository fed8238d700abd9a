use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// A cell coordinate, (x, y). Shape-local cells are always non-negative;
/// placement math during a drag can go negative (a footprint hanging off
/// the grid edge), so both spaces use i32.
pub type Cell = (i32, i32);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape bounding box must be non-zero, got {width}x{height}")]
    ZeroExtent { width: u32, height: u32 },
    #[error("mask length {len} does not match bounding box {width}x{height}")]
    MaskLength { len: usize, width: u32, height: u32 },
    #[error("shape mask has no occupied cells")]
    EmptyMask,
    #[error("shape row {row} contains {glyph:?}, expected '.' or '#'")]
    BadGlyph { row: usize, glyph: char },
    #[error("shape row {row} is {len} glyphs wide, expected {width}")]
    RaggedRow { row: usize, len: usize, width: usize },
}

/// Footprint of an item: a boolean occupancy mask over a bounding box,
/// row-major, `mask[y * width + x]`. Instances of the same item type share
/// one `Shape` via `Arc`.
///
/// Construction validates that the box is non-degenerate and the mask has
/// at least one occupied cell; the pickup-anchor contract depends on that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    width: u32,
    height: u32,
    mask: Vec<bool>,
    /// Occupied cells in reading order (y ascending, then x). Never empty.
    cells: SmallVec<[Cell; 8]>,
    /// Content-design anchor hint. Always an occupied cell when present;
    /// hints that miss the mask are dropped at construction.
    pickup_point: Option<Cell>,
}

impl Shape {
    pub fn new(
        width: u32,
        height: u32,
        mask: Vec<bool>,
        pickup_point: Option<Cell>,
    ) -> Result<Self, ShapeError> {
        if width == 0 || height == 0 {
            return Err(ShapeError::ZeroExtent { width, height });
        }
        if mask.len() != (width * height) as usize {
            return Err(ShapeError::MaskLength {
                len: mask.len(),
                width,
                height,
            });
        }

        let mut cells = SmallVec::new();
        for y in 0..height {
            for x in 0..width {
                if mask[(y * width + x) as usize] {
                    cells.push((x as i32, y as i32));
                }
            }
        }
        if cells.is_empty() {
            return Err(ShapeError::EmptyMask);
        }

        let pickup_point = pickup_point.and_then(|p| {
            if cells.contains(&p) {
                Some(p)
            } else {
                log::warn!("pickup point {p:?} is not an occupied cell, ignoring");
                None
            }
        });

        Ok(Self {
            width,
            height,
            mask,
            cells,
            pickup_point,
        })
    }

    /// Parse a shape from rows of `.` (empty) and `#` (occupied) glyphs.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ShapeError> {
        let (width, height, mask) = mask_from_rows(rows.iter().copied())?;
        Self::new(width, height, mask, None)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.1 >= 0 && cell.0 < self.width as i32 && cell.1 < self.height as i32
    }

    /// Whether `cell` is part of the footprint. Out-of-box cells are not.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.mask[(cell.1 as u32 * self.width + cell.0 as u32) as usize]
    }

    /// Occupied cells in reading order (y ascending, then x ascending).
    /// Guaranteed non-empty.
    pub fn occupied_cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn pickup_point(&self) -> Option<Cell> {
        self.pickup_point
    }
}

/// Serializable shape description, the form content design authors in TOML:
/// rows of `.`/`#` glyphs plus an optional pickup anchor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub rows: Vec<String>,
    #[serde(default)]
    pub pickup_point: Option<Cell>,
}

impl ShapeSpec {
    pub fn build(&self) -> Result<Shape, ShapeError> {
        let (width, height, mask) = mask_from_rows(self.rows.iter().map(String::as_str))?;
        Shape::new(width, height, mask, self.pickup_point)
    }
}

fn mask_from_rows<'a>(
    rows: impl Iterator<Item = &'a str>,
) -> Result<(u32, u32, Vec<bool>), ShapeError> {
    let mut width = 0usize;
    let mut height = 0u32;
    let mut mask = Vec::new();

    for (row, text) in rows.enumerate() {
        let glyphs: Vec<char> = text.chars().collect();
        if row == 0 {
            width = glyphs.len();
        } else if glyphs.len() != width {
            return Err(ShapeError::RaggedRow {
                row,
                len: glyphs.len(),
                width,
            });
        }
        for glyph in glyphs {
            match glyph {
                '.' => mask.push(false),
                '#' => mask.push(true),
                other => return Err(ShapeError::BadGlyph { row, glyph: other }),
            }
        }
        height += 1;
    }

    Ok((width as u32, height, mask))
}
