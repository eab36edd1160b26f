//! Fixed-capacity placement grid for the garden canvas.
//!
//! 5 rows by 6 columns of slots. Each slot's canvas position is a
//! closed-form isometric transform of its (row, col) -- no geometry solver,
//! just the affine staggered-tile formula the canvas renders with.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grid dimensions.
pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 6;
/// Maximum trees in one garden.
pub const CAPACITY: usize = GRID_ROWS * GRID_COLS;

/// Isometric tile dimensions on the canvas.
pub const TILE_WIDTH: f64 = 140.0;
pub const TILE_HEIGHT: f64 = 70.0;

/// Canvas size (matches the ground image).
pub const CANVAS_SIZE: f64 = 1024.0;
/// Grass surface positioning.
pub const GRASS_CENTER_X: f64 = 512.0;
pub const GRASS_START_Y: f64 = 180.0;

/// A point on the garden canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A single placement slot in the garden grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementSlot {
    pub id: Uuid,
    pub row: usize,
    pub col: usize,
    pub occupied: bool,
    pub planted_tree_id: Option<Uuid>,
    pub tree_type_id: Option<String>,
}

impl PlacementSlot {
    fn new(row: usize, col: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            row,
            col,
            occupied: false,
            planted_tree_id: None,
            tree_type_id: None,
        }
    }

    /// Canvas position derived from grid coordinates.
    ///
    /// Each row staggers half a tile to the right.
    pub fn position(&self) -> Point {
        let x = GRASS_CENTER_X
            + (self.col as f64 - 3.0) * TILE_WIDTH
            + self.row as f64 * (TILE_WIDTH / 2.0);
        let y = GRASS_START_Y + self.row as f64 * TILE_HEIGHT;
        Point { x, y }
    }
}

/// Grid of placement slots, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenGrid {
    slots: Vec<PlacementSlot>,
}

impl GardenGrid {
    /// Empty grid with all `GRID_ROWS * GRID_COLS` slots free.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(CAPACITY);
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                slots.push(PlacementSlot::new(row, col));
            }
        }
        Self { slots }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn slots(&self) -> &[PlacementSlot] {
        &self.slots
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() >= CAPACITY
    }

    /// All unoccupied slots, row-major.
    pub fn available_slots(&self) -> Vec<&PlacementSlot> {
        self.slots.iter().filter(|s| !s.occupied).collect()
    }

    /// Slot at (row, col), or `None` out of range.
    pub fn slot(&self, row: usize, col: usize) -> Option<&PlacementSlot> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return None;
        }
        self.slots.get(row * GRID_COLS + col)
    }

    /// Unoccupied slot nearest to a canvas point, by Euclidean distance.
    ///
    /// Returns `None` when the grid is full. Ties resolve to the first
    /// minimum in row-major order.
    pub fn nearest_available_slot(&self, point: Point) -> Option<&PlacementSlot> {
        self.slots
            .iter()
            .filter(|s| !s.occupied)
            .min_by(|a, b| {
                let da = a.position().distance_to(point);
                let db = b.position().distance_to(point);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark a slot as occupied by a planted tree.
    ///
    /// Returns `false` when the coordinates are out of range or the slot is
    /// already taken; the grid is unchanged in either case.
    pub fn occupy(&mut self, row: usize, col: usize, tree_id: Uuid, tree_type_id: &str) -> bool {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return false;
        }
        let slot = &mut self.slots[row * GRID_COLS + col];
        if slot.occupied {
            return false;
        }
        slot.occupied = true;
        slot.planted_tree_id = Some(tree_id);
        slot.tree_type_id = Some(tree_type_id.to_string());
        true
    }
}

impl Default for GardenGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_grid_is_empty() {
        let grid = GardenGrid::new();
        assert_eq!(grid.slots().len(), CAPACITY);
        assert_eq!(grid.occupied_count(), 0);
        assert!(!grid.is_full());
    }

    #[test]
    fn positions_follow_isometric_stagger() {
        let grid = GardenGrid::new();
        let origin = grid.slot(0, 3).unwrap().position();
        assert_eq!(origin, Point::new(GRASS_CENTER_X, GRASS_START_Y));

        // One row down: half a tile right, one tile-height down.
        let below = grid.slot(1, 3).unwrap().position();
        assert_eq!(below.x, GRASS_CENTER_X + TILE_WIDTH / 2.0);
        assert_eq!(below.y, GRASS_START_Y + TILE_HEIGHT);
    }

    #[test]
    fn occupy_fills_to_capacity() {
        let mut grid = GardenGrid::new();
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                assert!(grid.occupy(row, col, Uuid::new_v4(), "oak"));
            }
        }
        assert!(grid.is_full());
        assert!(grid.available_slots().is_empty());
        assert!(grid.nearest_available_slot(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn occupy_rejects_taken_slot() {
        let mut grid = GardenGrid::new();
        let first = Uuid::new_v4();
        assert!(grid.occupy(2, 3, first, "oak"));
        assert!(!grid.occupy(2, 3, Uuid::new_v4(), "pine"));

        let slot = grid.slot(2, 3).unwrap();
        assert_eq!(slot.planted_tree_id, Some(first));
        assert_eq!(slot.tree_type_id.as_deref(), Some("oak"));
    }

    #[test]
    fn occupy_rejects_out_of_bounds() {
        let mut grid = GardenGrid::new();
        assert!(!grid.occupy(GRID_ROWS, 0, Uuid::new_v4(), "oak"));
        assert!(!grid.occupy(0, GRID_COLS, Uuid::new_v4(), "oak"));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn nearest_slot_with_one_free() {
        let mut grid = GardenGrid::new();
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                if (row, col) != (4, 5) {
                    grid.occupy(row, col, Uuid::new_v4(), "oak");
                }
            }
        }
        // Single free slot wins regardless of the query point.
        for point in [
            Point::new(0.0, 0.0),
            Point::new(CANVAS_SIZE, CANVAS_SIZE),
            Point::new(-500.0, 9000.0),
        ] {
            let slot = grid.nearest_available_slot(point).unwrap();
            assert_eq!((slot.row, slot.col), (4, 5));
        }
    }

    #[test]
    fn nearest_slot_prefers_closest() {
        let grid = GardenGrid::new();
        let target = grid.slot(3, 2).unwrap().position();
        let found = grid.nearest_available_slot(target).unwrap();
        assert_eq!((found.row, found.col), (3, 2));
    }
}
