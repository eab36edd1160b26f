//! Drag-and-confirm planting flow.
//!
//! Coordinator-level flow between a ready tree and the grid: the flow holds
//! the candidate while the user drags, re-targeting the nearest free slot;
//! the grid is only mutated on `confirm`. Dropping or cancelling the flow
//! before confirmation leaves the grid exactly as it was.

use super::grid::{GardenGrid, Point};
use crate::growth::PlantedTree;

/// In-flight placement of one ready tree.
#[derive(Debug, Clone)]
pub struct PlantingFlow {
    tree: PlantedTree,
    target: Option<(usize, usize)>,
}

impl PlantingFlow {
    pub fn new(tree: PlantedTree) -> Self {
        Self { tree, target: None }
    }

    pub fn tree(&self) -> &PlantedTree {
        &self.tree
    }

    /// Currently highlighted slot, if any.
    pub fn target(&self) -> Option<(usize, usize)> {
        self.target
    }

    /// Re-target to the free slot nearest the drag point.
    ///
    /// Returns the highlighted coordinates, or `None` when the grid is full.
    pub fn drag_to(&mut self, grid: &GardenGrid, point: Point) -> Option<(usize, usize)> {
        self.target = grid
            .nearest_available_slot(point)
            .map(|slot| (slot.row, slot.col));
        self.target
    }

    /// Pin an explicit slot instead of dragging.
    pub fn target_slot(&mut self, row: usize, col: usize) {
        self.target = Some((row, col));
    }

    /// Commit the placement.
    ///
    /// On success the grid is updated and the planted tree is returned with
    /// its slot. On failure (no target, slot taken, out of range) the flow
    /// is handed back unchanged so the caller can retry or cancel.
    pub fn confirm(self, grid: &mut GardenGrid) -> Result<(PlantedTree, (usize, usize)), Self> {
        let Some((row, col)) = self.target else {
            return Err(self);
        };
        if grid.occupy(row, col, self.tree.id, &self.tree.tree_type_id) {
            Ok((self.tree, (row, col)))
        } else {
            Err(self)
        }
    }

    /// Abandon the placement, recovering the tree.
    pub fn cancel(self) -> PlantedTree {
        self.tree
    }
}
