//! Defines the types that make up one side's grid: ship and item occupancy
//! plus the record of incoming shots.

use std::ops::{Index, IndexMut};

use crate::board::{Coordinate, Dimensions};
use crate::items::ItemId;
use crate::ships::ShipId;

/// A single cell in one side's grid.
#[derive(Debug, Clone)]
pub(super) struct GridCell {
    /// The ID of the ship that occupies this cell, if any.
    pub(super) ship: Option<ShipId>,

    /// The ID of the item that occupies this cell, if any. Ships and items are
    /// mutually exclusive per cell; this is enforced at initialization.
    pub(super) item: Option<ItemId>,

    /// Index into the side's shot log of the shot that landed here, if any.
    pub(super) shot: Option<usize>,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            ship: None,
            item: None,
            shot: None,
        }
    }
}

/// Grid of cells belonging to one side of the match. Lookup is by linearized
/// coordinate so per-shot validation stays O(1).
#[derive(Debug, Clone)]
pub(super) struct Grid {
    /// Dimensions of this grid.
    pub(super) dim: Dimensions,
    /// Cells that make up this grid.
    pub(super) cells: Box<[GridCell]>,
}

impl Grid {
    pub(super) fn new(dim: Dimensions) -> Self {
        let cells = (0..dim.total_size()).map(|_| Default::default()).collect();
        Self { dim, cells }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(super) fn get(&self, coord: Coordinate) -> Option<&GridCell> {
        self.dim
            .try_linearize(coord)
            .and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut(&mut self, coord: Coordinate) -> Option<&mut GridCell> {
        self.dim
            .try_linearize(coord)
            .and_then(move |i| self.cells.get_mut(i))
    }
}

impl Index<Coordinate> for Grid {
    type Output = GridCell;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}
