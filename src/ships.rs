//! Types used for defining ships and their footprints.

use crate::board::Coordinate;

/// Identity of a ship within a single side's fleet. IDs are cheap to copy and
/// only need to be unique within one side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub u32);

/// A rectangular ship. Occupies `width * height` cells starting from its
/// top-left origin. Immutable after placement.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    /// Identity of this ship within its side's fleet.
    id: ShipId,
    /// Top-left cell of the ship.
    origin: Coordinate,
    /// Number of cells along the `x` axis.
    width: usize,
    /// Number of cells along the `y` axis.
    height: usize,
}

impl Ship {
    /// Construct a ship with the given footprint. Panics if either dimension
    /// is 0.
    pub fn new(id: ShipId, origin: Coordinate, width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "ship must occupy at least one cell");
        Self {
            id,
            origin,
            width,
            height,
        }
    }

    /// Get the ID of this ship.
    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Get the top-left cell of this ship.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Get the width of this ship.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of this ship.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells this ship occupies.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Get an iterator over the coordinates occupied by this ship.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let origin = self.origin;
        let width = self.width;
        (0..self.height).flat_map(move |dy| {
            (0..width).map(move |dx| Coordinate::new(origin.x + dx, origin.y + dy))
        })
    }

    /// Check whether this ship occupies the given coordinate.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x >= self.origin.x
            && coord.x < self.origin.x + self.width
            && coord.y >= self.origin.y
            && coord.y < self.origin.y + self.height
    }
}

/// Per-match damage state of a placed ship.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShipStatus {
    /// The placed ship.
    pub ship: Ship,
    /// Number of distinct cells of this ship that have been hit. Never exceeds
    /// `ship.cell_count()`.
    pub hits: usize,
}

impl ShipStatus {
    pub(crate) fn new(ship: Ship) -> Self {
        Self { ship, hits: 0 }
    }

    /// A ship is destroyed exactly when every one of its cells has been hit.
    pub fn destroyed(&self) -> bool {
        self.hits == self.ship.cell_count()
    }
}
