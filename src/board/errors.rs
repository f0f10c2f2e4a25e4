//! Errors used by [`BoardState`][crate::board::BoardState].

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::board::Coordinate;
use crate::items::ItemId;
use crate::ships::ShipId;

/// Reason why the initial placements handed to `initialize` were rejected.
/// Placements come from an external generator which is expected to produce
/// valid layouts; any violation is rejected up front rather than special-cased
/// during shot resolution.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum PlacementError {
    /// Two ships were given the same ID on one side.
    #[error("duplicate ship id {0:?}")]
    DuplicateShip(ShipId),
    /// Part of the ship's footprint falls outside the board.
    #[error("ship {0:?} extends outside the board")]
    ShipOutOfBounds(ShipId),
    /// The ship overlaps another ship on the same side.
    #[error("ship {0:?} overlaps another ship")]
    ShipOverlap(ShipId),
    /// Two items were given the same ID on one side.
    #[error("duplicate item id {0:?}")]
    DuplicateItem(ItemId),
    /// Part of the item's run falls outside the board.
    #[error("item {0:?} extends outside the board")]
    ItemOutOfBounds(ItemId),
    /// The item overlaps a ship or another item on the same side.
    #[error("item {0:?} overlaps a ship or another item")]
    ItemOverlap(ItemId),
}

/// Error returned by mutators invoked before `initialize` has stored
/// placements. Doing so is a programmer error and is reported explicitly
/// rather than silently operating on an empty board.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("board has not been initialized")]
pub struct NotInitialized;

/// Reason why a particular cell could not be shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The board has not been initialized with placements yet.
    NotInitialized,

    /// The match has already ended.
    MatchOver,

    /// The cell selected was out of bounds on the board.
    OutOfBounds,

    /// A shot has already been fired at that cell by that side.
    AlreadyShot,
}

/// Error returned when trying to shoot a cell.
#[derive(Error)]
#[error("could not shoot cell {coord:?}: {reason:?}")]
pub struct ShotError {
    /// Reason why the cell could not be shot.
    reason: CannotShootReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(crate) fn new(reason: CannotShootReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

impl Debug for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
