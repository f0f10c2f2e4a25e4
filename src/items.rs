//! Collectible items and their collection state.
//!
//! Items live on a side's board alongside ships but are collected rather than
//! destroyed: a shot that misses every ship and lands on an unshot item cell
//! advances the item's collection counter. An item whose counter reaches its
//! `part` count is fully collected; shots on its cells after that are neutral.

use crate::board::Coordinate;

/// Identity of an item within a single side's board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

/// A collectible item laid out as a horizontal run of `part` cells starting
/// from its top-left origin. Immutable after placement.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Item {
    /// Identity of this item within its side's board.
    id: ItemId,
    /// Leftmost cell of the run.
    origin: Coordinate,
    /// Number of cells in the run.
    part: usize,
    /// Template tag identifying the kind of collectible.
    template: String,
}

impl Item {
    /// Construct an item with the given footprint. Panics if `part` is 0.
    pub fn new(id: ItemId, origin: Coordinate, part: usize, template: impl Into<String>) -> Self {
        assert!(part > 0, "item must occupy at least one cell");
        Self {
            id,
            origin,
            part,
            template: template.into(),
        }
    }

    /// Get the ID of this item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Get the leftmost cell of this item.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Number of cells this item occupies.
    pub fn part(&self) -> usize {
        self.part
    }

    /// Template tag identifying the kind of collectible.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Get an iterator over the coordinates occupied by this item.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let origin = self.origin;
        (0..self.part).map(move |dx| Coordinate::new(origin.x + dx, origin.y))
    }
}

/// Collection metadata attached to a [`Shot`][crate::board::Shot] that landed
/// on a collectible cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Collection {
    /// The item the shot collected a part of.
    pub item: ItemId,
    /// Whether this shot completed the item's collection.
    pub completed: bool,
}

/// Per-match collection state of a placed item.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ItemStatus {
    /// The placed item.
    pub item: Item,
    /// Number of distinct cells of this item that have been collected. Never
    /// exceeds `item.part()`.
    pub collected: usize,
    /// Whether every cell of this item has been collected.
    pub complete: bool,
}

impl ItemStatus {
    pub(crate) fn new(item: Item) -> Self {
        Self {
            item,
            collected: 0,
            complete: false,
        }
    }

    /// Attempt to collect one cell of this item. Returns the metadata to
    /// attach to the shot record, or `None` if the item is already fully
    /// collected (a neutral no-op).
    pub(crate) fn collect(&mut self) -> Option<Collection> {
        if self.complete {
            return None;
        }
        self.collected += 1;
        if self.collected == self.item.part() {
            self.complete = true;
        }
        Some(Collection {
            item: self.item.id(),
            completed: self.complete,
        })
    }
}
