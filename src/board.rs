//! Board state for a two-sided match: ship and item placement, per-side shot
//! records, the turn flag, and the game-over flag.
//!
//! [`BoardState`] owns all mutable per-match data and is exclusively owned by
//! one match coordinator. Every mutating call notifies subscribed observers in
//! a fixed causal order; see [`crate::events`].

use std::collections::HashMap;

use log::debug;

use crate::events::BoardObserver;
use crate::items::{Collection, Item, ItemId, ItemStatus};
use crate::ships::{Ship, ShipId, ShipStatus};

use self::grid::Grid;
pub use self::{
    dimensions::{Coordinate, Dimensions},
    errors::{CannotShootReason, NotInitialized, PlacementError, ShotError},
};

mod dimensions;
mod errors;
mod grid;

/// One of the two competing parties in a match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    P1,
    P2,
}

impl Side {
    /// Both sides, in index order.
    pub const BOTH: [Side; 2] = [Side::P1, Side::P2];

    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
        }
    }
}

/// Provenance of a shot that was fired as part of a multi-cell pattern.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Provenance {
    /// ID of the pattern the shot belongs to.
    pub pattern: String,
    /// The center the pattern was fired around.
    pub center: Coordinate,
}

/// Record of a single resolved shot. Created once per (cell, side) and never
/// mutated or removed until the board is reset.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Shot {
    /// The cell the shot landed on.
    pub coord: Coordinate,
    /// The side that fired the shot.
    pub side: Side,
    /// Whether the shot hit an opposing ship.
    pub hit: bool,
    /// The ship that was hit, if any.
    pub ship: Option<ShipId>,
    /// Pattern identity and center, when the shot came from a pattern.
    pub provenance: Option<Provenance>,
    /// Collection metadata, when the shot collected part of an item.
    pub collection: Option<Collection>,
}

/// Effect of a single applied shot on the target board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotEffect {
    /// The shot did not hit a ship or collect anything.
    Miss,
    /// The shot missed all ships but collected part of an item.
    Collected {
        item: ItemId,
        /// Whether this shot completed the item's collection.
        completed: bool,
    },
    /// The shot hit the ship with the given ID but did not destroy it.
    Hit(ShipId),
    /// The shot hit the ship with the given ID and destroyed it.
    Destroyed(ShipId),
}

impl ShotEffect {
    /// Whether the shot hit a ship.
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotEffect::Hit(_) | ShotEffect::Destroyed(_))
    }

    /// Get the ID of the ship this shot destroyed, if any.
    pub fn destroyed_ship(&self) -> Option<ShipId> {
        match self {
            ShotEffect::Destroyed(id) => Some(*id),
            _ => None,
        }
    }
}

/// A shot that was applied to the board, together with its effect.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShotReport {
    /// The stored shot record.
    pub shot: Shot,
    /// What the shot did to the target board.
    pub effect: ShotEffect,
}

/// Immutable view of one side's board within a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SideSnapshot {
    /// Damage state of the side's fleet, ordered by ship ID.
    pub ships: Vec<ShipStatus>,
    /// Collection state of the side's items, ordered by item ID.
    pub items: Vec<ItemStatus>,
    /// Shots that have landed on this side's board, in the order they landed.
    pub shots: Vec<Shot>,
    /// Whether every ship of this side has been destroyed. `false` for an
    /// empty fleet.
    pub all_destroyed: bool,
}

/// Immutable view of the whole match state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The side whose turn it currently is.
    pub turn: Side,
    /// Whether the match has ended.
    pub game_over: bool,
    /// The winner, if the match has ended.
    pub winner: Option<Side>,
    sides: [SideSnapshot; 2],
}

impl Snapshot {
    /// Get the view of the given side's board.
    pub fn side(&self, side: Side) -> &SideSnapshot {
        &self.sides[side.index()]
    }
}

/// Everything belonging to one side: their grid, fleet, items, and the record
/// of shots that have landed on their board.
struct SideState {
    grid: Grid,
    ships: HashMap<ShipId, ShipStatus>,
    items: HashMap<ItemId, ItemStatus>,
    /// Incoming shots, i.e. shots fired by the opponent. Append-only.
    shots: Vec<Shot>,
}

impl SideState {
    fn new(dim: Dimensions) -> Self {
        Self {
            grid: Grid::new(dim),
            ships: HashMap::new(),
            items: HashMap::new(),
            shots: Vec::new(),
        }
    }

    fn place_ships(&mut self, ships: Vec<Ship>) -> Result<(), PlacementError> {
        for ship in ships {
            let id = ship.id();
            if self.ships.contains_key(&id) {
                return Err(PlacementError::DuplicateShip(id));
            }
            for coord in ship.cells() {
                match self.grid.get(coord) {
                    None => return Err(PlacementError::ShipOutOfBounds(id)),
                    Some(cell) if cell.ship.is_some() => {
                        return Err(PlacementError::ShipOverlap(id))
                    }
                    _ => {}
                }
            }
            for coord in ship.cells() {
                self.grid[coord].ship = Some(id);
            }
            self.ships.insert(id, ShipStatus::new(ship));
        }
        Ok(())
    }

    fn place_items(&mut self, items: Vec<Item>) -> Result<(), PlacementError> {
        for item in items {
            let id = item.id();
            if self.items.contains_key(&id) {
                return Err(PlacementError::DuplicateItem(id));
            }
            for coord in item.cells() {
                match self.grid.get(coord) {
                    None => return Err(PlacementError::ItemOutOfBounds(id)),
                    Some(cell) if cell.ship.is_some() || cell.item.is_some() => {
                        return Err(PlacementError::ItemOverlap(id))
                    }
                    _ => {}
                }
            }
            for coord in item.cells() {
                self.grid[coord].item = Some(id);
            }
            self.items.insert(id, ItemStatus::new(item));
        }
        Ok(())
    }

    fn all_destroyed(&self) -> bool {
        !self.ships.is_empty() && self.ships.values().all(|s| s.destroyed())
    }

    fn snapshot(&self) -> SideSnapshot {
        let mut ships: Vec<ShipStatus> = self.ships.values().cloned().collect();
        ships.sort_by_key(|s| s.ship.id());
        let mut items: Vec<ItemStatus> = self.items.values().cloned().collect();
        items.sort_by_key(|i| i.item.id());
        SideSnapshot {
            ships,
            items,
            shots: self.shots.clone(),
            all_destroyed: self.all_destroyed(),
        }
    }
}

/// All mutable per-match data: ship cells, item cells, per-side shot records,
/// the turn flag, and the game-over flag.
pub struct BoardState {
    dim: Dimensions,
    sides: [SideState; 2],
    turn: Side,
    game_over: bool,
    winner: Option<Side>,
    initialized: bool,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl BoardState {
    /// Create an empty board with the given dimensions. The board accepts no
    /// mutations until [`initialize`][Self::initialize] stores placements.
    pub fn new(dim: Dimensions) -> Self {
        Self {
            dim,
            sides: [SideState::new(dim), SideState::new(dim)],
            turn: Side::P1,
            game_over: false,
            winner: None,
            initialized: false,
            observers: Vec::new(),
        }
    }

    /// Subscribe an observer to board notifications. Observers survive
    /// [`reset`][Self::reset] and re-initialization.
    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    /// Get the [`Dimensions`] of this board.
    pub fn dimensions(&self) -> Dimensions {
        self.dim
    }

    /// Whether [`initialize`][Self::initialize] has stored placements since
    /// construction or the last reset.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reset all maps and counters and store fresh placements. Items and ships
    /// are validated against bounds and mutual overlap; placements are
    /// otherwise trusted to come from the external generator. On success the
    /// match-start and state notifications are delivered.
    pub fn initialize(
        &mut self,
        p1_ships: Vec<Ship>,
        p2_ships: Vec<Ship>,
        starting: Side,
        p1_items: Vec<Item>,
        p2_items: Vec<Item>,
    ) -> Result<(), PlacementError> {
        let mut sides = [SideState::new(self.dim), SideState::new(self.dim)];
        sides[Side::P1.index()].place_ships(p1_ships)?;
        sides[Side::P2.index()].place_ships(p2_ships)?;
        sides[Side::P1.index()].place_items(p1_items)?;
        sides[Side::P2.index()].place_items(p2_items)?;

        self.sides = sides;
        self.turn = starting;
        self.game_over = false;
        self.winner = None;
        self.initialized = true;
        debug!("board initialized, {:?} to act", starting);

        for obs in &mut self.observers {
            obs.on_match_start(starting);
        }
        self.notify_state();
        Ok(())
    }

    /// Clear all placements and counters, returning the board to its
    /// uninitialized state. Observers stay subscribed.
    pub fn reset(&mut self) {
        self.sides = [SideState::new(self.dim), SideState::new(self.dim)];
        self.turn = Side::P1;
        self.game_over = false;
        self.winner = None;
        self.initialized = false;
    }

    /// Bounds check for a cell.
    pub fn is_valid_position(&self, coord: Coordinate) -> bool {
        self.dim.contains(coord)
    }

    /// Whether the given side has already fired at the given cell. Out-of-
    /// bounds cells report `false`.
    pub fn is_cell_shot(&self, coord: Coordinate, side: Side) -> bool {
        self.target(side)
            .grid
            .get(coord)
            .map_or(false, |cell| cell.shot.is_some())
    }

    /// Whether the given side's own board has a ship occupying the cell.
    pub fn has_ship_at(&self, coord: Coordinate, side: Side) -> bool {
        self.sides[side.index()]
            .grid
            .get(coord)
            .map_or(false, |cell| cell.ship.is_some())
    }

    /// Pure hit test: the ship the given side would hit by firing at the cell.
    /// Does not mutate anything.
    pub fn check_shot(&self, coord: Coordinate, side: Side) -> Option<ShipId> {
        self.target(side).grid.get(coord).and_then(|cell| cell.ship)
    }

    /// Get the shot the given side fired at the cell, if any.
    pub fn shot_at(&self, coord: Coordinate, side: Side) -> Option<&Shot> {
        let target = self.target(side);
        target
            .grid
            .get(coord)
            .and_then(|cell| cell.shot)
            .map(|idx| &target.shots[idx])
    }

    /// The side whose turn it currently is.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Whether the match has ended.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winner of the match, if it has ended.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Apply a shot by `side` at `coord` against the opposing board.
    ///
    /// Rejects without any state change if the board is uninitialized, the
    /// match is over, the cell is out of bounds, or the cell was already shot
    /// by that side. Otherwise records the shot, increments the hit counter of
    /// the struck ship on a hit, or attempts item collection on a miss.
    /// Delivers the shot and state notifications before returning.
    pub fn apply_shot(
        &mut self,
        coord: Coordinate,
        side: Side,
        provenance: Option<Provenance>,
    ) -> Result<ShotReport, ShotError> {
        if !self.initialized {
            return Err(ShotError::new(CannotShootReason::NotInitialized, coord));
        }
        if self.game_over {
            return Err(ShotError::new(CannotShootReason::MatchOver, coord));
        }
        let idx = self
            .dim
            .try_linearize(coord)
            .ok_or_else(|| ShotError::new(CannotShootReason::OutOfBounds, coord))?;

        let target = &mut self.sides[side.opponent().index()];
        let cell = &target.grid.cells[idx];
        if cell.shot.is_some() {
            return Err(ShotError::new(CannotShootReason::AlreadyShot, coord));
        }

        let (effect, hit_ship, collection) = match cell.ship {
            Some(ship_id) => {
                // First shot on a previously-unshot ship cell, so the hit
                // counter advances exactly once per cell.
                let status = target
                    .ships
                    .get_mut(&ship_id)
                    .expect("grid cell references unknown ship");
                status.hits += 1;
                let effect = if status.destroyed() {
                    ShotEffect::Destroyed(ship_id)
                } else {
                    ShotEffect::Hit(ship_id)
                };
                (effect, Some(ship_id), None)
            }
            None => match cell.item {
                Some(item_id) => {
                    let status = target
                        .items
                        .get_mut(&item_id)
                        .expect("grid cell references unknown item");
                    match status.collect() {
                        Some(collection) => (
                            ShotEffect::Collected {
                                item: collection.item,
                                completed: collection.completed,
                            },
                            None,
                            Some(collection),
                        ),
                        // Fully-collected items are neutral: the shot is an
                        // ordinary miss.
                        None => (ShotEffect::Miss, None, None),
                    }
                }
                None => (ShotEffect::Miss, None, None),
            },
        };

        let shot = Shot {
            coord,
            side,
            hit: hit_ship.is_some(),
            ship: hit_ship,
            provenance,
            collection,
        };
        let shot_idx = target.shots.len();
        target.shots.push(shot.clone());
        target.grid.cells[idx].shot = Some(shot_idx);
        debug!("{:?} shot {:?}: {:?}", side, coord, effect);

        for obs in &mut self.observers {
            obs.on_shot(&shot);
        }
        self.notify_state();
        Ok(ShotReport { shot, effect })
    }

    /// Toggle the acting side. Delivers the state and turn notifications.
    pub fn toggle_side(&mut self) -> Result<Side, NotInitialized> {
        if !self.initialized {
            return Err(NotInitialized);
        }
        self.turn = self.turn.opponent();
        let turn = self.turn;
        self.notify_state();
        for obs in &mut self.observers {
            obs.on_turn(turn);
        }
        Ok(turn)
    }

    /// Mark the match as over with the given winner (or none, for policies
    /// that can declare a draw). A second call after the match has ended is a
    /// no-op, so the winner is assigned at most once. Delivers the state and
    /// game-over notifications when the flag is newly set.
    pub fn set_game_over(&mut self, winner: Option<Side>) -> Result<(), NotInitialized> {
        if !self.initialized {
            return Err(NotInitialized);
        }
        if self.game_over {
            return Ok(());
        }
        self.game_over = true;
        self.winner = winner;
        debug!("game over, winner {:?}", winner);
        self.notify_state();
        for obs in &mut self.observers {
            obs.on_game_over(winner);
        }
        Ok(())
    }

    /// Build an immutable view of the whole match state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            game_over: self.game_over,
            winner: self.winner,
            sides: [
                self.sides[0].snapshot(),
                self.sides[1].snapshot(),
            ],
        }
    }

    /// The side state a shot by `side` lands on.
    fn target(&self, side: Side) -> &SideState {
        &self.sides[side.opponent().index()]
    }

    fn notify_state(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for obs in &mut self.observers {
            obs.on_state(&snapshot);
        }
    }
}
