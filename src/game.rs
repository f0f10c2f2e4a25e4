//! The match coordinator: a small state machine orchestrating
//! Plan → Attack → Resolve-Turn → (loop | GameOver).
//!
//! The coordinator owns the one pending (uncommitted) plan and drives
//! [`BoardState`] and the active [`RuleSet`]. The `Attacking` and
//! `ResolvingTurn` phases are transient: both run to completion inside
//! [`confirm_attack`][MatchCoordinator::confirm_attack], so pattern
//! resolution, the turn-toggle decision, and game-over detection are observed
//! as a single atomic unit. No cancel or re-plan can interleave between "shot
//! resolved" and "turn decided".

use log::{debug, warn};

use crate::board::{BoardState, Coordinate, Dimensions, Shot, Side};
use crate::events::BoardObserver;
use crate::items::{Item, ItemStatus};
use crate::pattern::{self, ResolvedShot, ShotPattern};
use crate::rules::{AttackAggregate, RuleSet};
use crate::ships::{Ship, ShipStatus};

pub use self::errors::{AttackError, CannotPlanReason, InitializeError, MatchError, PlanError};

mod errors;

/// Phase of the match state machine. `Attacking` and `ResolvingTurn` exist
/// only inside `confirm_attack`; external callers can never observe them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchPhase {
    /// No match has been initialized.
    Idle,
    /// A match is running and no plan is pending.
    Planning,
    /// A plan is pending confirmation.
    Planned,
    /// A confirmed pattern is being resolved against the board (transient).
    Attacking,
    /// The rule set is deciding turn continuation and game-over (transient).
    ResolvingTurn,
    /// The match has ended.
    GameOver,
}

/// A tentative, uncommitted attack: pattern, center, and acting side.
/// Exists only between a successful plan and its confirmation or cancellation.
#[derive(Debug, Clone)]
pub struct PendingPlan {
    /// The chosen center cell.
    pub center: Coordinate,
    /// The chosen pattern.
    pub pattern: ShotPattern,
    /// The side that will fire.
    pub side: Side,
}

/// Outcome of a confirmed attack: the per-offset shot list plus the turn and
/// game-over consequences decided by the active rule set.
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    /// One entry per pattern offset, in firing order.
    pub shots: Vec<ResolvedShot>,
    /// Whether any executed shot hit a ship.
    pub any_hit: bool,
    /// Whether any executed shot destroyed a ship.
    pub any_ship_destroyed: bool,
    /// Whether the acting side's turn ended.
    pub turn_ended: bool,
    /// Whether the acting side may act again immediately.
    pub can_act_again: bool,
    /// Whether the match ended on this attack.
    pub is_game_over: bool,
    /// The winner, if the match ended.
    pub winner: Option<Side>,
    /// Human-readable reason for the turn decision.
    pub reason: &'static str,
}

/// Read-only projection of one side's own board: their fleet and the shots
/// that have landed on it. Consumed by a presentation layer, which must not
/// mutate state directly.
#[derive(Debug, Clone)]
pub struct OwnBoardView {
    /// The side's fleet with damage state.
    pub ships: Vec<ShipStatus>,
    /// The side's collectibles with collection state.
    pub items: Vec<ItemStatus>,
    /// Shots the opponent has fired at this board.
    pub incoming: Vec<Shot>,
}

/// Read-only projection of the opposing board as one side sees it: their own
/// outgoing shots plus the visible collectibles.
#[derive(Debug, Clone)]
pub struct OpponentBoardView {
    /// Shots this side has fired at the opponent.
    pub outgoing: Vec<Shot>,
    /// Collectibles on the opposing board with collection state.
    pub items: Vec<ItemStatus>,
}

/// Orchestrates one match: owns the board, the pending plan, and the active
/// rule set. Independent matches use independent coordinators with no shared
/// state.
pub struct MatchCoordinator {
    board: BoardState,
    rules: Box<dyn RuleSet>,
    phase: MatchPhase,
    pending: Option<PendingPlan>,
}

impl MatchCoordinator {
    /// Create a coordinator for boards of the given dimensions with the given
    /// turn policy. The match stays [`MatchPhase::Idle`] until
    /// [`initialize`][Self::initialize].
    pub fn new(dim: Dimensions, rules: Box<dyn RuleSet>) -> Self {
        Self {
            board: BoardState::new(dim),
            rules,
            phase: MatchPhase::Idle,
            pending: None,
        }
    }

    /// Subscribe an observer to board notifications, e.g. a transport
    /// replicating local actions to a remote peer.
    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) {
        self.board.subscribe(observer);
    }

    /// Initialize the match with placements from the external generator and
    /// move to `Planning`. Fails if a match is already running (reset first)
    /// or the placements are invalid.
    pub fn initialize(
        &mut self,
        p1_ships: Vec<Ship>,
        p2_ships: Vec<Ship>,
        starting: Side,
        p1_items: Vec<Item>,
        p2_items: Vec<Item>,
    ) -> Result<(), InitializeError> {
        if self.phase != MatchPhase::Idle {
            return Err(InitializeError::AlreadyStarted);
        }
        self.board
            .initialize(p1_ships, p2_ships, starting, p1_items, p2_items)?;
        self.pending = None;
        self.phase = MatchPhase::Planning;
        Ok(())
    }

    /// Store a pending plan for `side` to fire `pattern` around `center`.
    ///
    /// The center must be on the board; single-cell patterns additionally
    /// reject a center that side has already shot. A valid plan atomically
    /// replaces any previous pending plan. On rejection nothing changes and
    /// the previous plan, if any, stays pending.
    pub fn plan_shot(
        &mut self,
        center: Coordinate,
        pattern: &ShotPattern,
        side: Side,
    ) -> Result<(), PlanError> {
        let reason = match self.phase {
            MatchPhase::Idle => Some(CannotPlanReason::NotStarted),
            MatchPhase::Planning | MatchPhase::Planned => {
                if !self.board.is_valid_position(center) {
                    Some(CannotPlanReason::InvalidPosition)
                } else if pattern.is_single() && self.board.is_cell_shot(center, side) {
                    Some(CannotPlanReason::CellAlreadyShot)
                } else {
                    None
                }
            }
            // GameOver, or a transient phase that external callers should
            // never see.
            _ => Some(CannotPlanReason::InvalidPlan),
        };
        if let Some(reason) = reason {
            warn!("plan at {:?} rejected: {:?}", center, reason);
            return Err(PlanError::new(reason, center));
        }
        debug!(
            "{:?} planned pattern {} at {:?}",
            side,
            pattern.id(),
            center
        );
        self.pending = Some(PendingPlan {
            center,
            pattern: pattern.clone(),
            side,
        });
        self.phase = MatchPhase::Planned;
        Ok(())
    }

    /// Clear the pending plan and return to `Planning`. Returns `true` if a
    /// plan was pending.
    pub fn cancel_plan(&mut self) -> bool {
        let had_plan = self.pending.take().is_some();
        if self.phase == MatchPhase::Planned {
            self.phase = MatchPhase::Planning;
        }
        had_plan
    }

    /// Confirm the pending plan: resolve the pattern against the board, then
    /// consult the rule set for turn continuation and game-over. The whole
    /// sequence runs inside this call; nothing can interleave.
    pub fn confirm_attack(&mut self) -> Result<AttackOutcome, AttackError> {
        match self.phase {
            MatchPhase::Idle => return Err(AttackError::NotStarted),
            MatchPhase::GameOver => return Err(AttackError::GameAlreadyOver),
            MatchPhase::Planned => {}
            _ => return Err(AttackError::NoAttackPlanned),
        }
        let plan = self.pending.take().ok_or(AttackError::NoAttackPlanned)?;

        self.phase = MatchPhase::Attacking;
        let resolution =
            match pattern::resolve(&mut self.board, plan.center, &plan.pattern, plan.side) {
                Ok(resolution) => resolution,
                Err(err) => {
                    // The plan was validated and the board is live, so any
                    // failure here is an internal inconsistency.
                    warn!("attack at {:?} failed to resolve: {}", plan.center, err);
                    self.phase = MatchPhase::Planning;
                    return Err(AttackError::AttackFailed);
                }
            };

        self.phase = MatchPhase::ResolvingTurn;
        let aggregate = AttackAggregate {
            side: plan.side,
            any_hit: resolution.any_hit,
            any_ship_destroyed: resolution.any_ship_destroyed,
        };
        let decision = self.rules.decide_turn(&aggregate, &self.board.snapshot());
        if decision.toggle_side {
            self.board
                .toggle_side()
                .map_err(|_| AttackError::AttackFailed)?;
        }
        // The rule set is the single source of truth for game-over; it is
        // consulted exactly once per turn resolution, after any toggle.
        let game_over = self.rules.check_game_over(&self.board.snapshot());
        if game_over.over {
            self.board
                .set_game_over(game_over.winner)
                .map_err(|_| AttackError::AttackFailed)?;
            self.phase = MatchPhase::GameOver;
        } else {
            self.phase = MatchPhase::Planning;
        }

        // Game-over takes priority over whatever the turn decision granted,
        // even on the very shot that finished the match.
        Ok(AttackOutcome {
            shots: resolution.shots,
            any_hit: resolution.any_hit,
            any_ship_destroyed: resolution.any_ship_destroyed,
            turn_ended: decision.end_turn || game_over.over,
            can_act_again: decision.can_act_again && !game_over.over,
            is_game_over: game_over.over,
            winner: game_over.winner,
            reason: if game_over.over {
                "Game over"
            } else {
                decision.reason
            },
        })
    }

    /// Convenience for plan followed by confirm, defaulting to the single-
    /// cell pattern.
    pub fn plan_and_attack(
        &mut self,
        center: Coordinate,
        side: Side,
        pattern: Option<&ShotPattern>,
    ) -> Result<AttackOutcome, MatchError> {
        self.plan_shot(center, pattern.unwrap_or_else(|| pattern::single()), side)?;
        Ok(self.confirm_attack()?)
    }

    /// Abandon the match: clear the board and pending plan and return to
    /// `Idle`. Observers stay subscribed.
    pub fn reset(&mut self) {
        self.board.reset();
        self.pending = None;
        self.phase = MatchPhase::Idle;
    }

    /// Swap the active turn policy without touching board state. Usable
    /// mid-match.
    pub fn set_rule_set(&mut self, rules: Box<dyn RuleSet>) {
        self.rules = rules;
    }

    /// Current phase of the match state machine.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// The pending plan, if one is awaiting confirmation.
    pub fn pending_plan(&self) -> Option<&PendingPlan> {
        self.pending.as_ref()
    }

    /// The dimensions of the boards.
    pub fn dimensions(&self) -> Dimensions {
        self.board.dimensions()
    }

    /// Bounds check for a cell.
    pub fn is_valid_position(&self, coord: Coordinate) -> bool {
        self.board.is_valid_position(coord)
    }

    /// Whether the given side has already fired at the given cell.
    pub fn is_cell_shot(&self, coord: Coordinate, side: Side) -> bool {
        self.board.is_cell_shot(coord, side)
    }

    /// Whether the given side's own board has a ship occupying the cell.
    pub fn has_ship_at(&self, coord: Coordinate, side: Side) -> bool {
        self.board.has_ship_at(coord, side)
    }

    /// Get the shot the given side fired at the cell, if any.
    pub fn shot_at(&self, coord: Coordinate, side: Side) -> Option<&Shot> {
        self.board.shot_at(coord, side)
    }

    /// The side whose turn it currently is.
    pub fn turn(&self) -> Side {
        self.board.turn()
    }

    /// Whether the match has ended.
    pub fn is_match_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// The winner of the match, if it has ended.
    pub fn winner(&self) -> Option<Side> {
        self.board.winner()
    }

    /// Build an immutable view of the whole match state.
    pub fn snapshot(&self) -> crate::board::Snapshot {
        self.board.snapshot()
    }

    /// Projection of `side`'s own board: their fleet, items, and incoming
    /// shots.
    pub fn own_board_view(&self, side: Side) -> OwnBoardView {
        let snapshot = self.board.snapshot();
        let own = snapshot.side(side);
        OwnBoardView {
            ships: own.ships.clone(),
            items: own.items.clone(),
            incoming: own.shots.clone(),
        }
    }

    /// Projection of the opposing board as `side` sees it: their outgoing
    /// shots and the opposing collectibles.
    pub fn opponent_board_view(&self, side: Side) -> OpponentBoardView {
        let snapshot = self.board.snapshot();
        let opponent = snapshot.side(side.opponent());
        OpponentBoardView {
            outgoing: opponent.shots.clone(),
            items: opponent.items.clone(),
        }
    }
}
