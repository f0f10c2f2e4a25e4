//! Pluggable turn and win policies.
//!
//! A [`RuleSet`] is a stateless policy consulted exactly once per resolved
//! attack. It decides turn continuation from the attack aggregate and is the
//! single source of truth for game-over detection; the coordinator never
//! re-derives the winner on its own.

use crate::board::{Side, Snapshot};

/// Aggregate outcome of one resolved attack, computed over the executed shots
/// only. This, not individual shots, is what the policy sees.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttackAggregate {
    /// The side that fired the attack.
    pub side: Side,
    /// Whether any executed shot hit a ship.
    pub any_hit: bool,
    /// Whether any executed shot destroyed a ship.
    pub any_ship_destroyed: bool,
}

/// Decision on how the turn proceeds after a resolved attack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TurnDecision {
    /// Whether the acting side's turn ends.
    pub end_turn: bool,
    /// Whether the acting side toggles.
    pub toggle_side: bool,
    /// Whether the acting side may act again immediately.
    pub can_act_again: bool,
    /// Human-readable reason for the decision.
    pub reason: &'static str,
}

impl TurnDecision {
    /// The decision every policy must return once the match has ended. This
    /// overrides any "shoot again" outcome the attack aggregate would
    /// otherwise justify.
    pub fn game_over() -> Self {
        Self {
            end_turn: true,
            toggle_side: false,
            can_act_again: false,
            reason: "Game over",
        }
    }
}

/// Decision on whether the match has ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameOverDecision {
    /// Whether the match is over.
    pub over: bool,
    /// The winning side, if the match is over.
    pub winner: Option<Side>,
}

impl GameOverDecision {
    /// The match continues.
    pub fn not_over() -> Self {
        Self {
            over: false,
            winner: None,
        }
    }

    /// The match ended with the given winner.
    pub fn won_by(winner: Side) -> Self {
        Self {
            over: true,
            winner: Some(winner),
        }
    }
}

/// Policy controlling turn continuation and win detection. Both methods are
/// pure functions over an immutable snapshot; implementations hold no match
/// state of their own and can be swapped mid-match.
pub trait RuleSet {
    /// Decide how the turn proceeds after a resolved attack. Must return
    /// [`TurnDecision::game_over`] when the snapshot already reports the match
    /// as over, regardless of the aggregate.
    fn decide_turn(&self, aggregate: &AttackAggregate, snapshot: &Snapshot) -> TurnDecision;

    /// Decide whether the match has ended. The instant one side's full fleet
    /// is destroyed, the opposing side wins.
    fn check_game_over(&self, snapshot: &Snapshot) -> GameOverDecision {
        for side in Side::BOTH {
            if snapshot.side(side).all_destroyed {
                return GameOverDecision::won_by(side.opponent());
            }
        }
        GameOverDecision::not_over()
    }
}

/// Policy where a hit without a destruction lets the same side continue; a
/// miss or a destroyed ship ends the turn and toggles the side.
#[derive(Debug, Default, Copy, Clone)]
pub struct ContinueOnHit;

impl RuleSet for ContinueOnHit {
    fn decide_turn(&self, aggregate: &AttackAggregate, snapshot: &Snapshot) -> TurnDecision {
        if snapshot.game_over {
            return TurnDecision::game_over();
        }
        if aggregate.any_ship_destroyed {
            TurnDecision {
                end_turn: true,
                toggle_side: true,
                can_act_again: false,
                reason: "Ship destroyed, turn passes",
            }
        } else if aggregate.any_hit {
            TurnDecision {
                end_turn: false,
                toggle_side: false,
                can_act_again: true,
                reason: "Hit, shoot again",
            }
        } else {
            TurnDecision {
                end_turn: true,
                toggle_side: true,
                can_act_again: false,
                reason: "Miss, turn passes",
            }
        }
    }
}

/// Policy where every resolved attack ends the turn and toggles the side,
/// regardless of hit or miss.
#[derive(Debug, Default, Copy, Clone)]
pub struct AlwaysAlternate;

impl RuleSet for AlwaysAlternate {
    fn decide_turn(&self, _aggregate: &AttackAggregate, snapshot: &Snapshot) -> TurnDecision {
        if snapshot.game_over {
            return TurnDecision::game_over();
        }
        TurnDecision {
            end_turn: true,
            toggle_side: true,
            can_act_again: false,
            reason: "Turn alternates",
        }
    }
}
