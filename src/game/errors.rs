//! Errors used by the match coordinator.

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::board::{Coordinate, PlacementError};

/// Error returned when the match could not be initialized.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum InitializeError {
    /// The match was already initialized; reset it first.
    #[error("the match was already started")]
    AlreadyStarted,
    /// The placements handed to initialize were invalid.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Reason why a plan was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlanReason {
    /// The match has not been initialized.
    #[error("the match has not been started")]
    NotStarted,
    /// The chosen center is outside the board.
    #[error("the chosen center is outside the board")]
    InvalidPosition,
    /// A single-cell pattern re-targets a cell that was already shot.
    #[error("the target cell was already shot")]
    CellAlreadyShot,
    /// Generic fallback for plans that are invalid for any other reason, such
    /// as planning after the match has ended.
    #[error("the plan is not valid")]
    InvalidPlan,
}

/// Error caused when attempting to plan a shot that is not valid. The pending
/// plan, if any, is left untouched.
#[derive(Error)]
#[error("could not plan shot at {center:?}: {reason}")]
pub struct PlanError {
    #[source]
    reason: CannotPlanReason,
    center: Coordinate,
}

impl PlanError {
    /// Construct a plan error from a reason and the rejected center.
    pub(super) fn new(reason: CannotPlanReason, center: Coordinate) -> Self {
        Self { reason, center }
    }

    /// Get the reason the plan was rejected.
    pub fn reason(&self) -> CannotPlanReason {
        self.reason
    }

    /// Get the center of the rejected plan.
    pub fn center(&self) -> Coordinate {
        self.center
    }
}

impl Debug for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Error returned when an attack could not be confirmed. No shots are fired
/// and no state changes when any of these is returned.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum AttackError {
    /// The match has not been initialized.
    #[error("the match has not been started")]
    NotStarted,
    /// There is no pending plan to confirm.
    #[error("no attack has been planned")]
    NoAttackPlanned,
    /// The match has already ended.
    #[error("the game is already over")]
    GameAlreadyOver,
    /// Unexpected internal failure while resolving the attack.
    #[error("the attack failed to resolve")]
    AttackFailed,
}

/// Either kind of failure from the plan-and-attack convenience call.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Attack(#[from] AttackError),
}
