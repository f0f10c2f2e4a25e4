//! Rules engine for a two-sided, turn-based grid combat game.
//!
//! The engine tracks ship and collectible placement, resolves single- and
//! multi-cell attack patterns against an opposing grid, enforces per-cell shot
//! uniqueness, determines when ships are destroyed and items collected, and
//! arbitrates turn continuation and the winner through a pluggable
//! [`RuleSet`][rules::RuleSet].
//!
//! The public protocol is a small finite-state machine: plan a pattern around
//! a center, confirm it, and the [`MatchCoordinator`][game::MatchCoordinator]
//! resolves the attack and the turn as one atomic unit. Placement generation,
//! rendering, and transport are external collaborators; a transport replays a
//! remote side's actions by issuing the same plan and confirm calls with that
//! side's identity.

pub mod board;
pub mod events;
pub mod game;
pub mod items;
pub mod pattern;
pub mod rules;
pub mod ships;

pub use board::{
    BoardState, CannotShootReason, Coordinate, Dimensions, NotInitialized, PlacementError,
    Provenance, Shot, ShotEffect, ShotError, ShotReport, Side, SideSnapshot, Snapshot,
};
pub use events::{BoardObserver, Notification, NotificationLog, RecordingObserver};
pub use game::{
    AttackError, AttackOutcome, CannotPlanReason, InitializeError, MatchCoordinator, MatchError,
    MatchPhase, OpponentBoardView, OwnBoardView, PendingPlan, PlanError,
};
pub use items::{Collection, Item, ItemId, ItemStatus};
pub use pattern::{PatternResolution, ResolvedShot, ShotDisposition, ShotPattern};
pub use rules::{
    AlwaysAlternate, AttackAggregate, ContinueOnHit, GameOverDecision, RuleSet, TurnDecision,
};
pub use ships::{Ship, ShipId, ShipStatus};
