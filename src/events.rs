//! Observer notifications emitted by [`BoardState`][crate::board::BoardState].
//!
//! Notifications are delivered synchronously on the caller's stack, in a fixed
//! causal order after every mutating call: shot (if a shot landed), then a
//! state snapshot, then turn (if the side toggled), then game-over (if just
//! set). Transports replicating a match to a remote peer subscribe here.

use std::cell::RefCell;
use std::rc::Rc;

use crate::board::{Shot, Side, Snapshot};

/// Observer of board mutations. All methods default to no-ops so observers
/// only override the notifications they care about.
pub trait BoardObserver {
    /// A match was initialized with fresh placements.
    fn on_match_start(&mut self, starting: Side) {
        let _ = starting;
    }

    /// A shot was recorded on the board.
    fn on_shot(&mut self, shot: &Shot) {
        let _ = shot;
    }

    /// The board changed; delivered after every mutating call.
    fn on_state(&mut self, snapshot: &Snapshot) {
        let _ = snapshot;
    }

    /// The acting side toggled.
    fn on_turn(&mut self, side: Side) {
        let _ = side;
    }

    /// The match ended with the given winner, if any.
    fn on_game_over(&mut self, winner: Option<Side>) {
        let _ = winner;
    }
}

/// A single delivered notification, as recorded by [`RecordingObserver`].
#[derive(Debug, Clone)]
pub enum Notification {
    MatchStarted { starting: Side },
    Shot(Shot),
    State(Snapshot),
    Turn(Side),
    GameOver { winner: Option<Side> },
}

/// Shared handle to the log written by a [`RecordingObserver`].
pub type NotificationLog = Rc<RefCell<Vec<Notification>>>;

/// Observer that appends every notification to a shared log. Useful for
/// transports that forward notifications in batches and for asserting delivery
/// order in tests.
#[derive(Default)]
pub struct RecordingObserver {
    log: NotificationLog,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a handle to the log that outlives the observer once it is handed to
    /// the board.
    pub fn log(&self) -> NotificationLog {
        Rc::clone(&self.log)
    }
}

impl BoardObserver for RecordingObserver {
    fn on_match_start(&mut self, starting: Side) {
        self.log
            .borrow_mut()
            .push(Notification::MatchStarted { starting });
    }

    fn on_shot(&mut self, shot: &Shot) {
        self.log.borrow_mut().push(Notification::Shot(shot.clone()));
    }

    fn on_state(&mut self, snapshot: &Snapshot) {
        self.log
            .borrow_mut()
            .push(Notification::State(snapshot.clone()));
    }

    fn on_turn(&mut self, side: Side) {
        self.log.borrow_mut().push(Notification::Turn(side));
    }

    fn on_game_over(&mut self, winner: Option<Side>) {
        self.log
            .borrow_mut()
            .push(Notification::GameOver { winner });
    }
}
