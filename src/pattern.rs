//! Named shot patterns and their resolution against the board.
//!
//! A pattern is an ordered set of offsets fired together around a chosen
//! center. Resolution degrades gracefully at board edges and over already-
//! explored cells: such offsets are reported but not executed, and only the
//! executed subset feeds the aggregates that drive the turn rules.

use log::trace;
use once_cell::sync::Lazy;

use crate::board::{
    BoardState, CannotShootReason, Coordinate, Provenance, ShotError, ShotReport, Side,
};

/// A named set of coordinate offsets fired together from one chosen center.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShotPattern {
    /// Stable identity of the pattern, recorded as shot provenance.
    id: String,
    /// Human-readable display name.
    name: String,
    /// Offsets relative to the chosen center, in firing order.
    offsets: Vec<(i32, i32)>,
}

impl ShotPattern {
    /// Construct a pattern from its offsets. Panics if `offsets` is empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, offsets: Vec<(i32, i32)>) -> Self {
        assert!(!offsets.is_empty(), "pattern must have at least one offset");
        Self {
            id: id.into(),
            name: name.into(),
            offsets,
        }
    }

    /// Stable identity of the pattern.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offsets relative to the chosen center, in firing order.
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    /// Whether this pattern fires exactly one cell. Single-cell patterns get
    /// stricter plan validation.
    pub fn is_single(&self) -> bool {
        self.offsets.len() == 1
    }
}

/// The built-in pattern catalog.
static BUILTINS: Lazy<Vec<ShotPattern>> = Lazy::new(|| {
    vec![
        ShotPattern::new("single", "Single Shot", vec![(0, 0)]),
        ShotPattern::new(
            "cross",
            "Cross",
            vec![(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)],
        ),
        ShotPattern::new(
            "x",
            "Diagonal Cross",
            vec![(0, 0), (-1, -1), (1, -1), (-1, 1), (1, 1)],
        ),
        ShotPattern::new("square", "Square", vec![(0, 0), (1, 0), (0, 1), (1, 1)]),
    ]
});

/// Look up a built-in pattern by its ID.
pub fn builtin(id: &str) -> Option<&'static ShotPattern> {
    BUILTINS.iter().find(|p| p.id == id)
}

/// The single-cell pattern, used as the default when none is chosen.
pub fn single() -> &'static ShotPattern {
    builtin("single").expect("single pattern missing from catalog")
}

/// Get an iterator over the built-in patterns.
pub fn builtins() -> impl Iterator<Item = &'static ShotPattern> {
    BUILTINS.iter()
}

/// How one offset of a pattern resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotDisposition {
    /// The offset fell outside the board; no shot was fired.
    OutOfBounds,
    /// The cell was already shot by this side; no shot was fired, but the
    /// previously stored hit flag is surfaced so consumers can render it.
    AlreadyShot { hit: bool },
    /// The shot was applied to the board.
    Executed(ShotReport),
}

/// One offset of a resolved pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShot {
    /// The pattern offset this entry corresponds to.
    pub offset: (i32, i32),
    /// The absolute cell the offset pointed at, if it was on the board.
    pub target: Option<Coordinate>,
    /// How the offset resolved.
    pub disposition: ShotDisposition,
}

impl ResolvedShot {
    /// Whether this offset actually fired a shot.
    pub fn executed(&self) -> bool {
        matches!(self.disposition, ShotDisposition::Executed(_))
    }
}

/// Result of resolving a whole pattern. The aggregates cover the executed
/// subset only; skipped offsets contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternResolution {
    /// One entry per pattern offset, in firing order.
    pub shots: Vec<ResolvedShot>,
    /// Whether any executed shot hit a ship.
    pub any_hit: bool,
    /// Whether any executed shot destroyed a ship.
    pub any_ship_destroyed: bool,
}

impl PatternResolution {
    /// Number of offsets that actually fired.
    pub fn executed_count(&self) -> usize {
        self.shots.iter().filter(|s| s.executed()).count()
    }
}

/// Expand `pattern` around `center` and fire each in-bounds, unshot cell for
/// `side`. Never fails on partially-invalid patterns: out-of-bounds and
/// already-shot offsets are recorded as not-executed and the remainder still
/// fires. Errors only on conditions that invalidate the whole attempt, such as
/// an uninitialized board or a match that is already over.
pub fn resolve(
    board: &mut BoardState,
    center: Coordinate,
    pattern: &ShotPattern,
    side: Side,
) -> Result<PatternResolution, ShotError> {
    let mut shots = Vec::with_capacity(pattern.offsets().len());
    let mut any_hit = false;
    let mut any_ship_destroyed = false;

    for &offset in pattern.offsets() {
        let target = match board.dimensions().offset(center, offset) {
            None => {
                trace!("pattern {} offset {:?} out of bounds", pattern.id(), offset);
                shots.push(ResolvedShot {
                    offset,
                    target: None,
                    disposition: ShotDisposition::OutOfBounds,
                });
                continue;
            }
            Some(coord) => coord,
        };

        let provenance = Provenance {
            pattern: pattern.id().to_owned(),
            center,
        };
        let disposition = match board.apply_shot(target, side, Some(provenance)) {
            Ok(report) => {
                any_hit |= report.effect.is_hit();
                any_ship_destroyed |= report.effect.destroyed_ship().is_some();
                ShotDisposition::Executed(report)
            }
            Err(err) if err.reason() == CannotShootReason::AlreadyShot => {
                let hit = board
                    .shot_at(target, side)
                    .map_or(false, |shot| shot.hit);
                ShotDisposition::AlreadyShot { hit }
            }
            Err(err) => return Err(err),
        };
        shots.push(ResolvedShot {
            offset,
            target: Some(target),
            disposition,
        });
    }

    Ok(PatternResolution {
        shots,
        any_hit,
        any_ship_destroyed,
    })
}
