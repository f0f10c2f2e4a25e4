use proptest::prelude::*;

use gridsalvo::pattern;
use gridsalvo::{
    BoardState, CannotShootReason, Coordinate, Dimensions, Item, ItemId, Ship, ShipId,
    ShotPattern, Side,
};

fn standard_board() -> BoardState {
    let mut board = BoardState::new(Dimensions::new(10, 10));
    board
        .initialize(
            vec![Ship::new(ShipId(0), Coordinate::new(0, 0), 2, 1)],
            vec![
                Ship::new(ShipId(0), Coordinate::new(5, 5), 2, 1),
                Ship::new(ShipId(1), Coordinate::new(0, 8), 1, 2),
            ],
            Side::P1,
            Vec::new(),
            vec![Item::new(ItemId(0), Coordinate::new(2, 2), 3, "crate")],
        )
        .unwrap();
    board
}

// Coordinates slightly beyond the 10x10 board so out-of-bounds rejection is
// exercised alongside normal shots.
fn coords() -> impl Strategy<Value = Coordinate> {
    (0usize..12, 0usize..12).prop_map(Coordinate::from)
}

fn offsets() -> impl Strategy<Value = Vec<(i32, i32)>> {
    proptest::collection::vec((-2i32..=2, -2i32..=2), 1..8)
}

proptest! {
    /// Applying any sequence of shots never leaves counters out of range:
    /// hits stay within each ship's footprint and collections within each
    /// item's part count.
    #[test]
    fn prop_counters_stay_in_range(shots in proptest::collection::vec(coords(), 1..60)) {
        let mut board = standard_board();
        for coord in shots {
            let _ = board.apply_shot(coord, Side::P1, None);
            let snap = board.snapshot();
            for side in Side::BOTH {
                for status in &snap.side(side).ships {
                    prop_assert!(status.hits <= status.ship.cell_count());
                    prop_assert_eq!(
                        status.destroyed(),
                        status.hits == status.ship.cell_count()
                    );
                }
                for status in &snap.side(side).items {
                    prop_assert!(status.collected <= status.item.part());
                    prop_assert_eq!(
                        status.complete,
                        status.collected == status.item.part()
                    );
                }
            }
        }
    }

    /// Once a side shoots a cell it stays shot, and every later attempt at the
    /// same cell by the same side is rejected as a duplicate.
    #[test]
    fn prop_shot_cells_stay_shot(shots in proptest::collection::vec(coords(), 1..60)) {
        let mut board = standard_board();
        let mut landed = Vec::new();
        for coord in shots {
            match board.apply_shot(coord, Side::P1, None) {
                Ok(report) => {
                    prop_assert_eq!(report.shot.coord, coord);
                    landed.push(coord);
                }
                Err(err) => {
                    let expected = if board.is_game_over() {
                        CannotShootReason::MatchOver
                    } else if !board.dimensions().contains(coord) {
                        CannotShootReason::OutOfBounds
                    } else {
                        CannotShootReason::AlreadyShot
                    };
                    prop_assert_eq!(err.reason(), expected);
                }
            }
            if board.snapshot().side(Side::P2).all_destroyed {
                board.set_game_over(Some(Side::P1)).unwrap();
            }
            for &prior in &landed {
                prop_assert!(board.is_cell_shot(prior, Side::P1));
                prop_assert!(board.shot_at(prior, Side::P1).is_some());
            }
        }
        prop_assert_eq!(board.snapshot().side(Side::P2).shots.len(), landed.len());
    }

    /// The shot log and the grid agree: each side's stored shots are exactly
    /// the cells reported as shot, in the order they landed.
    #[test]
    fn prop_shot_log_matches_grid(shots in proptest::collection::vec(coords(), 1..60)) {
        let mut board = standard_board();
        for coord in shots {
            let _ = board.apply_shot(coord, Side::P1, None);
        }
        let snap = board.snapshot();
        for (idx, shot) in snap.side(Side::P2).shots.iter().enumerate() {
            prop_assert!(board.is_cell_shot(shot.coord, Side::P1));
            let stored = board.shot_at(shot.coord, Side::P1);
            prop_assert_eq!(stored, snap.side(Side::P2).shots.get(idx));
        }
    }

    /// Pattern resolution reports one entry per offset and its aggregates are
    /// derived from the executed subset only.
    #[test]
    fn prop_resolution_covers_every_offset(
        center in coords(),
        offsets in offsets(),
    ) {
        let mut board = standard_board();
        let pattern = ShotPattern::new("prop", "Property", offsets.clone());
        match pattern::resolve(&mut board, center, &pattern, Side::P1) {
            Ok(res) => {
                prop_assert_eq!(res.shots.len(), offsets.len());
                let mut any_hit = false;
                let mut any_destroyed = false;
                for resolved in &res.shots {
                    if let gridsalvo::ShotDisposition::Executed(report) = &resolved.disposition {
                        any_hit |= report.effect.is_hit();
                        any_destroyed |= report.effect.destroyed_ship().is_some();
                    }
                }
                prop_assert_eq!(res.any_hit, any_hit);
                prop_assert_eq!(res.any_ship_destroyed, any_destroyed);
            }
            Err(err) => {
                // Per-cell problems degrade to dispositions; a hard error can
                // only mean the whole attempt was invalid.
                prop_assert!(matches!(
                    err.reason(),
                    CannotShootReason::NotInitialized | CannotShootReason::MatchOver
                ));
            }
        }
    }

    /// Resolving the same single-cell pattern twice at the same center fires
    /// exactly once.
    #[test]
    fn prop_repeat_single_fires_once(center in (0usize..10, 0usize..10).prop_map(Coordinate::from)) {
        let mut board = standard_board();
        let single = pattern::single();
        let first = pattern::resolve(&mut board, center, single, Side::P1).unwrap();
        prop_assert_eq!(first.executed_count(), 1);
        let second = pattern::resolve(&mut board, center, single, Side::P1).unwrap();
        prop_assert_eq!(second.executed_count(), 0);
        prop_assert_eq!(board.snapshot().side(Side::P2).shots.len(), 1);
    }
}
