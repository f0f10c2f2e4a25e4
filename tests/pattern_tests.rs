use gridsalvo::pattern::{self, ShotDisposition};
use gridsalvo::{
    BoardState, Coordinate, Dimensions, Item, ItemId, Ship, ShipId, ShotEffect, Side,
};

fn ship(id: u32, x: usize, y: usize, w: usize, h: usize) -> Ship {
    Ship::new(ShipId(id), Coordinate::new(x, y), w, h)
}

fn board_with(p2: Vec<Ship>, p2_items: Vec<Item>) -> BoardState {
    let mut board = BoardState::new(Dimensions::new(10, 10));
    board
        .initialize(
            vec![ship(0, 0, 0, 1, 1)],
            p2,
            Side::P1,
            Vec::new(),
            p2_items,
        )
        .unwrap();
    board
}

#[test]
fn test_builtin_catalog() {
    assert_eq!(pattern::single().offsets().len(), 1);
    assert!(pattern::single().is_single());
    assert_eq!(pattern::builtin("cross").unwrap().offsets().len(), 5);
    assert_eq!(pattern::builtin("x").unwrap().offsets().len(), 5);
    assert_eq!(pattern::builtin("square").unwrap().offsets().len(), 4);
    assert!(pattern::builtin("nope").is_none());
    assert!(pattern::builtins().count() >= 4);
}

#[test]
fn test_cross_at_corner_degrades_gracefully() {
    let mut board = board_with(vec![ship(0, 5, 5, 1, 1)], Vec::new());
    let cross = pattern::builtin("cross").unwrap();

    let res = pattern::resolve(&mut board, Coordinate::new(0, 0), cross, Side::P1).unwrap();
    // Full shot list, one entry per offset, but only the in-bounds subset
    // executed.
    assert_eq!(res.shots.len(), 5);
    assert_eq!(res.executed_count(), 3);
    let skipped: Vec<_> = res
        .shots
        .iter()
        .filter(|s| s.disposition == ShotDisposition::OutOfBounds)
        .map(|s| s.offset)
        .collect();
    assert_eq!(skipped, vec![(-1, 0), (0, -1)]);
    assert!(!res.any_hit);
    assert!(!res.any_ship_destroyed);
}

#[test]
fn test_already_shot_cell_surfaces_previous_hit() {
    let mut board = board_with(vec![ship(0, 5, 5, 2, 1)], Vec::new());
    let single = pattern::single();
    let cross = pattern::builtin("cross").unwrap();

    let res = pattern::resolve(&mut board, Coordinate::new(5, 5), single, Side::P1).unwrap();
    assert!(res.any_hit);

    // The cross re-covers the shot center; it is skipped but still reports
    // the stored hit so consumers can render it.
    let res = pattern::resolve(&mut board, Coordinate::new(5, 5), cross, Side::P1).unwrap();
    assert_eq!(res.shots.len(), 5);
    assert_eq!(res.executed_count(), 4);
    let center = res.shots.iter().find(|s| s.offset == (0, 0)).unwrap();
    assert_eq!(center.disposition, ShotDisposition::AlreadyShot { hit: true });
    // (6,5) hits the rest of the ship and destroys it.
    assert!(res.any_hit);
    assert!(res.any_ship_destroyed);
}

#[test]
fn test_aggregates_cover_executed_subset_only() {
    let mut board = board_with(vec![ship(0, 0, 1, 1, 1)], Vec::new());
    let single = pattern::single();
    let cross = pattern::builtin("cross").unwrap();

    // Destroy the one-cell ship with a plain shot, then fire a cross whose
    // only hit-cell is the already-shot one: the aggregate must not re-count
    // the old hit.
    let res = pattern::resolve(&mut board, Coordinate::new(0, 1), single, Side::P1).unwrap();
    assert!(res.any_ship_destroyed);
    let res = pattern::resolve(&mut board, Coordinate::new(0, 1), cross, Side::P1).unwrap();
    assert!(!res.any_hit);
    assert!(!res.any_ship_destroyed);
    let center = res.shots.iter().find(|s| s.offset == (0, 0)).unwrap();
    assert_eq!(center.disposition, ShotDisposition::AlreadyShot { hit: true });
}

#[test]
fn test_pattern_shots_carry_provenance() {
    let mut board = board_with(vec![ship(0, 5, 5, 1, 1)], Vec::new());
    let cross = pattern::builtin("cross").unwrap();

    pattern::resolve(&mut board, Coordinate::new(5, 5), cross, Side::P1).unwrap();
    let shot = board.shot_at(Coordinate::new(4, 5), Side::P1).unwrap();
    let provenance = shot.provenance.as_ref().unwrap();
    assert_eq!(provenance.pattern, "cross");
    assert_eq!(provenance.center, Coordinate::new(5, 5));
}

#[test]
fn test_pattern_collects_items_on_misses() {
    let mut board = board_with(
        vec![ship(0, 0, 9, 1, 1)],
        vec![Item::new(ItemId(0), Coordinate::new(4, 5), 2, "crate")],
    );
    let cross = pattern::builtin("cross").unwrap();

    let res = pattern::resolve(&mut board, Coordinate::new(4, 5), cross, Side::P1).unwrap();
    assert!(!res.any_hit);
    let collected: Vec<_> = res
        .shots
        .iter()
        .filter_map(|s| match &s.disposition {
            ShotDisposition::Executed(report) => match report.effect {
                ShotEffect::Collected { item, completed } => Some((item, completed)),
                _ => None,
            },
            _ => None,
        })
        .collect();
    // (4,5) and (5,5) are the item's two cells; the second collection
    // completes it.
    assert_eq!(collected, vec![(ItemId(0), false), (ItemId(0), true)]);
}

#[test]
fn test_duplicate_offsets_fire_once() {
    let mut board = board_with(vec![ship(0, 5, 5, 1, 1)], Vec::new());
    let double = gridsalvo::ShotPattern::new("double", "Double Tap", vec![(0, 0), (0, 0)]);

    let res = pattern::resolve(&mut board, Coordinate::new(5, 5), &double, Side::P1).unwrap();
    assert_eq!(res.shots.len(), 2);
    assert_eq!(res.executed_count(), 1);
    assert_eq!(
        res.shots[1].disposition,
        ShotDisposition::AlreadyShot { hit: true }
    );
}

#[test]
#[should_panic(expected = "at least one offset")]
fn test_empty_pattern_rejected() {
    let _ = gridsalvo::ShotPattern::new("empty", "Empty", Vec::new());
}
