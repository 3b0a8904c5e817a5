//! Scenario coverage for grapple targeting and wind resolution.

use summit_board::{query, Board, WindHold, WindShift};
use summit_core::{
    ClimberColour, ClimberId, ClimberSpec, ColumnKey, DiceError, Direction, GrappleError,
    Position, PowerCard, START_CORNERS,
};

fn admit(board: &mut Board, id: u32, start: Position) -> ClimberId {
    let climber = ClimberId::new(id);
    assert!(board.add_climber(ClimberSpec {
        id: climber,
        colour: ClimberColour::ALL[id as usize % 4],
        start,
        total_cubes: 28,
        power_cards: [PowerCard::Mastery, PowerCard::Steal],
    }));
    climber
}

fn raise_column(board: &mut Board, column: ColumnKey, height: u32) {
    let mason = ClimberId::new(90);
    let _ = board.add_climber(ClimberSpec {
        id: mason,
        colour: ClimberColour::Red,
        start: Position::new(21, 0, 21),
        total_cubes: 28,
        power_cards: [PowerCard::Mastery, PowerCard::Steal],
    });
    while query::column_height(board, column) < height {
        assert!(board.begin_turn(mason));
        let level = query::column_height(board, column) as i32 * 2;
        board
            .try_build(mason, column.cell_at(level))
            .expect("scaffolding placement");
    }
}

#[test]
fn grapple_has_no_candidates_on_a_flat_board() {
    let mut board = Board::new();
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    assert!(query::grapple_candidates(&board, climber).is_empty());
    assert_eq!(
        board.try_grapple(climber, Position::new(3, 0, 1)),
        Err(GrappleError::NoLegalDestination)
    );
    // The failed grapple did not spend the roll.
    assert!(board.spend_roll(climber).is_ok());
}

#[test]
fn grapple_targets_tops_one_or_two_levels_up() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 2);
    raise_column(&mut board, ColumnKey::new(1, 3), 3);
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    let candidates = query::grapple_candidates(&board, climber);
    assert_eq!(
        candidates,
        vec![Position::new(1, 4, 3), Position::new(3, 2, 1)]
    );
}

#[test]
fn grapple_ignores_diagonal_columns() {
    let mut board = Board::new();
    // Cardinal neighbor of the start corner, and its diagonal twin.
    raise_column(&mut board, ColumnKey::new(3, 1), 2);
    raise_column(&mut board, ColumnKey::new(1, 1), 2);
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    let candidates = query::grapple_candidates(&board, climber);
    assert_eq!(candidates, vec![Position::new(3, 2, 1)]);
    assert_eq!(
        board.try_grapple(climber, Position::new(1, 2, 1)),
        Err(GrappleError::IllegalDestination)
    );
}

#[test]
fn grapple_never_reaches_three_levels_up() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 4);
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    assert!(query::grapple_candidates(&board, climber).is_empty());
}

#[test]
fn grapple_skips_tops_held_by_other_climbers() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 2);
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    let _squatter = admit(&mut board, 1, Position::new(3, 2, 1));
    assert!(board.begin_turn(climber));

    assert!(query::grapple_candidates(&board, climber).is_empty());
}

#[test]
fn grapple_moves_the_climber_and_spends_the_roll() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 2);
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    let target = Position::new(3, 2, 1);
    board.try_grapple(climber, target).expect("legal grapple");
    assert_eq!(query::climber_position(&board, climber), Some(target));
    assert_eq!(
        board.try_grapple(climber, target),
        Err(GrappleError::ActionAlreadyUsed)
    );
}

#[test]
fn grapple_rejects_a_cell_outside_the_candidate_set() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 2);
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    assert_eq!(
        board.try_grapple(climber, Position::new(1, 0, 3)),
        Err(GrappleError::IllegalDestination)
    );
    // The rejection left the roll action available.
    assert!(board.try_grapple(climber, Position::new(3, 2, 1)).is_ok());
}

#[test]
fn wind_pushes_every_climber_one_column_over() {
    let mut board = Board::new();
    let roller = admit(&mut board, 0, Position::new(1, 0, 1));
    let other = admit(&mut board, 1, Position::new(3, 0, 1));
    assert!(board.begin_turn(roller));
    assert!(board.begin_turn(other));

    let report = board
        .resolve_wind(roller, Direction::East)
        .expect("roll available");
    assert_eq!(
        report.shifted,
        vec![
            WindShift {
                climber: roller,
                from: Position::new(1, 0, 1),
                to: Position::new(3, 0, 1),
            },
            WindShift {
                climber: other,
                from: Position::new(3, 0, 1),
                to: Position::new(5, 0, 1),
            },
        ]
    );
    assert!(report.held.is_empty());
    assert_eq!(
        query::climber_position(&board, roller),
        Some(Position::new(3, 0, 1))
    );
    assert_eq!(
        query::climber_position(&board, other),
        Some(Position::new(5, 0, 1))
    );
}

#[test]
fn a_taller_column_holds_a_climber_in_place() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 2);
    let roller = admit(&mut board, 0, Position::new(5, 0, 1));
    assert!(board.begin_turn(roller));

    let report = board
        .resolve_wind(roller, Direction::West)
        .expect("roll available");
    let held: Vec<&WindHold> = report
        .held
        .iter()
        .filter(|hold| hold.climber == roller)
        .collect();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].position, Position::new(5, 0, 1));
    assert_eq!(
        query::climber_position(&board, roller),
        Some(Position::new(5, 0, 1))
    );
}

#[test]
fn wind_drops_a_climber_from_a_column_onto_open_ground() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 3);
    let roller = admit(&mut board, 0, Position::new(3, 4, 1));
    assert!(board.begin_turn(roller));

    let report = board
        .resolve_wind(roller, Direction::East)
        .expect("roll available");
    assert!(report
        .shifted
        .iter()
        .any(|shift| shift.climber == roller && shift.to == Position::new(5, 0, 1)));
}

#[test]
fn an_opposing_gust_returns_a_climber_to_their_column() {
    let mut board = Board::new();
    let roller = admit(&mut board, 0, Position::new(1, 0, 1));
    assert!(board.begin_turn(roller));

    let direction = Direction::East;
    let _ = board.resolve_wind(roller, direction).expect("roll available");
    assert_eq!(
        query::climber_position(&board, roller),
        Some(Position::new(3, 0, 1))
    );

    // A fresh turn restores the roll; the reverse gust undoes the shift.
    assert!(board.begin_turn(roller));
    let _ = board
        .resolve_wind(roller, direction.opposite())
        .expect("roll restored");
    assert_eq!(
        query::climber_position(&board, roller),
        Some(Position::new(1, 0, 1))
    );
}

#[test]
fn wind_spends_only_the_rollers_roll_action() {
    let mut board = Board::new();
    let roller = admit(&mut board, 0, Position::new(1, 0, 1));
    let other = admit(&mut board, 1, Position::new(3, 0, 1));
    assert!(board.begin_turn(roller));
    assert!(board.begin_turn(other));

    let _ = board
        .resolve_wind(roller, Direction::North)
        .expect("roll available");
    assert_eq!(
        board.resolve_wind(roller, Direction::North),
        Err(DiceError::ActionAlreadyUsed)
    );
    let view = query::climber_view(&board);
    assert!(view.get(other).map_or(false, |snapshot| snapshot.can_roll));
}
