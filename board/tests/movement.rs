//! Scenario coverage for the move executor and destination search.

use summit_board::{query, Board};
use summit_core::{
    ClimberColour, ClimberId, ClimberSpec, ColumnKey, Direction, Position, PowerCard,
    START_CORNERS,
};

fn admit(board: &mut Board, id: u32, start: Position) -> ClimberId {
    let climber = ClimberId::new(id);
    assert!(board.add_climber(ClimberSpec {
        id: climber,
        colour: ClimberColour::ALL[id as usize % 4],
        start,
        total_cubes: 28,
        power_cards: [PowerCard::Barrier, PowerCard::Echo],
    }));
    climber
}

/// Stacks cubes with a dedicated builder until the column reaches the
/// requested height. The builder is parked far from the construction so
/// its own cell never interferes.
fn raise_column(board: &mut Board, column: ColumnKey, height: u32) {
    let mason = ClimberId::new(90);
    let _ = board.add_climber(ClimberSpec {
        id: mason,
        colour: ClimberColour::Red,
        start: Position::new(21, 0, 21),
        total_cubes: 28,
        power_cards: [PowerCard::Barrier, PowerCard::Echo],
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
fn climber_steps_onto_an_adjacent_top_at_the_same_level() {
    let mut board = Board::new();
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    let destinations = query::valid_destinations(&board, climber);
    assert!(destinations.contains(&Position::new(1, 0, 3)));
    assert!(destinations.contains(&Position::new(3, 0, 1)));
}

#[test]
fn ground_cells_connect_the_walk_but_are_never_destinations() {
    let mut board = Board::new();
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    let destinations = query::valid_destinations(&board, climber);
    // The far quadrant's seed cubes are reachable only by crossing open
    // ground, yet none of the crossed ground cells qualify themselves.
    assert!(destinations.contains(&Position::new(1, 0, -3)));
    assert!(destinations.contains(&Position::new(-3, 0, -1)));
    assert!(destinations
        .iter()
        .all(|cell| query::column_height(&board, cell.column()) > 0));
}

#[test]
fn a_taller_column_is_not_a_same_level_destination() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(1, 1), 2);
    let climber = admit(&mut board, 0, Position::new(3, 0, 1));
    assert!(board.begin_turn(climber));

    let destinations = query::valid_destinations(&board, climber);
    assert!(!destinations.contains(&Position::new(1, 0, 1)));
    // The raised column still appears through the ascent rule.
    assert!(destinations.contains(&Position::new(1, 2, 1)));
}

#[test]
fn ascent_reaches_one_level_up_but_never_two() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(1, 1), 2);
    raise_column(&mut board, ColumnKey::new(1, 3), 3);
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    assert!(board.begin_turn(climber));

    let destinations = query::valid_destinations(&board, climber);
    assert!(!destinations.contains(&Position::new(1, 4, 3)));
    assert!(destinations.contains(&Position::new(3, 0, 1)));
}

#[test]
fn descent_drops_any_number_of_levels_onto_tops_or_ground() {
    let mut board = Board::new();
    raise_column(&mut board, ColumnKey::new(3, 1), 3);
    let climber = admit(&mut board, 0, Position::new(3, 4, 1));
    assert!(board.begin_turn(climber));

    let destinations = query::valid_destinations(&board, climber);
    // Two levels down onto the seed cube, three down to open ground.
    assert!(destinations.contains(&Position::new(1, 0, 1)));
    assert!(destinations.contains(&Position::new(5, 0, 1)));
}

#[test]
fn another_climber_blocks_both_the_path_and_the_destination() {
    let mut board = Board::new();
    let climber = admit(&mut board, 0, START_CORNERS[0]);
    let _blocker = admit(&mut board, 1, Position::new(3, 0, 1));
    assert!(board.begin_turn(climber));

    let destinations = query::valid_destinations(&board, climber);
    assert!(!destinations.contains(&Position::new(3, 0, 1)));
    // The neighboring seed cube is still reachable around the blocker.
    assert!(destinations.contains(&Position::new(3, 0, -1)));
}

#[test]
fn the_walk_terminates_on_an_open_ground_plane() {
    let mut board = Board::new();
    let climber = admit(&mut board, 0, Position::new(11, 0, 11));
    assert!(board.begin_turn(climber));

    // Far from every cube the climber can still path back to the seeds;
    // the search stays inside the piece bounding box plus one ring.
    let destinations = query::valid_destinations(&board, climber);
    assert!(destinations.contains(&Position::new(3, 0, 3).step(Direction::South)));
}
