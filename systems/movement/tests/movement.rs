//! Movement system wired against the authoritative board.

use summit_board::{apply, query, Board};
use summit_core::{
    ClimberColour, ClimberId, ClimberSpec, Command, Event, Position, PowerCard, START_CORNERS,
};
use summit_system_movement::{MoveRequest, Movement};

fn seeded_board(climber: ClimberId) -> (Board, Vec<Event>) {
    let mut board = Board::new();
    let mut events = Vec::new();
    apply(
        &mut board,
        Command::AddClimber {
            spec: ClimberSpec {
                id: climber,
                colour: ClimberColour::Yellow,
                start: START_CORNERS[0],
                total_cubes: 18,
                power_cards: [PowerCard::Limitless, PowerCard::Roar],
            },
        },
        &mut events,
    );
    apply(&mut board, Command::BeginTurn { climber }, &mut events);
    (board, events)
}

#[test]
fn a_forwarded_request_moves_the_climber() {
    let climber = ClimberId::new(0);
    let (mut board, events) = seeded_board(climber);
    let mut movement = Movement::new();

    let mut commands = Vec::new();
    movement.handle(
        &events,
        Some(MoveRequest::new(climber, Position::new(3, 0, 1))),
        |id| query::valid_destinations(&board, id),
        &mut commands,
    );
    assert_eq!(commands.len(), 1);

    let mut follow_up = Vec::new();
    for command in commands {
        apply(&mut board, command, &mut follow_up);
    }
    assert_eq!(
        follow_up,
        vec![Event::ClimberMoved {
            climber,
            from: START_CORNERS[0],
            to: Position::new(3, 0, 1),
        }]
    );
    assert_eq!(
        query::climber_position(&board, climber),
        Some(Position::new(3, 0, 1))
    );
}

#[test]
fn an_unreachable_destination_never_reaches_the_board() {
    let climber = ClimberId::new(0);
    let (board, events) = seeded_board(climber);
    let mut movement = Movement::new();

    let mut commands = Vec::new();
    movement.handle(
        &events,
        Some(MoveRequest::new(climber, Position::new(9, 0, 9))),
        |id| query::valid_destinations(&board, id),
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn the_second_request_in_one_turn_is_suppressed() {
    let climber = ClimberId::new(0);
    let (mut board, events) = seeded_board(climber);
    let mut movement = Movement::new();

    let mut commands = Vec::new();
    movement.handle(
        &events,
        Some(MoveRequest::new(climber, Position::new(3, 0, 1))),
        |id| query::valid_destinations(&board, id),
        &mut commands,
    );
    let mut follow_up = Vec::new();
    for command in commands {
        apply(&mut board, command, &mut follow_up);
    }

    let mut late_commands = Vec::new();
    movement.handle(
        &follow_up,
        Some(MoveRequest::new(climber, Position::new(1, 0, 1))),
        |id| query::valid_destinations(&board, id),
        &mut late_commands,
    );
    assert!(late_commands.is_empty());
}
