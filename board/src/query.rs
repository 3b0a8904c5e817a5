//! Read-only snapshot views over the board.
//!
//! Adapters and systems never borrow board internals; every query copies
//! the requested state into plain snapshot values. A climber standing on a
//! column shares the top cube's cell, and queries resolve that cell to the
//! climber.

use std::collections::BTreeSet;

use summit_core::{
    ClimberColour, ClimberId, ColumnKey, CubeId, CubeOwner, Position, PowerCard,
};

use crate::{reachability, Board};

/// Copy of one cube's public state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CubeSnapshot {
    /// Identifier of the cube.
    pub cube: CubeId,
    /// Who placed the cube.
    pub owner: CubeOwner,
    /// Cell the cube occupies.
    pub position: Position,
    /// Whether the cube is the top of its column.
    pub is_top: bool,
}

/// Copy of one climber's public state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClimberSnapshot {
    /// Identifier of the climber.
    pub climber: ClimberId,
    /// Colour assigned at setup.
    pub colour: ClimberColour,
    /// Cell the climber occupies.
    pub position: Position,
    /// Cube supply budget for the whole game.
    pub total_cubes: u32,
    /// The two power cards dealt at setup.
    pub power_cards: [PowerCard; 2],
    /// Whether the build action is still available this turn.
    pub can_build: bool,
    /// Whether the move action is still available this turn.
    pub can_move: bool,
    /// Whether the roll action is still available this turn.
    pub can_roll: bool,
    /// Cube placements left in the current build action.
    pub builds_remaining: u32,
}

/// A cell's occupant as reported by layout queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceSnapshot {
    /// The cell holds a cube.
    Cube(CubeSnapshot),
    /// The cell holds a climber.
    Climber(ClimberSnapshot),
}

impl PieceSnapshot {
    /// Cell the piece occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Cube(cube) => cube.position,
            Self::Climber(climber) => climber.position,
        }
    }
}

/// Snapshot of every climber, ordered by ascending identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClimberView {
    climbers: Vec<ClimberSnapshot>,
}

impl ClimberView {
    /// Iterates over climbers in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ClimberSnapshot> {
        self.climbers.iter()
    }

    /// Number of climbers on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.climbers.len()
    }

    /// Reports whether the board has no climbers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.climbers.is_empty()
    }

    /// Finds one climber's snapshot by identifier.
    #[must_use]
    pub fn get(&self, climber: ClimberId) -> Option<&ClimberSnapshot> {
        self.climbers
            .iter()
            .find(|snapshot| snapshot.climber == climber)
    }
}

fn snapshot_climber(board: &Board, climber: ClimberId) -> Option<ClimberSnapshot> {
    board.climber_state(climber).map(|state| ClimberSnapshot {
        climber,
        colour: state.colour,
        position: state.position,
        total_cubes: state.total_cubes,
        power_cards: state.power_cards,
        can_build: state.can_build,
        can_move: state.can_move,
        can_roll: state.can_roll,
        builds_remaining: state.builds_remaining,
    })
}

fn snapshot_cube(board: &Board, position: Position) -> Option<CubeSnapshot> {
    board.cube_state(position).map(|cube| CubeSnapshot {
        cube: cube.id,
        owner: cube.owner,
        position,
        is_top: cube.is_top,
    })
}

/// Snapshots every climber on the board in ascending identifier order.
#[must_use]
pub fn climber_view(board: &Board) -> ClimberView {
    let climbers = board
        .climber_ids()
        .filter_map(|id| snapshot_climber(board, id))
        .collect();
    ClimberView { climbers }
}

/// Resolves the occupant of one cell; a climber shadows the cube it
/// stands on.
#[must_use]
pub fn piece_at(board: &Board, position: Position) -> Option<PieceSnapshot> {
    if let Some(id) = board.climber_at(position) {
        return snapshot_climber(board, id).map(PieceSnapshot::Climber);
    }
    snapshot_cube(board, position).map(PieceSnapshot::Cube)
}

/// Lists every piece whose cell sits at the provided vertical level,
/// ordered by (x, z). Cells where a climber stands on a cube report the
/// climber.
#[must_use]
pub fn layout_at_level(board: &Board, level: i32) -> Vec<PieceSnapshot> {
    let mut pieces: Vec<PieceSnapshot> = board
        .cube_positions()
        .filter(|position| position.y() == level)
        .chain(
            board
                .climber_ids()
                .filter_map(|id| board.climber_position(id))
                .filter(|position| position.y() == level),
        )
        .collect::<BTreeSet<Position>>()
        .into_iter()
        .filter_map(|position| piece_at(board, position))
        .collect();
    pieces.sort_by_key(|piece| (piece.position().x(), piece.position().z()));
    pieces
}

/// Number of cubes stacked in the provided column.
#[must_use]
pub fn column_height(board: &Board, column: ColumnKey) -> u32 {
    board.column_height(column)
}

/// Cell of the provided column's top cube, if the column holds any cubes.
#[must_use]
pub fn column_top(board: &Board, column: ColumnKey) -> Option<Position> {
    board.column_top(column)
}

/// Cell the provided climber occupies.
#[must_use]
pub fn climber_position(board: &Board, climber: ClimberId) -> Option<Position> {
    board.climber_position(climber)
}

/// Every cell the climber may move to this turn, sorted ascending.
#[must_use]
pub fn valid_destinations(board: &Board, climber: ClimberId) -> BTreeSet<Position> {
    reachability::valid_destinations(board, climber)
}

/// Every cell the climber may grapple onto, sorted ascending.
#[must_use]
pub fn grapple_candidates(board: &Board, climber: ClimberId) -> Vec<Position> {
    reachability::grapple_candidates(board, climber)
}
