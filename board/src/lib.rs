#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative occupancy state for the Summit engine.
//!
//! The [`Board`] owns every cube and climber on the cube lattice. All
//! mutation flows through [`apply`], which executes [`Command`] values and
//! appends [`Event`] values describing what actually happened; adapters and
//! systems never touch the state directly. Each operation validates its
//! whole proposal before mutating anything, so a rejected command leaves
//! the board untouched.
//!
//! Read access goes through the [`query`] module, which exposes immutable
//! snapshot views.

mod reachability;

pub mod query;

use std::collections::{BTreeMap, HashMap};

use log::debug;
use summit_core::{
    BuildError, ClimberColour, ClimberId, ClimberSpec, ColumnKey, Command, CubeId, CubeOwner,
    DiceError, Direction, Event, GrappleError, MoveError, Position, PowerCard, EDGE_LENGTH,
    MAXIMUM_BUILD_CAPACITY,
};

/// Footprints of the twelve cubes seeded at game start, three per
/// quadrant in an L around each start corner.
const SEED_COLUMNS: [ColumnKey; 12] = [
    ColumnKey::new(1, 1),
    ColumnKey::new(3, 1),
    ColumnKey::new(1, 3),
    ColumnKey::new(-1, 1),
    ColumnKey::new(-3, 1),
    ColumnKey::new(-1, 3),
    ColumnKey::new(1, -1),
    ColumnKey::new(3, -1),
    ColumnKey::new(1, -3),
    ColumnKey::new(-1, -1),
    ColumnKey::new(-3, -1),
    ColumnKey::new(-1, -3),
];

/// A cube resting on the mountain; its cell is the key it is stored under.
struct Cube {
    id: CubeId,
    owner: CubeOwner,
    is_top: bool,
}

/// A climber and their per-turn action state.
///
/// A climber standing on a column occupies the same cell as that column's
/// top cube; a climber on open ground occupies an empty ground cell.
struct Climber {
    colour: ClimberColour,
    position: Position,
    total_cubes: u32,
    power_cards: [PowerCard; 2],
    can_build: bool,
    can_move: bool,
    can_roll: bool,
    builds_remaining: u32,
}

/// Displacement of one climber during wind resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindShift {
    /// Climber that was displaced.
    pub climber: ClimberId,
    /// Cell the climber occupied before the push.
    pub from: Position,
    /// Cell the climber landed on.
    pub to: Position,
}

/// A climber whose wind push was blocked by a taller column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindHold {
    /// Climber that held position.
    pub climber: ClimberId,
    /// Cell the climber kept.
    pub position: Position,
}

/// Complete outcome of one wind resolution, in ascending climber order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindReport {
    /// Climbers the wind displaced.
    pub shifted: Vec<WindShift>,
    /// Climbers a taller column blocked.
    pub held: Vec<WindHold>,
}

/// Authoritative occupancy state of the mountain.
pub struct Board {
    cubes: HashMap<Position, Cube>,
    columns: BTreeMap<ColumnKey, u32>,
    climbers: BTreeMap<ClimberId, Climber>,
    next_cube_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board seeded with the twelve starting cubes.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            cubes: HashMap::new(),
            columns: BTreeMap::new(),
            climbers: BTreeMap::new(),
            next_cube_id: 0,
        };
        for column in SEED_COLUMNS {
            let id = board.take_cube_id();
            let _ = board.cubes.insert(
                column.cell_at(0),
                Cube {
                    id,
                    owner: CubeOwner::Seed,
                    is_top: true,
                },
            );
            let _ = board.columns.insert(column, 1);
        }
        board
    }

    /// Admits a new climber at their start cell.
    ///
    /// Returns `false` without mutating when the identifier is already
    /// taken or the start cell is not standable.
    pub fn add_climber(&mut self, spec: ClimberSpec) -> bool {
        if self.climbers.contains_key(&spec.id) || !self.is_standable(spec.start) {
            return false;
        }
        let _ = self.climbers.insert(
            spec.id,
            Climber {
                colour: spec.colour,
                position: spec.start,
                total_cubes: spec.total_cubes,
                power_cards: spec.power_cards,
                can_build: false,
                can_move: false,
                can_roll: false,
                builds_remaining: 0,
            },
        );
        true
    }

    /// Restores the climber's build, move, and roll actions for a new
    /// turn. Returns `false` when the climber does not exist.
    pub fn begin_turn(&mut self, climber: ClimberId) -> bool {
        match self.climbers.get_mut(&climber) {
            Some(state) => {
                state.can_build = true;
                state.can_move = true;
                state.can_roll = true;
                state.builds_remaining = MAXIMUM_BUILD_CAPACITY;
                true
            }
            None => false,
        }
    }

    /// Validates a cube placement proposal and commits it if legal.
    ///
    /// A legal cell is unoccupied, continues its column's stack without a
    /// gap, and touches an anchor: the cube it rests on, or for ground
    /// cells a neighboring single-cube column. Each climber may place
    /// [`MAXIMUM_BUILD_CAPACITY`] cubes per turn.
    pub fn try_build(
        &mut self,
        climber: ClimberId,
        position: Position,
    ) -> Result<CubeId, BuildError> {
        let builder = self
            .climbers
            .get(&climber)
            .ok_or(BuildError::UnknownClimber)?;
        if !builder.can_build {
            return Err(BuildError::ActionAlreadyUsed);
        }
        if self.is_occupied(position) {
            return Err(BuildError::PositionOccupied);
        }

        let column = position.column();
        let height = self.column_height(column);
        if position.y() != (height as i32) * EDGE_LENGTH {
            return Err(BuildError::InvalidHeight);
        }

        if position.is_ground() {
            let anchored = Direction::ALL.iter().any(|&direction| {
                self.cube_is_top(column.step(direction).cell_at(0))
                    .unwrap_or(false)
            });
            if !anchored {
                return Err(BuildError::Disconnected);
            }
        } else {
            let support = position.below();
            if self.climber_at(support).is_some() {
                return Err(BuildError::PositionOccupied);
            }
            if !self.cube_is_top(support).unwrap_or(false) {
                return Err(BuildError::Disconnected);
            }
        }

        if !position.is_ground() {
            if let Some(covered) = self.cubes.get_mut(&position.below()) {
                covered.is_top = false;
            }
        }
        let id = self.take_cube_id();
        let _ = self.cubes.insert(
            position,
            Cube {
                id,
                owner: CubeOwner::Climber(climber),
                is_top: true,
            },
        );
        let _ = self.columns.insert(column, height + 1);
        if let Some(state) = self.climbers.get_mut(&climber) {
            state.builds_remaining -= 1;
            if state.builds_remaining == 0 {
                state.can_build = false;
            }
        }
        Ok(id)
    }

    /// Validates a move request against the reachable destination set and
    /// commits it if legal. The move action is spent only on success.
    pub fn try_move(&mut self, climber: ClimberId, destination: Position) -> Result<(), MoveError> {
        let mover = self
            .climbers
            .get(&climber)
            .ok_or(MoveError::UnknownClimber)?;
        if !mover.can_move {
            return Err(MoveError::ActionAlreadyUsed);
        }
        if !reachability::valid_destinations(self, climber).contains(&destination) {
            return Err(MoveError::IllegalDestination);
        }
        if let Some(state) = self.climbers.get_mut(&climber) {
            state.position = destination;
            state.can_move = false;
        }
        Ok(())
    }

    /// Validates a grapple jump against the candidate set and commits it
    /// if legal. With no candidates at all the roll cannot be honored and
    /// the caller should spend it instead.
    pub fn try_grapple(
        &mut self,
        climber: ClimberId,
        destination: Position,
    ) -> Result<(), GrappleError> {
        let grappler = self
            .climbers
            .get(&climber)
            .ok_or(GrappleError::UnknownClimber)?;
        if !grappler.can_roll {
            return Err(GrappleError::ActionAlreadyUsed);
        }
        let candidates = reachability::grapple_candidates(self, climber);
        if candidates.is_empty() {
            return Err(GrappleError::NoLegalDestination);
        }
        if !candidates.contains(&destination) {
            return Err(GrappleError::IllegalDestination);
        }
        if let Some(state) = self.climbers.get_mut(&climber) {
            state.position = destination;
            state.can_roll = false;
        }
        Ok(())
    }

    /// Pushes every climber one column toward `direction` and spends the
    /// roller's roll action.
    ///
    /// Every displacement is decided against the pre-push board, then all
    /// of them are applied together, so resolution order cannot change the
    /// outcome. A climber lands on the target column's top cube, or on
    /// open ground when the target footprint is empty; a target column
    /// taller than the climber's level blocks the push and the climber
    /// holds position.
    pub fn resolve_wind(
        &mut self,
        roller: ClimberId,
        direction: Direction,
    ) -> Result<WindReport, DiceError> {
        let state = self.climbers.get(&roller).ok_or(DiceError::UnknownClimber)?;
        if !state.can_roll {
            return Err(DiceError::ActionAlreadyUsed);
        }

        let mut report = WindReport::default();
        for (&id, climber) in &self.climbers {
            let from = climber.position;
            let target = from.column().step(direction);
            let landing = match self.column_top(target) {
                Some(top) if top.y() > from.y() => None,
                Some(top) => Some(top),
                None => Some(target.cell_at(0)),
            };
            match landing {
                Some(to) => report.shifted.push(WindShift {
                    climber: id,
                    from,
                    to,
                }),
                None => report.held.push(WindHold {
                    climber: id,
                    position: from,
                }),
            }
        }

        for shift in &report.shifted {
            if let Some(climber) = self.climbers.get_mut(&shift.climber) {
                climber.position = shift.to;
            }
        }
        if let Some(state) = self.climbers.get_mut(&roller) {
            state.can_roll = false;
        }
        Ok(report)
    }

    /// Spends the climber's roll action without any board effect; used for
    /// blank faces and grapple rolls with no legal destination.
    pub fn spend_roll(&mut self, climber: ClimberId) -> Result<(), DiceError> {
        let state = self
            .climbers
            .get_mut(&climber)
            .ok_or(DiceError::UnknownClimber)?;
        if !state.can_roll {
            return Err(DiceError::ActionAlreadyUsed);
        }
        state.can_roll = false;
        Ok(())
    }

    fn take_cube_id(&mut self) -> CubeId {
        let id = CubeId::new(self.next_cube_id);
        self.next_cube_id += 1;
        id
    }

    fn is_occupied(&self, position: Position) -> bool {
        self.cubes.contains_key(&position) || self.climber_at(position).is_some()
    }

    /// A climber can stand on an empty ground cell or on a column's top
    /// cube, sharing the top cube's cell, but never inside a stack or in
    /// mid-air.
    fn is_standable(&self, position: Position) -> bool {
        if self.climber_at(position).is_some() {
            return false;
        }
        match self.column_top(position.column()) {
            Some(top) => top == position,
            None => position.is_ground(),
        }
    }

    fn climber_state(&self, climber: ClimberId) -> Option<&Climber> {
        self.climbers.get(&climber)
    }

    fn cube_state(&self, position: Position) -> Option<&Cube> {
        self.cubes.get(&position)
    }

    fn climber_ids(&self) -> impl Iterator<Item = ClimberId> + '_ {
        self.climbers.keys().copied()
    }

    fn cube_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cubes.keys().copied()
    }

    fn climber_position(&self, climber: ClimberId) -> Option<Position> {
        self.climbers.get(&climber).map(|state| state.position)
    }

    fn climber_at(&self, position: Position) -> Option<ClimberId> {
        self.climbers
            .iter()
            .find(|(_, state)| state.position == position)
            .map(|(&id, _)| id)
    }

    fn cube_is_top(&self, position: Position) -> Option<bool> {
        self.cubes.get(&position).map(|cube| cube.is_top)
    }

    fn column_height(&self, column: ColumnKey) -> u32 {
        self.columns.get(&column).copied().unwrap_or(0)
    }

    fn column_top(&self, column: ColumnKey) -> Option<Position> {
        let height = self.column_height(column);
        if height == 0 {
            return None;
        }
        Some(column.cell_at((height as i32 - 1) * EDGE_LENGTH))
    }

    fn occupied_columns(&self) -> impl Iterator<Item = ColumnKey> + '_ {
        self.columns
            .keys()
            .copied()
            .chain(self.climbers.values().map(|state| state.position.column()))
    }
}

/// Applies the provided command to the board and appends the resulting
/// events to `out_events`.
///
/// Rejected requests become `*Rejected` events carrying the specific
/// reason; they never abort the batch that contains them.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AddClimber { spec } => {
            if board.add_climber(spec) {
                out_events.push(Event::ClimberAdded {
                    climber: spec.id,
                    position: spec.start,
                    colour: spec.colour,
                });
            } else {
                debug!("climber {} not admitted", spec.id.get());
            }
        }
        Command::BeginTurn { climber } => {
            if board.begin_turn(climber) {
                out_events.push(Event::TurnStarted { climber });
            }
        }
        Command::BuildCube { climber, position } => match board.try_build(climber, position) {
            Ok(cube) => {
                out_events.push(Event::CubePlaced {
                    cube,
                    climber,
                    position,
                });
                let exhausted = board
                    .climber_state(climber)
                    .map_or(false, |state| !state.can_build);
                if exhausted {
                    out_events.push(Event::BuildCompleted { climber });
                }
            }
            Err(reason) => {
                debug!(
                    "build by climber {} at {:?} rejected: {reason}",
                    climber.get(),
                    position
                );
                out_events.push(Event::BuildRejected {
                    climber,
                    position,
                    reason,
                });
            }
        },
        Command::MoveClimber {
            climber,
            destination,
        } => {
            let from = board.climber_position(climber);
            match board.try_move(climber, destination) {
                Ok(()) => {
                    if let Some(from) = from {
                        out_events.push(Event::ClimberMoved {
                            climber,
                            from,
                            to: destination,
                        });
                    }
                }
                Err(reason) => {
                    debug!(
                        "move by climber {} to {:?} rejected: {reason}",
                        climber.get(),
                        destination
                    );
                    out_events.push(Event::MoveRejected {
                        climber,
                        destination,
                        reason,
                    });
                }
            }
        }
        Command::GrappleClimber {
            climber,
            destination,
        } => {
            let from = board.climber_position(climber);
            match board.try_grapple(climber, destination) {
                Ok(()) => {
                    if let Some(from) = from {
                        out_events.push(Event::ClimberGrappled {
                            climber,
                            from,
                            to: destination,
                        });
                    }
                }
                Err(reason) => {
                    debug!(
                        "grapple by climber {} to {:?} rejected: {reason}",
                        climber.get(),
                        destination
                    );
                    out_events.push(Event::GrappleRejected {
                        climber,
                        destination,
                        reason,
                    });
                }
            }
        }
        Command::PushClimbers { climber, direction } => {
            match board.resolve_wind(climber, direction) {
                Ok(report) => {
                    for shift in report.shifted {
                        out_events.push(Event::ClimberBlown {
                            climber: shift.climber,
                            from: shift.from,
                            to: shift.to,
                        });
                    }
                    for hold in report.held {
                        out_events.push(Event::ClimberHeld {
                            climber: hold.climber,
                            position: hold.position,
                        });
                    }
                    out_events.push(Event::WindResolved { direction });
                    out_events.push(Event::RollSpent { climber });
                }
                Err(reason) => {
                    debug!("wind roll by climber {} rejected: {reason}", climber.get());
                    out_events.push(Event::RollRejected { climber, reason });
                }
            }
        }
        Command::SpendRoll { climber } => match board.spend_roll(climber) {
            Ok(()) => out_events.push(Event::RollSpent { climber }),
            Err(reason) => {
                debug!("spent roll by climber {} rejected: {reason}", climber.get());
                out_events.push(Event::RollRejected { climber, reason });
            }
        },
    }
}
