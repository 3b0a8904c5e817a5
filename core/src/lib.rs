#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Summit engine.
//!
//! This crate defines the message surface that connects the adapter, the
//! authoritative board, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the board executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Adapters consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a cube edge; adjacent cube centers and stacked levels are
/// separated by this many lattice units.
pub const EDGE_LENGTH: i32 = 2;

/// Number of successful cube placements that make up one build action.
pub const MAXIMUM_BUILD_CAPACITY: u32 = 2;

/// Ground-level corner cells where climbers start, assigned in order.
pub const START_CORNERS: [Position; 4] = [
    Position::new(3, 0, 3),
    Position::new(-3, 0, 3),
    Position::new(3, 0, -3),
    Position::new(-3, 0, -3),
];

/// Cube supply budget granted to each climber for the given player count.
///
/// Only two to four players are supported; other counts have no budget.
#[must_use]
pub const fn cube_supply(player_count: u32) -> Option<u32> {
    match player_count {
        2 => Some(28),
        3 => Some(18),
        4 => Some(14),
        _ => None,
    }
}

/// Location of a single lattice cell expressed as (x, y, z) coordinates.
///
/// `y` is the vertical axis and grows in [`EDGE_LENGTH`] steps from the
/// ground at zero. Positions are immutable values; callers copy them
/// whenever a candidate cell is derived from a current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
    z: i32,
}

impl Position {
    /// Creates a new lattice position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical level of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Depth coordinate of the cell.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Column that contains this cell.
    #[must_use]
    pub const fn column(&self) -> ColumnKey {
        ColumnKey::new(self.x, self.z)
    }

    /// Cell directly above this one, one level up.
    #[must_use]
    pub const fn above(&self) -> Self {
        Self::new(self.x, self.y + EDGE_LENGTH, self.z)
    }

    /// Cell directly below this one, one level down.
    #[must_use]
    pub const fn below(&self) -> Self {
        Self::new(self.x, self.y - EDGE_LENGTH, self.z)
    }

    /// Cell one cardinal step away at the same level.
    #[must_use]
    pub const fn step(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        Self::new(self.x + dx, self.y, self.z + dz)
    }

    /// Reports whether the cell sits at ground level.
    #[must_use]
    pub const fn is_ground(&self) -> bool {
        self.y == 0
    }
}

/// Identifies a cube column by its (x, z) footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnKey {
    x: i32,
    z: i32,
}

impl ColumnKey {
    /// Creates a new column key.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Horizontal coordinate of the column.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Depth coordinate of the column.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Neighboring column one cardinal step away.
    #[must_use]
    pub const fn step(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        Self::new(self.x + dx, self.z + dz)
    }

    /// Cell of this column at the provided vertical level.
    #[must_use]
    pub const fn cell_at(&self, y: i32) -> Position {
        Position::new(self.x, y, self.z)
    }
}

/// Cardinal directions available for steps and wind pushes in the
/// horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing depth (+z).
    North,
    /// Movement toward increasing x (+x).
    East,
    /// Movement toward decreasing depth (-z).
    South,
    /// Movement toward decreasing x (-x).
    West,
}

impl Direction {
    /// All four cardinal directions in a fixed enumeration order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Lattice offset of one step along this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, EDGE_LENGTH),
            Self::East => (EDGE_LENGTH, 0),
            Self::South => (0, -EDGE_LENGTH),
            Self::West => (-EDGE_LENGTH, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Unique identifier assigned to a cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CubeId(u32);

impl CubeId {
    /// Creates a new cube identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a climber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClimberId(u32);

impl ClimberId {
    /// Creates a new climber identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Records who placed a cube on the mountain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CubeOwner {
    /// One of the twelve cubes seeded at game start.
    Seed,
    /// A cube built by the identified climber.
    Climber(ClimberId),
}

/// Colour assigned to a climber; unique per player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClimberColour {
    /// The red climber.
    Red,
    /// The yellow climber.
    Yellow,
    /// The green climber.
    Green,
    /// The blue climber.
    Blue,
}

impl ClimberColour {
    /// All colours in the order they are assigned to players.
    pub const ALL: [Self; 4] = [Self::Red, Self::Yellow, Self::Green, Self::Blue];
}

/// Power cards dealt to climbers at setup, two per player.
///
/// Card effects resolve outside the engine; the engine only deals the cards
/// and reports them through snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerCard {
    /// Grants an extra turn.
    Accelerate,
    /// Removes cubes under chosen players.
    Armageddon,
    /// Negates wind or another power.
    Barrier,
    /// Repeats one of the holder's other powers.
    Echo,
    /// Blocks other players' next move action.
    Freeze,
    /// Grants an extra roll action.
    Gamble,
    /// Removes cubes under one player.
    Ignite,
    /// Relocates an adjacent player.
    Kick,
    /// Permits building under oneself.
    Levitate,
    /// Removes the per-turn move limit.
    Limitless,
    /// Grants a grapple action.
    Mastery,
    /// Respawns the holder low on the mountain.
    Revive,
    /// Blocks adjacent players' move and grapple.
    Roar,
    /// Transfers a cube from under another player.
    Steal,
    /// Relocates two unburdened cubes.
    Telekinesis,
    /// Ends the holder's turn early.
    Timestop,
}

impl PowerCard {
    /// The shared pool every game deals from, without replacement.
    pub const ALL: [Self; 16] = [
        Self::Accelerate,
        Self::Armageddon,
        Self::Barrier,
        Self::Echo,
        Self::Freeze,
        Self::Gamble,
        Self::Ignite,
        Self::Kick,
        Self::Levitate,
        Self::Limitless,
        Self::Mastery,
        Self::Revive,
        Self::Roar,
        Self::Steal,
        Self::Telekinesis,
        Self::Timestop,
    ];

    /// Rules text shown when the card is dealt or displayed.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Accelerate => "Take an extra turn after this one.",
            Self::Armageddon => "Remove 1 cube under any number of players.",
            Self::Barrier => "Negate wind or a power that would affect you.",
            Self::Echo => "Use one of your other powers once more.",
            Self::Freeze => "Each other player cannot move during their next turn.",
            Self::Gamble => "Perform the roll action.",
            Self::Ignite => "Remove 1 or 2 cubes under any player.",
            Self::Kick => "Place an adjacent player on a space adjacent to them.",
            Self::Levitate => "You may build directly under yourself this turn.",
            Self::Limitless => "Perform the move action any number of times this turn.",
            Self::Mastery => "Perform the grapple action.",
            Self::Revive => "Place your player on any space on the 3rd level or below.",
            Self::Roar => "Adjacent players cannot move or grapple next turn.",
            Self::Steal => "Move 1 cube from under another player to under yourself.",
            Self::Telekinesis => "Move 2 unburdened cubes to unoccupied spaces.",
            Self::Timestop => "End your turn without performing another action.",
        }
    }
}

/// The three effects a die roll can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DieFace {
    /// Jump one or two levels up along a cardinal direction.
    Grapple,
    /// No effect.
    Blank,
    /// Shift every climber one cell in a chosen cardinal direction.
    Wind,
}

/// Face layout of the six-sided die; each entry is equally likely.
pub const DIE_FACES: [DieFace; 6] = [
    DieFace::Grapple,
    DieFace::Grapple,
    DieFace::Grapple,
    DieFace::Blank,
    DieFace::Blank,
    DieFace::Wind,
];

/// Everything the board needs to admit a new climber at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimberSpec {
    /// Identifier assigned to the climber.
    pub id: ClimberId,
    /// Colour assigned to the climber.
    pub colour: ClimberColour,
    /// Ground corner where the climber starts.
    pub start: Position,
    /// Cube supply budget for the whole game.
    pub total_cubes: u32,
    /// The two power cards dealt from the shared pool.
    pub power_cards: [PowerCard; 2],
}

/// Commands that express all permissible board mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Admits a climber onto the board during setup.
    AddClimber {
        /// Setup data for the new climber.
        spec: ClimberSpec,
    },
    /// Resets a climber's per-turn action flags at the start of their turn.
    BeginTurn {
        /// Climber whose turn is starting.
        climber: ClimberId,
    },
    /// Requests placement of a cube at the provided cell.
    BuildCube {
        /// Climber performing the build action.
        climber: ClimberId,
        /// Candidate cell for the new cube.
        position: Position,
    },
    /// Requests that a climber move to the provided destination.
    MoveClimber {
        /// Climber performing the move action.
        climber: ClimberId,
        /// Chosen destination cell.
        destination: Position,
    },
    /// Requests a grapple jump to the provided destination.
    GrappleClimber {
        /// Climber that rolled the grapple face.
        climber: ClimberId,
        /// Chosen grapple target cell.
        destination: Position,
    },
    /// Resolves a wind roll, pushing every climber in the chosen direction.
    PushClimbers {
        /// Climber that rolled the wind face.
        climber: ClimberId,
        /// Direction every climber is pushed toward.
        direction: Direction,
    },
    /// Spends the roll action without board effect (blank face, or a
    /// grapple with no legal destination).
    SpendRoll {
        /// Climber whose roll is spent.
        climber: ClimberId,
    },
}

/// Events broadcast by the board after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a climber was admitted onto the board.
    ClimberAdded {
        /// Identifier of the new climber.
        climber: ClimberId,
        /// Cell the climber occupies after setup.
        position: Position,
        /// Colour assigned to the climber.
        colour: ClimberColour,
    },
    /// Announces that a climber's turn began and their actions reset.
    TurnStarted {
        /// Climber whose turn started.
        climber: ClimberId,
    },
    /// Confirms that a cube was placed on the mountain.
    CubePlaced {
        /// Identifier assigned to the new cube.
        cube: CubeId,
        /// Climber that placed the cube.
        climber: ClimberId,
        /// Cell the cube occupies.
        position: Position,
    },
    /// Reports that a build proposal was rejected.
    BuildRejected {
        /// Climber whose proposal failed.
        climber: ClimberId,
        /// Candidate cell provided in the proposal.
        position: Position,
        /// Specific reason the placement failed.
        reason: BuildError,
    },
    /// Announces that a climber exhausted their build allowance.
    BuildCompleted {
        /// Climber whose build action is now spent.
        climber: ClimberId,
    },
    /// Confirms that a climber moved between two cells.
    ClimberMoved {
        /// Climber that moved.
        climber: ClimberId,
        /// Cell the climber occupied before moving.
        from: Position,
        /// Cell the climber occupies after the move.
        to: Position,
    },
    /// Reports that a move request was rejected.
    MoveRejected {
        /// Climber whose request failed.
        climber: ClimberId,
        /// Destination provided in the request.
        destination: Position,
        /// Specific reason the move failed.
        reason: MoveError,
    },
    /// Confirms that a climber grappled up the mountain.
    ClimberGrappled {
        /// Climber that grappled.
        climber: ClimberId,
        /// Cell the climber occupied before the jump.
        from: Position,
        /// Cell the climber occupies after the jump.
        to: Position,
    },
    /// Reports that a grapple request was rejected.
    GrappleRejected {
        /// Climber whose request failed.
        climber: ClimberId,
        /// Destination provided in the request.
        destination: Position,
        /// Specific reason the grapple failed.
        reason: GrappleError,
    },
    /// Confirms that wind displaced a climber.
    ClimberBlown {
        /// Climber that was displaced.
        climber: ClimberId,
        /// Cell the climber occupied before the push.
        from: Position,
        /// Cell the climber landed on.
        to: Position,
    },
    /// Reports that a taller column blocked a climber's wind push.
    ClimberHeld {
        /// Climber that held position.
        climber: ClimberId,
        /// Cell the climber kept.
        position: Position,
    },
    /// Announces that a wind roll finished resolving for all climbers.
    WindResolved {
        /// Direction the wind pushed toward.
        direction: Direction,
    },
    /// Confirms that a climber's roll action was spent.
    RollSpent {
        /// Climber whose roll is spent.
        climber: ClimberId,
    },
    /// Reports that a roll resolution was rejected.
    RollRejected {
        /// Climber whose request failed.
        climber: ClimberId,
        /// Specific reason the resolution failed.
        reason: DiceError,
    },
}

/// Reasons a cube placement proposal may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum BuildError {
    /// The build action was already spent this turn.
    #[error("build action already used this turn")]
    ActionAlreadyUsed,
    /// The candidate cell already holds a cube or climber.
    #[error("position is already occupied")]
    PositionOccupied,
    /// The candidate level does not continue its column's stack.
    #[error("height does not continue the column")]
    InvalidHeight,
    /// The candidate cell touches no anchoring cube.
    #[error("cube would be disconnected from the mountain")]
    Disconnected,
    /// No climber with the provided identifier exists.
    #[error("unknown climber")]
    UnknownClimber,
}

/// Reasons a move request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum MoveError {
    /// The move action was already spent this turn.
    #[error("move action already used this turn")]
    ActionAlreadyUsed,
    /// The destination is not reachable this turn.
    #[error("destination is not a legal move")]
    IllegalDestination,
    /// No climber with the provided identifier exists.
    #[error("unknown climber")]
    UnknownClimber,
}

/// Reasons a grapple request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum GrappleError {
    /// The roll action was already spent this turn.
    #[error("roll action already used this turn")]
    ActionAlreadyUsed,
    /// No cube is within grapple reach; the roll is forcibly spent.
    #[error("no legal grapple destination exists")]
    NoLegalDestination,
    /// The chosen cell is not within grapple reach.
    #[error("destination is not a legal grapple target")]
    IllegalDestination,
    /// No climber with the provided identifier exists.
    #[error("unknown climber")]
    UnknownClimber,
}

/// Reasons a blank or wind resolution may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum DiceError {
    /// The roll action was already spent this turn.
    #[error("roll action already used this turn")]
    ActionAlreadyUsed,
    /// No climber with the provided identifier exists.
    #[error("unknown climber")]
    UnknownClimber,
}

/// Reasons game setup may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SetupError {
    /// The requested player count has no supply budget or start corners.
    #[error("unsupported player count: {requested}")]
    UnsupportedPlayerCount {
        /// Player count provided by the caller.
        requested: u32,
    },
}

/// Outcome of a die roll reported back to the turn controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiceOutcome {
    /// Blank face: the roll was spent with no board effect.
    Blank,
    /// Grapple face: the climber may jump to one of the listed cells. An
    /// empty list means the roll was forcibly spent.
    Grapple {
        /// Legal grapple targets, sorted ascending.
        candidates: Vec<Position>,
    },
    /// Wind face: a push direction must still be chosen.
    Wind,
}
