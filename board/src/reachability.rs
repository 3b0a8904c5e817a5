//! Destination search used by the move executor.
//!
//! Movement legality combines three independent rules: a breadth-first walk
//! across the climber's current level, a one-level ascent onto an adjacent
//! column top, and a descent of any depth onto an adjacent column top. The
//! walk uses an explicit queue and a visited set keyed by column so the
//! search terminates regardless of mountain shape.

use std::collections::{BTreeSet, HashSet, VecDeque};

use summit_core::{ClimberId, ColumnKey, Direction, Position, EDGE_LENGTH};

use crate::Board;

/// Axis-aligned footprint that bounds the same-level walk.
///
/// The empty ground plane is unbounded, so the walk is confined to the
/// bounding box of every piece on the board expanded by one edge step. Any
/// detour around an obstacle fits inside that ring because obstacles only
/// exist inside the box.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    min_x: i32,
    max_x: i32,
    min_z: i32,
    max_z: i32,
}

impl Bounds {
    fn expanded(self, margin: i32) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_z: self.min_z - margin,
            max_z: self.max_z + margin,
        }
    }

    fn contains(&self, column: ColumnKey) -> bool {
        column.x() >= self.min_x
            && column.x() <= self.max_x
            && column.z() >= self.min_z
            && column.z() <= self.max_z
    }
}

fn piece_bounds(board: &Board) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for column in board.occupied_columns() {
        bounds = Some(match bounds {
            None => Bounds {
                min_x: column.x(),
                max_x: column.x(),
                min_z: column.z(),
                max_z: column.z(),
            },
            Some(current) => Bounds {
                min_x: current.min_x.min(column.x()),
                max_x: current.max_x.max(column.x()),
                min_z: current.min_z.min(column.z()),
                max_z: current.max_z.max(column.z()),
            },
        });
    }
    bounds
}

/// Computes every cell the climber may move to this turn.
///
/// The result is recomputed from scratch on every call; the board mutates
/// between actions and nothing here is worth caching. Cells occupied by
/// other climbers never appear in the result.
pub(crate) fn valid_destinations(board: &Board, climber: ClimberId) -> BTreeSet<Position> {
    let mut destinations = BTreeSet::new();
    let Some(origin) = board.climber_position(climber) else {
        return destinations;
    };

    same_level_walk(board, origin, &mut destinations);
    adjacent_ascents(board, origin, &mut destinations);
    adjacent_descents(board, origin, &mut destinations);
    destinations
}

/// Rule 1: breadth-first walk across the climber's current level.
///
/// Traversable cells are column tops resting at the climber's level and,
/// when the climber stands on the ground, empty ground cells. Cells held by
/// other climbers block the path entirely. Empty ground cells are
/// connectors only; destinations are always top cubes.
fn same_level_walk(board: &Board, origin: Position, destinations: &mut BTreeSet<Position>) {
    let Some(bounds) = piece_bounds(board) else {
        return;
    };
    let bounds = bounds.expanded(EDGE_LENGTH);
    let level = origin.y();

    let mut visited: HashSet<ColumnKey> = HashSet::new();
    let mut queue: VecDeque<Position> = VecDeque::new();
    let _ = visited.insert(origin.column());
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        for direction in Direction::ALL {
            let next = cell.step(direction);
            if !bounds.contains(next.column()) {
                continue;
            }
            if !visited.insert(next.column()) {
                continue;
            }
            if board.climber_at(next).is_some() {
                continue;
            }

            let landable = board.cube_is_top(next).unwrap_or(false);
            let open_ground = level == 0 && board.column_height(next.column()) == 0;

            if landable {
                let _ = destinations.insert(next);
                queue.push_back(next);
            } else if open_ground {
                queue.push_back(next);
            }
        }
    }
}

/// Rule 2: adjacent column tops exactly one level above the climber.
fn adjacent_ascents(board: &Board, origin: Position, destinations: &mut BTreeSet<Position>) {
    for direction in Direction::ALL {
        let neighbor = origin.column().step(direction);
        let Some(top) = board.column_top(neighbor) else {
            continue;
        };
        if top.y() != origin.y() + EDGE_LENGTH {
            continue;
        }
        if board.climber_at(top).is_some() {
            continue;
        }
        let _ = destinations.insert(top);
    }
}

/// Rule 3: adjacent column tops any number of levels below the climber.
///
/// A neighbor footprint with no column at all counts as a ground cell; the
/// climber may always drop back down to open ground.
fn adjacent_descents(board: &Board, origin: Position, destinations: &mut BTreeSet<Position>) {
    if origin.y() == 0 {
        return;
    }

    for direction in Direction::ALL {
        let neighbor = origin.column().step(direction);
        let landing = match board.column_top(neighbor) {
            Some(top) if top.y() < origin.y() => top,
            Some(_) => continue,
            None => neighbor.cell_at(0),
        };
        if board.climber_at(landing).is_some() {
            continue;
        }
        let _ = destinations.insert(landing);
    }
}

/// Computes the cells a grapple roll may hoist the climber onto: column
/// tops exactly one or two levels up, a single cardinal step away in the
/// horizontal plane. Diagonal columns and the climber's own column are
/// never in reach.
pub(crate) fn grapple_candidates(board: &Board, climber: ClimberId) -> Vec<Position> {
    let mut candidates = Vec::new();
    let Some(origin) = board.climber_position(climber) else {
        return candidates;
    };

    for direction in Direction::ALL {
        let neighbor = origin.column().step(direction);
        let Some(top) = board.column_top(neighbor) else {
            continue;
        };
        let rise = top.y() - origin.y();
        if rise != EDGE_LENGTH && rise != 2 * EDGE_LENGTH {
            continue;
        }
        if board.climber_at(top).is_some() {
            continue;
        }
        candidates.push(top);
    }

    candidates.sort_unstable();
    candidates
}
