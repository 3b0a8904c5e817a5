#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that forwards legal move requests.

use std::collections::BTreeSet;

use summit_core::{ClimberId, Command, Event, Position};

/// A destination the adapter requests on behalf of a climber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    /// Climber performing the move action.
    pub climber: ClimberId,
    /// Chosen destination cell.
    pub destination: Position,
}

impl MoveRequest {
    /// Creates a new move request.
    #[must_use]
    pub const fn new(climber: ClimberId, destination: Position) -> Self {
        Self { climber, destination }
    }
}

/// Movement system that tracks the active climber's move action from the
/// event stream and forwards requests whose destination is reachable.
///
/// The `valid_destinations` closure passed to [`Movement::handle`] should
/// mirror the board's `query::valid_destinations` helper; the board still
/// re-validates every forwarded command.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement {
    active: Option<(ClimberId, bool)>,
}

impl Movement {
    /// Creates a new movement system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Reports whether the provided climber still holds their move action.
    #[must_use]
    pub fn may_move(&self, climber: ClimberId) -> bool {
        matches!(self.active, Some((active, available)) if active == climber && available)
    }

    /// Consumes board events and an optional request to emit move
    /// commands.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        request: Option<MoveRequest>,
        mut valid_destinations: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(ClimberId) -> BTreeSet<Position>,
    {
        for event in events {
            match event {
                Event::TurnStarted { climber } => {
                    self.active = Some((*climber, true));
                }
                Event::ClimberMoved { climber, .. } => {
                    if let Some((active, available)) = self.active.as_mut() {
                        if *active == *climber {
                            *available = false;
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(request) = request {
            if self.may_move(request.climber)
                && valid_destinations(request.climber).contains(&request.destination)
            {
                out.push(Command::MoveClimber {
                    climber: request.climber,
                    destination: request.destination,
                });
            }
        }
    }
}
