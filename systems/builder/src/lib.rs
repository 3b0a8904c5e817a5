#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure build system that turns placement proposals into build commands.

use summit_core::{ClimberId, Command, Event, Position, MAXIMUM_BUILD_CAPACITY};

/// A cube placement the adapter proposes on behalf of a climber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildProposal {
    /// Climber performing the build action.
    pub climber: ClimberId,
    /// Candidate cell for the new cube.
    pub position: Position,
}

impl BuildProposal {
    /// Creates a new placement proposal.
    #[must_use]
    pub const fn new(climber: ClimberId, position: Position) -> Self {
        Self { climber, position }
    }
}

/// Build system that tracks the active climber's remaining allowance from
/// the event stream and forwards plausible proposals.
///
/// The board re-validates every forwarded command; this system only
/// filters out proposals that cannot possibly succeed, such as a third
/// placement in one turn or a proposal from a climber whose turn it is
/// not.
#[derive(Clone, Copy, Debug, Default)]
pub struct Builder {
    active: Option<(ClimberId, u32)>,
}

impl Builder {
    /// Creates a new build system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Placements left for the provided climber, zero when it is not
    /// their turn.
    #[must_use]
    pub fn remaining(&self, climber: ClimberId) -> u32 {
        match self.active {
            Some((active, remaining)) if active == climber => remaining,
            _ => 0,
        }
    }

    /// Consumes board events and an optional proposal to emit build
    /// commands.
    pub fn handle(&mut self, events: &[Event], proposal: Option<BuildProposal>, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TurnStarted { climber } => {
                    self.active = Some((*climber, MAXIMUM_BUILD_CAPACITY));
                }
                Event::CubePlaced { climber, .. } => {
                    if let Some((active, remaining)) = self.active.as_mut() {
                        if *active == *climber {
                            *remaining = remaining.saturating_sub(1);
                        }
                    }
                }
                Event::BuildCompleted { climber } => {
                    if let Some((active, remaining)) = self.active.as_mut() {
                        if *active == *climber {
                            *remaining = 0;
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(proposal) = proposal {
            if self.remaining(proposal.climber) > 0 {
                out.push(Command::BuildCube {
                    climber: proposal.climber,
                    position: proposal.position,
                });
            }
        }
    }
}
