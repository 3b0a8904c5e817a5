#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure setup system that deals power cards and stations climbers.

use rand::seq::SliceRandom;
use rand::Rng;
use summit_core::{
    cube_supply, ClimberColour, ClimberId, ClimberSpec, Command, PowerCard, SetupError,
    START_CORNERS,
};

/// Emits the `AddClimber` commands that open a fresh game.
///
/// Colours and start corners are assigned in fixed order so two games
/// with the same player count always seat climbers identically. Only the
/// power card deal consumes randomness: the shared sixteen-card pool is
/// shuffled once and every climber takes the next two cards, so no card
/// is dealt twice.
pub fn spawn_commands<R: Rng + ?Sized>(
    player_count: u32,
    rng: &mut R,
    out: &mut Vec<Command>,
) -> Result<(), SetupError> {
    let total_cubes = cube_supply(player_count).ok_or(SetupError::UnsupportedPlayerCount {
        requested: player_count,
    })?;

    let mut pool = PowerCard::ALL;
    pool.shuffle(rng);

    for index in 0..player_count as usize {
        out.push(Command::AddClimber {
            spec: ClimberSpec {
                id: ClimberId::new(index as u32),
                colour: ClimberColour::ALL[index],
                start: START_CORNERS[index],
                total_cubes,
                power_cards: [pool[index * 2], pool[index * 2 + 1]],
            },
        });
    }
    Ok(())
}
