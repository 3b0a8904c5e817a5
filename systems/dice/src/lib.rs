#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure dice system that rolls the action die and plans its resolution.

use rand::Rng;
use summit_core::{ClimberId, Command, DiceOutcome, DieFace, Position, DIE_FACES};

/// Rolls the six-sided action die.
///
/// The caller owns the generator, so a seeded run replays the same face
/// sequence.
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> DieFace {
    DIE_FACES[rng.gen_range(0..DIE_FACES.len())]
}

/// Plans the board commands for a rolled face.
///
/// A blank face, or a grapple face with no legal target, spends the roll
/// immediately. A reachable grapple and every wind roll leave a decision
/// to the adapter, reported through the returned outcome; the adapter
/// answers with a `GrappleClimber` or `PushClimbers` command of its own.
///
/// The `grapple_candidates` closure should mirror the board's
/// `query::grapple_candidates` helper.
pub fn resolve<F>(
    climber: ClimberId,
    face: DieFace,
    grapple_candidates: F,
    out: &mut Vec<Command>,
) -> DiceOutcome
where
    F: FnOnce(ClimberId) -> Vec<Position>,
{
    match face {
        DieFace::Blank => {
            out.push(Command::SpendRoll { climber });
            DiceOutcome::Blank
        }
        DieFace::Grapple => {
            let candidates = grapple_candidates(climber);
            if candidates.is_empty() {
                out.push(Command::SpendRoll { climber });
            }
            DiceOutcome::Grapple { candidates }
        }
        DieFace::Wind => DiceOutcome::Wind,
    }
}

/// Rolls the die and immediately plans its resolution.
pub fn roll_and_resolve<R, F>(
    climber: ClimberId,
    rng: &mut R,
    grapple_candidates: F,
    out: &mut Vec<Command>,
) -> DiceOutcome
where
    R: Rng + ?Sized,
    F: FnOnce(ClimberId) -> Vec<Position>,
{
    resolve(climber, roll(rng), grapple_candidates, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn every_face_comes_up_eventually() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            match roll(&mut rng) {
                DieFace::Grapple => seen[0] = true,
                DieFace::Blank => seen[1] = true,
                DieFace::Wind => seen[2] = true,
            }
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn the_same_seed_replays_the_same_sequence() {
        let mut first = ChaCha8Rng::seed_from_u64(42);
        let mut second = ChaCha8Rng::seed_from_u64(42);
        let faces: Vec<DieFace> = (0..32).map(|_| roll(&mut first)).collect();
        let replay: Vec<DieFace> = (0..32).map(|_| roll(&mut second)).collect();
        assert_eq!(faces, replay);
    }

    #[test]
    fn a_blank_face_spends_the_roll() {
        let climber = ClimberId::new(0);
        let mut out = Vec::new();
        let outcome = resolve(climber, DieFace::Blank, |_| Vec::new(), &mut out);
        assert_eq!(outcome, DiceOutcome::Blank);
        assert_eq!(out, vec![Command::SpendRoll { climber }]);
    }

    #[test]
    fn an_unreachable_grapple_spends_the_roll() {
        let climber = ClimberId::new(0);
        let mut out = Vec::new();
        let outcome = resolve(climber, DieFace::Grapple, |_| Vec::new(), &mut out);
        assert_eq!(
            outcome,
            DiceOutcome::Grapple {
                candidates: Vec::new()
            }
        );
        assert_eq!(out, vec![Command::SpendRoll { climber }]);
    }

    #[test]
    fn a_reachable_grapple_defers_to_the_adapter() {
        let climber = ClimberId::new(0);
        let target = Position::new(3, 2, 1);
        let mut out = Vec::new();
        let outcome = resolve(climber, DieFace::Grapple, |_| vec![target], &mut out);
        assert_eq!(
            outcome,
            DiceOutcome::Grapple {
                candidates: vec![target]
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn a_wind_face_defers_to_the_adapter() {
        let climber = ClimberId::new(0);
        let mut out = Vec::new();
        let outcome = resolve(climber, DieFace::Wind, |_| Vec::new(), &mut out);
        assert_eq!(outcome, DiceOutcome::Wind);
        assert!(out.is_empty());
    }
}
