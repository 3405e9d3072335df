//! Solitaire game driver
//!
//! Plays complete 13-turn games with any [`Strategy`]. Dice come from a
//! caller-supplied RNG so a seeded simulation replays exactly.

mod scorecard;

pub use scorecard::{Scorecard, UPPER_BONUS, UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS};

use crate::core::{Category, Dice, KeepPattern, NUM_CATEGORIES, RollsRemaining, YahtzeeError};
use crate::solver::Strategy;
use rand::Rng;

/// Roll five fresh dice
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Dice {
    Dice::from_rolled(std::array::from_fn(|_| rng.random_range(1..=6)))
}

/// Reroll every die whose position is not in `pattern`
pub fn reroll<R: Rng + ?Sized>(dice: &mut Dice, pattern: KeepPattern, rng: &mut R) {
    let mut faces = *dice.faces();
    for (position, face) in faces.iter_mut().enumerate() {
        if !pattern.keeps(position) {
            *face = rng.random_range(1..=6);
        }
    }
    *dice = Dice::from_rolled(faces);
}

/// Play one turn against `card`, returning the category filled and its score
///
/// # Errors
/// Propagates strategy errors, invalid keep positions, and a strategy that
/// names no category or a filled one.
pub fn play_turn<S, R>(
    strategy: &S,
    card: &mut Scorecard,
    rng: &mut R,
) -> Result<(Category, u32), YahtzeeError>
where
    S: Strategy + ?Sized,
    R: Rng + ?Sized,
{
    let mut dice = roll(rng);
    let mut rolls = RollsRemaining::MAX;

    while let Some(next) = rolls.after_reroll() {
        let keep = KeepPattern::from_positions(&strategy.choose_keep(&dice, card, rolls)?)?;
        if keep == KeepPattern::KEEP_ALL {
            break;
        }
        reroll(&mut dice, keep, rng);
        rolls = next;
    }

    let category = strategy
        .choose_category(&dice, card)?
        .ok_or_else(|| YahtzeeError::InvalidCategory("no open category to score".to_string()))?;
    let points = card.fill(category, &dice)?;
    Ok((category, points))
}

/// Play a full game and return the finished card
///
/// # Errors
/// See [`play_turn`].
pub fn play_game<S, R>(strategy: &S, rng: &mut R) -> Result<Scorecard, YahtzeeError>
where
    S: Strategy + ?Sized,
    R: Rng + ?Sized,
{
    let mut card = Scorecard::new();
    for _ in 0..NUM_CATEGORIES {
        play_turn(strategy, &mut card, rng)?;
    }
    Ok(card)
}
