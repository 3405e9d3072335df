//! Play strategies
//!
//! Defines the Strategy trait and concrete implementations.

use super::advisor::MoveAdvisor;
use super::engine::Solver;
use crate::core::{Category, Dice, NUM_DICE, RollsRemaining, YahtzeeError};
use crate::game::Scorecard;

/// A policy for the two decisions a turn asks for
pub trait Strategy {
    /// Positions of `dice` to keep before the next reroll
    ///
    /// Keeping all five dice ends the rerolls for this turn.
    ///
    /// # Errors
    /// Implementations may fail on inconsistent input.
    fn choose_keep(
        &self,
        dice: &Dice,
        scorecard: &Scorecard,
        rolls: RollsRemaining,
    ) -> Result<Vec<usize>, YahtzeeError>;

    /// Category to fill with the final dice, `None` if the card is full
    ///
    /// # Errors
    /// Implementations may fail on inconsistent input.
    fn choose_category(
        &self,
        dice: &Dice,
        scorecard: &Scorecard,
    ) -> Result<Option<Category>, YahtzeeError>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy)]
pub enum StrategyType<'a> {
    /// Solver-backed optimal play (default)
    Optimal(OptimalStrategy<'a>),
    /// Uniformly random keeps and categories
    Random(RandomStrategy),
}

impl Strategy for StrategyType<'_> {
    fn choose_keep(
        &self,
        dice: &Dice,
        scorecard: &Scorecard,
        rolls: RollsRemaining,
    ) -> Result<Vec<usize>, YahtzeeError> {
        match self {
            Self::Optimal(s) => s.choose_keep(dice, scorecard, rolls),
            Self::Random(s) => s.choose_keep(dice, scorecard, rolls),
        }
    }

    fn choose_category(
        &self,
        dice: &Dice,
        scorecard: &Scorecard,
    ) -> Result<Option<Category>, YahtzeeError> {
        match self {
            Self::Optimal(s) => s.choose_category(dice, scorecard),
            Self::Random(s) => s.choose_category(dice, scorecard),
        }
    }
}

impl<'a> StrategyType<'a> {
    /// Create strategy from name string
    ///
    /// Supported names: "optimal", "random".
    /// Defaults to optimal if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str, solver: &'a Solver) -> Self {
        match name {
            "random" => Self::Random(RandomStrategy),
            _ => Self::Optimal(OptimalStrategy::new(solver)),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Optimal(_) => "optimal",
            Self::Random(_) => "random",
        }
    }
}

/// Optimal play from the solver tables
///
/// Keeps and categories follow the move advisor; the scorecard only supplies
/// the open categories.
#[derive(Debug, Clone, Copy)]
pub struct OptimalStrategy<'a> {
    advisor: MoveAdvisor<'a>,
}

impl<'a> OptimalStrategy<'a> {
    #[must_use]
    pub const fn new(solver: &'a Solver) -> Self {
        Self {
            advisor: MoveAdvisor::new(solver),
        }
    }
}

impl Strategy for OptimalStrategy<'_> {
    fn choose_keep(
        &self,
        dice: &Dice,
        scorecard: &Scorecard,
        rolls: RollsRemaining,
    ) -> Result<Vec<usize>, YahtzeeError> {
        if rolls.is_final() {
            return Ok((0..NUM_DICE).collect());
        }
        Ok(self
            .advisor
            .suggest_dice(dice, scorecard.available(), rolls)
            .keep)
    }

    fn choose_category(
        &self,
        dice: &Dice,
        scorecard: &Scorecard,
    ) -> Result<Option<Category>, YahtzeeError> {
        Ok(self
            .advisor
            .suggest_dice(dice, scorecard.available(), RollsRemaining::NONE)
            .category)
    }
}

/// Random strategy
///
/// Keeps each die with probability one half and scores in a uniformly chosen
/// open category. Draws from the thread RNG, so it does not replay per seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn choose_keep(
        &self,
        _dice: &Dice,
        _scorecard: &Scorecard,
        _rolls: RollsRemaining,
    ) -> Result<Vec<usize>, YahtzeeError> {
        use rand::Rng;

        let mut rng = rand::rng();
        Ok((0..NUM_DICE).filter(|_| rng.random_bool(0.5)).collect())
    }

    fn choose_category(
        &self,
        _dice: &Dice,
        scorecard: &Scorecard,
    ) -> Result<Option<Category>, YahtzeeError> {
        use rand::prelude::IndexedRandom;

        let open: Vec<Category> = scorecard.available().iter().collect();
        Ok(open.choose(&mut rand::rng()).copied())
    }
}
