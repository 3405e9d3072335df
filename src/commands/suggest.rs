//! Single-decision advice command

use crate::core::{CategorySet, Dice, RollsRemaining, YahtzeeError};
use crate::solver::{MoveAdvisor, Solver, Suggestion};

/// A live decision point as typed on the command line
pub struct SuggestConfig {
    pub dice: Vec<u8>,
    pub categories: CategorySet,
    pub rolls: u8,
}

impl SuggestConfig {
    #[must_use]
    pub const fn new(dice: Vec<u8>) -> Self {
        Self {
            dice,
            categories: CategorySet::ALL,
            rolls: 0,
        }
    }
}

/// The decision point and the recommended action
pub struct SuggestResult {
    pub dice: Dice,
    pub categories: CategorySet,
    pub rolls: RollsRemaining,
    pub suggestion: Suggestion,
}

/// Ask the advisor for the best action
///
/// # Errors
///
/// Returns an error if the dice or rolls remaining are invalid.
pub fn run_suggest(config: &SuggestConfig, solver: &Solver) -> Result<SuggestResult, YahtzeeError> {
    let advisor = MoveAdvisor::new(solver);
    let suggestion = advisor.suggest(&config.dice, config.categories, config.rolls)?;

    Ok(SuggestResult {
        dice: Dice::new(&config.dice)?,
        categories: config.categories,
        rolls: RollsRemaining::new(config.rolls)?,
        suggestion,
    })
}
