//! Decision analysis command
//!
//! Ranks every distinct keep for a roll and lists what each open category
//! would score right now.

use crate::core::{Category, CategorySet, Dice, RollsRemaining, YahtzeeError};
use crate::solver::{KeepOption, MoveAdvisor, Solver, Suggestion};

/// Result of analyzing one decision point
pub struct AnalysisResult {
    pub dice: Dice,
    pub categories: CategorySet,
    pub rolls: RollsRemaining,
    pub best: Suggestion,
    /// Stop plus every distinct keep, best first (empty on the final roll)
    pub keeps: Vec<KeepOption>,
    /// Immediate score of each open category
    pub category_scores: Vec<(Category, u32)>,
}

/// Analyze a roll against the open categories
///
/// # Errors
///
/// Returns an error if the dice or rolls remaining are invalid.
pub fn analyze_roll(
    dice: &[u8],
    categories: CategorySet,
    rolls: u8,
    solver: &Solver,
) -> Result<AnalysisResult, YahtzeeError> {
    let advisor = MoveAdvisor::new(solver);

    Ok(AnalysisResult {
        dice: Dice::new(dice)?,
        categories,
        rolls: RollsRemaining::new(rolls)?,
        best: advisor.suggest(dice, categories, rolls)?,
        keeps: advisor.rank_keeps(dice, categories, rolls)?,
        category_scores: advisor.category_scores(dice, categories)?,
    })
}
