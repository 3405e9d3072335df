//! Move advisor: live game snapshots in, concrete recommendations out
//!
//! Validates raw input at the boundary, maps it onto the solver's canonical
//! key, and translates canonical keep patterns back into positions of the
//! caller's ordered dice.

use super::engine::Solver;
use super::table::BestAction;
use crate::core::{
    Category, CategorySet, Dice, GameState, KeepPattern, NUM_DICE, NUM_FACES, RollsRemaining,
    YahtzeeError, score,
};

/// Recommended action for one decision point
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Positions of the input dice to keep (empty on the final roll)
    pub keep: Vec<usize>,
    /// Category to score (only on the final roll)
    pub category: Option<Category>,
    /// Optimal expected score for the rest of the turn
    pub expected_value: f64,
    /// Rerolls remain but none of them improves the expectation
    pub stop: bool,
}

impl Suggestion {
    /// True when every die is kept and no category is chosen yet
    #[must_use]
    pub fn keeps_everything(&self) -> bool {
        self.keep.len() == NUM_DICE
    }
}

/// One candidate reroll (or stopping) with its expected value
#[derive(Debug, Clone, PartialEq)]
pub struct KeepOption {
    pub keep: Vec<usize>,
    /// Face values at the kept positions
    pub kept_faces: Vec<u8>,
    pub expected_value: f64,
    pub stop: bool,
}

/// Read-only query facade over a [`Solver`]
///
/// Category sets missing from the table are solved on demand, so callers
/// never see `StateNotComputed`.
#[derive(Debug, Clone, Copy)]
pub struct MoveAdvisor<'a> {
    solver: &'a Solver,
}

impl<'a> MoveAdvisor<'a> {
    #[must_use]
    pub const fn new(solver: &'a Solver) -> Self {
        Self { solver }
    }

    #[must_use]
    pub const fn solver(&self) -> &'a Solver {
        self.solver
    }

    /// Best action for raw dice, open categories, and rolls remaining
    ///
    /// # Errors
    /// `InvalidDice` for a wrong die count or face, `InvalidRollsRemaining`
    /// for `rolls > 2`.
    ///
    /// # Examples
    /// ```
    /// use yahtzee_solver::core::{Category, CategorySet};
    /// use yahtzee_solver::solver::{MoveAdvisor, Solver};
    ///
    /// let solver = Solver::new();
    /// let advisor = MoveAdvisor::new(&solver);
    /// let open = CategorySet::EMPTY.with(Category::Twos);
    ///
    /// let suggestion = advisor.suggest(&[6, 2, 4, 2, 2], open, 1).unwrap();
    /// assert_eq!(suggestion.keep, vec![1, 3, 4]);
    /// assert_eq!(suggestion.category, None);
    /// ```
    pub fn suggest(
        &self,
        dice: &[u8],
        available: CategorySet,
        rolls: u8,
    ) -> Result<Suggestion, YahtzeeError> {
        let dice = Dice::new(dice)?;
        let rolls = RollsRemaining::new(rolls)?;
        Ok(self.suggest_dice(&dice, available, rolls))
    }

    /// Best action for already validated dice
    #[must_use]
    pub fn suggest_dice(
        &self,
        dice: &Dice,
        available: CategorySet,
        rolls: RollsRemaining,
    ) -> Suggestion {
        let state = GameState::new(dice.state(), available, rolls);
        let entry = self.solver.evaluate(&state);

        let (keep, category, stop) = match entry.action {
            BestAction::Score(category) => (Vec::new(), Some(category), false),
            BestAction::NoCategory => (Vec::new(), None, false),
            BestAction::Stop => ((0..NUM_DICE).collect(), None, true),
            BestAction::Keep(pattern) => (positions_to_keep(dice, &state, pattern), None, false),
        };

        Suggestion {
            keep,
            category,
            expected_value: entry.expected_value,
            stop,
        }
    }

    /// Optimal expected score for the rest of the turn
    ///
    /// # Errors
    /// Same validation as [`MoveAdvisor::suggest`].
    pub fn expected_value(
        &self,
        dice: &[u8],
        available: CategorySet,
        rolls: u8,
    ) -> Result<f64, YahtzeeError> {
        let state = game_state(dice, available, rolls)?;
        Ok(self.solver.expected_value(&state))
    }

    /// Every distinct reroll plus stopping, best first
    ///
    /// Empty on the final roll. Keeping all five dice is the stop option, so
    /// it is listed once, as stop. Options with equal value keep their
    /// generation order: stop first, then keeps by ascending pattern.
    ///
    /// # Errors
    /// Same validation as [`MoveAdvisor::suggest`].
    pub fn rank_keeps(
        &self,
        dice: &[u8],
        available: CategorySet,
        rolls: u8,
    ) -> Result<Vec<KeepOption>, YahtzeeError> {
        let ordered = Dice::new(dice)?;
        let state = game_state(dice, available, rolls)?;
        if state.rolls.is_final() {
            return Ok(Vec::new());
        }

        let mut options = vec![KeepOption {
            keep: (0..NUM_DICE).collect(),
            kept_faces: ordered.faces().to_vec(),
            expected_value: self.solver.expected_value(&state.at_final_roll()),
            stop: true,
        }];

        let patterns = self
            .solver
            .transitions()
            .distinct_patterns(state.dice.rank());
        for &pattern in patterns.iter().filter(|p| p.rerolled_count() > 0) {
            let Some(expected_value) = self.solver.keep_value(&state, pattern) else {
                continue;
            };
            let keep = positions_to_keep(&ordered, &state, pattern);
            let kept_faces = keep.iter().map(|&i| ordered.faces()[i]).collect();
            options.push(KeepOption {
                keep,
                kept_faces,
                expected_value,
                stop: false,
            });
        }

        options.sort_by(|a, b| b.expected_value.total_cmp(&a.expected_value));
        Ok(options)
    }

    /// Immediate score of each open category, in category order
    ///
    /// # Errors
    /// `InvalidDice` for malformed dice.
    pub fn category_scores(
        &self,
        dice: &[u8],
        available: CategorySet,
    ) -> Result<Vec<(Category, u32)>, YahtzeeError> {
        let dice = Dice::new(dice)?;
        Ok(available
            .iter()
            .map(|category| (category, score(category, &dice)))
            .collect())
    }

    /// Score a player-chosen category, rejecting one that is not open
    ///
    /// # Errors
    /// `InvalidDice` for malformed dice, `InvalidCategory` if `category` is not
    /// in `available`.
    pub fn score_choice(
        &self,
        dice: &[u8],
        available: CategorySet,
        category: Category,
    ) -> Result<u32, YahtzeeError> {
        let dice = Dice::new(dice)?;
        if !available.contains(category) {
            return Err(YahtzeeError::InvalidCategory(format!(
                "{category} is not among the available categories"
            )));
        }
        Ok(score(category, &dice))
    }
}

/// Validate raw input and build the solver key
///
/// # Errors
/// `InvalidDice` or `InvalidRollsRemaining`.
pub fn game_state(dice: &[u8], available: CategorySet, rolls: u8) -> Result<GameState, YahtzeeError> {
    let dice = Dice::new(dice)?;
    Ok(GameState::new(
        dice.state(),
        available,
        RollsRemaining::new(rolls)?,
    ))
}

/// Map a pattern over the sorted canonical dice onto positions of `dice`
///
/// Any position assignment with the same per-face counts is equivalent, so
/// the earliest matching positions are taken.
fn positions_to_keep(dice: &Dice, state: &GameState, pattern: KeepPattern) -> Vec<usize> {
    let sorted = state.dice.faces();
    let mut wanted = [0u8; NUM_FACES];
    for position in pattern.positions() {
        wanted[usize::from(sorted[position] - 1)] += 1;
    }

    dice.faces()
        .iter()
        .enumerate()
        .filter_map(|(i, &face)| {
            let slot = &mut wanted[usize::from(face - 1)];
            if *slot > 0 {
                *slot -= 1;
                Some(i)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceError;

    fn only(category: Category) -> CategorySet {
        CategorySet::EMPTY.with(category)
    }

    #[test]
    fn final_roll_names_a_category() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);

        let suggestion = advisor
            .suggest(&[6, 6, 6, 6, 6], only(Category::Yahtzee), 0)
            .unwrap();
        assert!(suggestion.keep.is_empty());
        assert_eq!(suggestion.category, Some(Category::Yahtzee));
        assert_eq!(suggestion.expected_value, 50.0);
        assert!(!suggestion.stop);
    }

    #[test]
    fn keep_positions_follow_input_order() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);

        let suggestion = advisor
            .suggest(&[6, 2, 4, 2, 2], only(Category::Twos), 2)
            .unwrap();
        assert_eq!(suggestion.keep, vec![1, 3, 4]);
        assert_eq!(suggestion.category, None);
        assert!(suggestion.expected_value > 6.0);
    }

    #[test]
    fn stop_keeps_every_die() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);

        let suggestion = advisor
            .suggest(&[4, 4, 4, 4, 4], only(Category::Yahtzee), 1)
            .unwrap();
        assert!(suggestion.stop);
        assert!(suggestion.keeps_everything());
        assert_eq!(suggestion.expected_value, 50.0);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);

        assert_eq!(
            advisor.suggest(&[1, 2, 3, 4], CategorySet::ALL, 0),
            Err(YahtzeeError::InvalidDice(DiceError::Count(4)))
        );
        assert_eq!(
            advisor.suggest(&[1, 2, 3, 4, 7], CategorySet::ALL, 0),
            Err(YahtzeeError::InvalidDice(DiceError::Face(7)))
        );
        assert_eq!(
            advisor.suggest(&[1, 2, 3, 4, 5], CategorySet::ALL, 3),
            Err(YahtzeeError::InvalidRollsRemaining(3))
        );
    }

    #[test]
    fn partial_table_misses_are_recovered() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let open = only(Category::Chance);
        assert!(!solver.is_solved(open));

        let value = advisor.expected_value(&[3, 3, 3, 3, 3], open, 0).unwrap();
        assert_eq!(value, 15.0);
        assert!(solver.is_solved(open));
    }

    #[test]
    fn expected_value_matches_suggestion() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let open: CategorySet = [Category::Fours, Category::SmallStraight]
            .into_iter()
            .collect();

        let value = advisor.expected_value(&[1, 3, 4, 4, 6], open, 2).unwrap();
        let suggestion = advisor.suggest(&[1, 3, 4, 4, 6], open, 2).unwrap();
        assert_eq!(value, suggestion.expected_value);
    }

    #[test]
    fn ranked_keeps_start_with_the_suggestion() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let dice = [5, 1, 5, 3, 2];
        let open = CategorySet::ALL;

        let ranked = advisor.rank_keeps(&dice, open, 1).unwrap();
        let suggestion = advisor.suggest(&dice, open, 1).unwrap();

        assert_eq!(ranked[0].expected_value, suggestion.expected_value);
        assert!(
            ranked
                .windows(2)
                .all(|w| w[0].expected_value >= w[1].expected_value)
        );
        assert_eq!(ranked.iter().filter(|o| o.stop).count(), 1);
        // Distinct keeps of {1, 2, 3, 5, 5}: 2 * 2 * 2 * 3, minus keeping all five
        assert_eq!(ranked.len(), 1 + 23);
    }

    #[test]
    fn keeping_all_dice_is_listed_only_as_stop() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let dice = [1, 2, 3, 5, 5];
        let open: CategorySet = [Category::Yahtzee, Category::Chance].into_iter().collect();

        let ranked = advisor.rank_keeps(&dice, open, 2).unwrap();
        let keep_all: Vec<&KeepOption> = ranked
            .iter()
            .filter(|o| o.keep.len() == NUM_DICE)
            .collect();

        assert_eq!(keep_all.len(), 1);
        assert!(keep_all[0].stop);
        // Stopping scores the dice now: 16 in Chance
        assert_eq!(keep_all[0].expected_value, 16.0);
        assert!(ranked.iter().all(|o| o.stop || o.keep.len() < NUM_DICE));
    }

    #[test]
    fn no_keeps_on_final_roll() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let ranked = advisor
            .rank_keeps(&[1, 2, 3, 4, 5], only(Category::Chance), 0)
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn kept_faces_match_positions() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let dice = [6, 2, 6, 2, 6];

        for option in advisor
            .rank_keeps(&dice, only(Category::FullHouse), 2)
            .unwrap()
        {
            let faces: Vec<u8> = option.keep.iter().map(|&i| dice[i]).collect();
            assert_eq!(faces, option.kept_faces);
        }
    }

    #[test]
    fn category_scores_cover_open_boxes() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let open: CategorySet = [Category::Threes, Category::FullHouse]
            .into_iter()
            .collect();

        let scores = advisor.category_scores(&[3, 5, 3, 5, 3], open).unwrap();
        assert_eq!(
            scores,
            vec![(Category::Threes, 9), (Category::FullHouse, 25)]
        );
    }

    #[test]
    fn score_choice_requires_open_category() {
        let solver = Solver::new();
        let advisor = MoveAdvisor::new(&solver);
        let open = only(Category::Chance);

        assert_eq!(
            advisor.score_choice(&[1, 2, 3, 4, 6], open, Category::Chance),
            Ok(16)
        );
        assert!(matches!(
            advisor.score_choice(&[1, 2, 3, 4, 6], open, Category::Sixes),
            Err(YahtzeeError::InvalidCategory(_))
        ));
    }

    #[test]
    fn positions_respect_face_counts() {
        let dice = Dice::new(&[5, 2, 5, 2, 1]).unwrap();
        let state = GameState::new(dice.state(), CategorySet::ALL, RollsRemaining::MAX);
        // Sorted faces are [1, 2, 2, 5, 5]; keep one 2 and both 5s
        let pattern = KeepPattern::from_flags([false, true, false, true, true]);

        assert_eq!(positions_to_keep(&dice, &state, pattern), vec![0, 1, 2]);
    }
}
