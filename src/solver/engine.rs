//! Backward-induction solver
//!
//! Solves one category set at a time. Within a set the schedule is strictly
//! rolls-remaining 0, then 1, then 2: level 0 is the forced category choice,
//! and each higher level maximizes over stopping and every distinct keep,
//! reading only the already-frozen level below it.

use super::enumerate::{all_dice_states, category_subsets};
use super::table::{BestAction, Entry, LevelValues, NUM_LEVELS, PolicyTable, SolvedBlock};
use super::transitions::TransitionModel;
use crate::core::{
    CategorySet, DiceState, GameState, KeepPattern, NUM_CATEGORIES, NUM_DICE_STATES,
    RollsRemaining, YahtzeeError, score_all,
};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Optimal-play solver owning the expected-value and best-action tables
///
/// Blocks are solved either up front with [`Solver::precompute`] or on demand
/// the first time [`Solver::evaluate`] touches a category set.
///
/// # Examples
/// ```
/// use yahtzee_solver::core::{Category, CategorySet, DiceState, GameState, RollsRemaining};
/// use yahtzee_solver::solver::Solver;
///
/// let solver = Solver::new();
/// let state = GameState::new(
///     DiceState::from_faces(&[6, 6, 6, 6, 6]).unwrap(),
///     CategorySet::EMPTY.with(Category::Yahtzee),
///     RollsRemaining::NONE,
/// );
/// let entry = solver.evaluate(&state);
/// assert_eq!(entry.expected_value, 50.0);
/// ```
#[derive(Debug)]
pub struct Solver {
    states: Vec<DiceState>,
    transitions: TransitionModel,
    category_scores: Vec<[u32; NUM_CATEGORIES]>,
    table: PolicyTable,
}

impl Solver {
    #[must_use]
    pub fn new() -> Self {
        let states: Vec<DiceState> = all_dice_states().collect();
        let transitions = TransitionModel::build(&states);
        let category_scores = states.iter().map(score_all).collect();

        Self {
            states,
            transitions,
            category_scores,
            table: PolicyTable::new(),
        }
    }

    /// All dice states, indexed by rank
    #[must_use]
    pub fn states(&self) -> &[DiceState] {
        &self.states
    }

    #[must_use]
    pub const fn transitions(&self) -> &TransitionModel {
        &self.transitions
    }

    #[must_use]
    pub const fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// Solve every subset of `universe` in parallel
    ///
    /// Returns the number of category sets visited.
    pub fn precompute(&self, universe: CategorySet) -> usize {
        self.precompute_with(universe, &AtomicBool::new(false), |_| {})
    }

    /// Solve every subset of `universe`, reporting each finished block
    ///
    /// Once `cancel` is set no further category sets are started; blocks
    /// already frozen stay valid. Returns the number of category sets visited.
    pub fn precompute_with<F>(&self, universe: CategorySet, cancel: &AtomicBool, on_block: F) -> usize
    where
        F: Fn(CategorySet) + Sync,
    {
        let subsets: Vec<CategorySet> = category_subsets(universe).collect();

        subsets
            .par_iter()
            .filter(|&&categories| {
                if cancel.load(Ordering::Relaxed) {
                    return false;
                }
                self.block(categories);
                on_block(categories);
                true
            })
            .count()
    }

    /// The block for `categories`, solving it first if necessary
    pub fn block(&self, categories: CategorySet) -> &SolvedBlock {
        self.table
            .get_or_solve(categories, || self.solve_block(categories))
    }

    /// Strict lookup: fails if the state's category set has not been solved
    ///
    /// # Errors
    /// Returns `StateNotComputed` on a table miss.
    pub fn lookup(&self, state: &GameState) -> Result<Entry, YahtzeeError> {
        self.table
            .get(state.categories)
            .map(|block| block.entry(state.rolls.index(), state.dice.rank()))
            .ok_or(YahtzeeError::StateNotComputed(state.categories))
    }

    /// Lookup that solves the state's category set on a miss
    pub fn evaluate(&self, state: &GameState) -> Entry {
        self.lookup(state).unwrap_or_else(|_| {
            self.block(state.categories)
                .entry(state.rolls.index(), state.dice.rank())
        })
    }

    #[must_use]
    pub fn expected_value(&self, state: &GameState) -> f64 {
        self.evaluate(state).expected_value
    }

    /// Expected value of rerolling with `pattern` applied to the sorted dice
    ///
    /// `None` on the final roll, where no reroll is possible.
    #[must_use]
    pub fn keep_value(&self, state: &GameState, pattern: KeepPattern) -> Option<f64> {
        let next = state.rolls.after_reroll()?;
        let block = self.block(state.categories);
        let distribution = self.transitions.transitions(&state.dice, pattern);
        Some(distribution.expectation(block.level(next.index())))
    }

    /// Expected turn score before the opening roll
    #[must_use]
    pub fn opening_value(&self, categories: CategorySet) -> f64 {
        let block = self.block(categories);
        self.transitions
            .opening_roll()
            .expectation(block.level(RollsRemaining::MAX.index()))
    }

    #[must_use]
    pub fn is_solved(&self, categories: CategorySet) -> bool {
        self.table.contains(categories)
    }

    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.table.solved_count()
    }

    /// Freeze an imported block; false if the set was already solved
    pub fn install(&self, categories: CategorySet, block: SolvedBlock) -> bool {
        self.table.install(categories, block)
    }

    /// Solved blocks in ascending category-set order
    pub fn solved_blocks(&self) -> impl Iterator<Item = (CategorySet, &SolvedBlock)> {
        self.table.solved()
    }

    /// Run the three-level schedule for one category set
    #[must_use]
    pub fn solve_block(&self, categories: CategorySet) -> SolvedBlock {
        let mut block = SolvedBlock::empty();
        let SolvedBlock { values, actions } = &mut block;

        self.score_level(categories, &mut values[0], &mut actions[0]);
        for rolls in 1..NUM_LEVELS {
            let (frozen, open) = values.split_at_mut(rolls);
            self.reroll_level(&frozen[0], &frozen[rolls - 1], &mut open[0], &mut actions[rolls]);
        }

        block
    }

    /// Recompute a block's actions from externally supplied values
    ///
    /// Each level is derived from the supplied level below it, so the result's
    /// values can be compared against `values` to validate an import.
    #[must_use]
    pub fn rebuild_block(&self, categories: CategorySet, values: &LevelValues) -> SolvedBlock {
        let mut block = SolvedBlock::empty();
        let SolvedBlock {
            values: rebuilt,
            actions,
        } = &mut block;

        self.score_level(categories, &mut rebuilt[0], &mut actions[0]);
        for rolls in 1..NUM_LEVELS {
            self.reroll_level(
                &values[0],
                &values[rolls - 1],
                &mut rebuilt[rolls],
                &mut actions[rolls],
            );
        }

        block
    }

    fn score_level(
        &self,
        categories: CategorySet,
        values: &mut [f64; NUM_DICE_STATES],
        actions: &mut [BestAction; NUM_DICE_STATES],
    ) {
        for (rank, scores) in self.category_scores.iter().enumerate() {
            let mut best = None;
            for category in categories.iter() {
                let points = scores[category.index()];
                if best.is_none_or(|(_, top)| points > top) {
                    best = Some((category, points));
                }
            }

            (values[rank], actions[rank]) = match best {
                Some((category, points)) => (f64::from(points), BestAction::Score(category)),
                None => (0.0, BestAction::NoCategory),
            };
        }
    }

    fn reroll_level(
        &self,
        stop: &[f64; NUM_DICE_STATES],
        below: &[f64; NUM_DICE_STATES],
        values: &mut [f64; NUM_DICE_STATES],
        actions: &mut [BestAction; NUM_DICE_STATES],
    ) {
        // One expectation per kept multiset, shared by every state that can keep it
        let keep_values: Vec<f64> = self
            .transitions
            .distributions()
            .iter()
            .map(|distribution| distribution.expectation(below))
            .collect();

        for rank in 0..NUM_DICE_STATES {
            let mut best_value = stop[rank];
            let mut best_action = BestAction::Stop;

            // Keeping every die is the stop option above
            let rerolls = self.transitions.distinct_patterns(rank);
            for &pattern in rerolls.iter().filter(|p| p.rerolled_count() > 0) {
                let value = keep_values[self.transitions.keep_id(rank, pattern)];
                if value > best_value {
                    best_value = value;
                    best_action = BestAction::Keep(pattern);
                }
            }

            values[rank] = best_value;
            actions[rank] = best_action;
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;

    fn only(category: Category) -> CategorySet {
        CategorySet::EMPTY.with(category)
    }

    fn state(faces: [u8; 5], categories: CategorySet, rolls: u8) -> GameState {
        GameState::new(
            DiceState::from_faces(&faces).unwrap(),
            categories,
            RollsRemaining::new(rolls).unwrap(),
        )
    }

    #[test]
    fn five_sixes_score_yahtzee() {
        let solver = Solver::new();
        let entry = solver.evaluate(&state([6, 6, 6, 6, 6], only(Category::Yahtzee), 0));

        assert_eq!(entry.expected_value, 50.0);
        assert_eq!(entry.action, BestAction::Score(Category::Yahtzee));
    }

    #[test]
    fn five_threes_in_chance() {
        let solver = Solver::new();
        let entry = solver.evaluate(&state([3, 3, 3, 3, 3], only(Category::Chance), 0));
        assert_eq!(entry.expected_value, 15.0);
    }

    #[test]
    fn straight_in_sixes_scores_nothing() {
        let solver = Solver::new();
        let entry = solver.evaluate(&state([1, 2, 3, 4, 5], only(Category::Sixes), 0));

        assert_eq!(entry.expected_value, 0.0);
        assert_eq!(entry.action, BestAction::Score(Category::Sixes));
    }

    #[test]
    fn empty_category_set_is_worth_nothing() {
        let solver = Solver::new();
        for rolls in 0..=2 {
            let entry = solver.evaluate(&state([2, 3, 4, 5, 6], CategorySet::EMPTY, rolls));
            assert_eq!(entry.expected_value, 0.0);
        }
        let entry = solver.evaluate(&state([2, 3, 4, 5, 6], CategorySet::EMPTY, 0));
        assert_eq!(entry.action, BestAction::NoCategory);
    }

    #[test]
    fn final_roll_takes_highest_score() {
        let solver = Solver::new();
        let categories: CategorySet = [Category::Threes, Category::FullHouse, Category::Chance]
            .into_iter()
            .collect();
        let entry = solver.evaluate(&state([3, 3, 3, 5, 5], categories, 0));

        assert_eq!(entry.expected_value, 25.0);
        assert_eq!(entry.action, BestAction::Score(Category::FullHouse));
    }

    #[test]
    fn ties_go_to_first_category() {
        let solver = Solver::new();
        // 3 + 3 + 3 + 4 + 5 = 18 in both boxes
        let categories: CategorySet = [Category::ThreeOfAKind, Category::Chance]
            .into_iter()
            .collect();
        let entry = solver.evaluate(&state([3, 3, 3, 4, 5], categories, 0));
        assert_eq!(entry.expected_value, 18.0);
        assert_eq!(entry.action, BestAction::Score(Category::ThreeOfAKind));

        let categories: CategorySet = [Category::Fives, Category::Chance].into_iter().collect();
        let entry = solver.evaluate(&state([5, 5, 5, 5, 5], categories, 0));
        assert_eq!(entry.action, BestAction::Score(Category::Fives));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let solver = Solver::new();
        let probe = state([1, 1, 4, 5, 6], CategorySet::ALL.without(Category::Yahtzee), 2);

        let first = solver.expected_value(&probe);
        let second = solver.expected_value(&probe);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn rerolling_never_loses_value() {
        let solver = Solver::new();
        let categories: CategorySet = [Category::Sixes, Category::SmallStraight, Category::Yahtzee]
            .into_iter()
            .collect();
        let block = solver.block(categories);

        for rank in 0..NUM_DICE_STATES {
            assert!(block.level(1)[rank] >= block.level(0)[rank]);
            assert!(block.level(2)[rank] >= block.level(1)[rank]);
        }
    }

    #[test]
    fn chance_only_turn_matches_closed_form() {
        // Each die independently: keep 5 or 6 after the first roll, 4+ after the second
        let solver = Solver::new();
        let value = solver.opening_value(only(Category::Chance));
        assert!((value - 5.0 * 14.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn yahtzee_only_turn_probability() {
        let solver = Solver::new();
        let value = solver.opening_value(only(Category::Yahtzee));
        // P(five of a kind within three rolls) ≈ 0.046029
        assert!((value / 50.0 - 0.046_029).abs() < 1e-5);
    }

    #[test]
    fn strict_lookup_misses_until_solved() {
        let solver = Solver::new();
        let probe = state([2, 2, 2, 4, 6], only(Category::Twos), 1);

        assert_eq!(
            solver.lookup(&probe),
            Err(YahtzeeError::StateNotComputed(only(Category::Twos)))
        );
        let lazy = solver.evaluate(&probe);
        assert!(solver.is_solved(only(Category::Twos)));
        assert_eq!(solver.lookup(&probe), Ok(lazy));
    }

    #[test]
    fn reroll_recommends_keeping_the_triple() {
        let solver = Solver::new();
        let probe = state([2, 2, 2, 4, 6], only(Category::Twos), 1);
        let entry = solver.evaluate(&probe);

        // Sorted dice are [2, 2, 2, 4, 6]: keep positions 0..3
        let keep_triple = KeepPattern::from_flags([true, true, true, false, false]);
        assert_eq!(entry.action, BestAction::Keep(keep_triple));
        // 6 + 2 * (1/6) * 2
        assert!((entry.expected_value - (6.0 + 4.0 / 6.0)).abs() < 1e-12);
        assert_eq!(solver.keep_value(&probe, keep_triple), Some(entry.expected_value));
    }

    #[test]
    fn stop_is_preferred_when_nothing_improves() {
        let solver = Solver::new();
        let entry = solver.evaluate(&state([6, 6, 6, 6, 6], only(Category::Yahtzee), 2));

        assert_eq!(entry.expected_value, 50.0);
        assert_eq!(entry.action, BestAction::Stop);
    }

    #[test]
    fn keep_value_needs_a_reroll() {
        let solver = Solver::new();
        let probe = state([1, 2, 3, 4, 5], only(Category::Chance), 0);
        assert_eq!(solver.keep_value(&probe, KeepPattern::REROLL_ALL), None);
    }

    #[test]
    fn partial_precompute_covers_only_the_universe() {
        let solver = Solver::new();
        let universe: CategorySet = [Category::Ones, Category::Twos, Category::Chance]
            .into_iter()
            .collect();

        assert_eq!(solver.precompute(universe), 8);
        assert_eq!(solver.solved_count(), 8);
        assert!(solver.is_solved(CategorySet::EMPTY));
        assert!(solver.is_solved(universe));
        assert!(!solver.is_solved(only(Category::Yahtzee)));
    }

    #[test]
    fn cancelled_precompute_dispatches_nothing() {
        let solver = Solver::new();
        let cancel = AtomicBool::new(true);

        let visited = solver.precompute_with(CategorySet::ALL, &cancel, |_| {});
        assert_eq!(visited, 0);
        assert_eq!(solver.solved_count(), 0);
    }

    #[test]
    fn cancel_mid_run_keeps_finished_blocks_valid() {
        let solver = Solver::new();
        let universe = category_subsets(CategorySet::ALL)
            .find(|c| c.len() == 10)
            .unwrap();
        let total = 1 << universe.len();
        let cancel = AtomicBool::new(false);

        let visited = solver.precompute_with(universe, &cancel, |_| {
            cancel.store(true, Ordering::Relaxed);
        });

        let solved = solver.solved_count();
        assert!(solved > 0);
        assert!(solved < total);
        assert_eq!(visited, solved);
        for (categories, block) in solver.solved_blocks() {
            assert!(categories.is_subset_of(universe));
            assert_eq!(*block, solver.solve_block(categories));
        }
    }

    #[test]
    fn keeping_every_die_is_never_a_reroll() {
        let solver = Solver::new();
        let categories: CategorySet = [Category::Yahtzee, Category::Chance].into_iter().collect();
        let block = solver.block(categories);

        for rolls in 1..NUM_LEVELS {
            for rank in 0..NUM_DICE_STATES {
                let action = block.entry(rolls, rank).action;
                assert_ne!(action, BestAction::Keep(KeepPattern::KEEP_ALL));
            }
        }
    }

    #[test]
    fn batch_and_lazy_solves_agree() {
        let universe: CategorySet = [Category::Fours, Category::FourOfAKind]
            .into_iter()
            .collect();

        let batch = Solver::new();
        batch.precompute(universe);
        let lazy = Solver::new();

        for categories in category_subsets(universe) {
            assert_eq!(batch.block(categories), lazy.block(categories));
        }
    }

    #[test]
    fn rebuild_reproduces_solved_block() {
        let solver = Solver::new();
        let categories: CategorySet = [Category::Fives, Category::LargeStraight]
            .into_iter()
            .collect();

        let solved = solver.solve_block(categories);
        let rebuilt = solver.rebuild_block(categories, solved.values());
        assert_eq!(rebuilt, solved);
    }
}
