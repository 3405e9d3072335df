//! Yahtzee scoring rules
//!
//! Every rule reads only face counts, so scores are invariant under any
//! permutation of the dice and the solver can score canonical states directly.

use super::{Category, Dice, DiceState, FaceCounts, NUM_CATEGORIES};

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YAHTZEE_SCORE: u32 = 50;

/// Score an ordered roll in `category`
///
/// # Examples
/// ```
/// use yahtzee_solver::core::{Category, Dice, score};
///
/// let dice = Dice::new(&[2, 3, 2, 3, 3]).unwrap();
/// assert_eq!(score(Category::FullHouse, &dice), 25);
/// assert_eq!(score(Category::Threes, &dice), 9);
/// assert_eq!(score(Category::Yahtzee, &dice), 0);
/// ```
#[must_use]
pub fn score(category: Category, dice: &Dice) -> u32 {
    score_counts(category, &dice.counts())
}

/// Score a canonical state in `category`
#[must_use]
pub fn score_state(category: Category, state: &DiceState) -> u32 {
    score_counts(category, state.counts())
}

/// Score every category at once, indexed by `Category::index`
#[must_use]
pub fn score_all(state: &DiceState) -> [u32; NUM_CATEGORIES] {
    Category::ALL.map(|category| score_state(category, state))
}

/// Score face counts in `category`
#[must_use]
pub fn score_counts(category: Category, counts: &FaceCounts) -> u32 {
    let total = sum(counts);

    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.index() + 1;
            face as u32 * u32::from(counts[face - 1])
        }
        Category::ThreeOfAKind => of_a_kind(counts, 3, total),
        Category::FourOfAKind => of_a_kind(counts, 4, total),
        Category::FullHouse => {
            let triple = counts.iter().any(|&c| c == 3);
            let pair = counts.iter().any(|&c| c == 2);
            if triple && pair { FULL_HOUSE_SCORE } else { 0 }
        }
        Category::SmallStraight => {
            if has_run(counts, 4) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if has_run(counts, 5) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if counts.contains(&5) {
                YAHTZEE_SCORE
            } else {
                0
            }
        }
        Category::Chance => total,
    }
}

fn sum(counts: &FaceCounts) -> u32 {
    counts
        .iter()
        .enumerate()
        .map(|(i, &c)| (i as u32 + 1) * u32::from(c))
        .sum()
}

fn of_a_kind(counts: &FaceCounts, n: u8, total: u32) -> u32 {
    if counts.iter().any(|&c| c >= n) {
        total
    } else {
        0
    }
}

/// True if `length` consecutive faces are all present
///
/// With five dice a run of five leaves no room for a duplicate, so the large
/// straight check rejects repeated faces automatically.
fn has_run(counts: &FaceCounts, length: usize) -> bool {
    counts
        .windows(length)
        .any(|window| window.iter().all(|&c| c > 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(faces: [u8; 5]) -> Dice {
        Dice::new(&faces).unwrap()
    }

    #[test]
    fn upper_section_sums_matching_faces() {
        assert_eq!(score(Category::Ones, &dice([1, 1, 1, 1, 1])), 5);
        assert_eq!(score(Category::Sixes, &dice([6, 6, 6, 6, 6])), 30);
        assert_eq!(score(Category::Threes, &dice([3, 3, 4, 5, 6])), 6);
        assert_eq!(score(Category::Sixes, &dice([1, 2, 3, 4, 5])), 0);
    }

    #[test]
    fn of_a_kind_scores_total() {
        assert_eq!(score(Category::ThreeOfAKind, &dice([2, 2, 2, 4, 5])), 15);
        assert_eq!(score(Category::ThreeOfAKind, &dice([2, 2, 2, 2, 2])), 10);
        assert_eq!(score(Category::ThreeOfAKind, &dice([1, 2, 3, 4, 5])), 0);
        assert_eq!(score(Category::FourOfAKind, &dice([4, 4, 4, 4, 2])), 18);
        assert_eq!(score(Category::FourOfAKind, &dice([4, 4, 4, 2, 2])), 0);
    }

    #[test]
    fn full_house_needs_exact_three_two_split() {
        assert_eq!(score(Category::FullHouse, &dice([2, 2, 3, 3, 3])), 25);
        assert_eq!(score(Category::FullHouse, &dice([2, 2, 2, 2, 3])), 0);
        assert_eq!(score(Category::FullHouse, &dice([1, 2, 3, 4, 5])), 0);
        assert_eq!(score(Category::FullHouse, &dice([5, 5, 5, 5, 5])), 0);
    }

    #[test]
    fn small_straight_tolerates_duplicates() {
        assert_eq!(score(Category::SmallStraight, &dice([1, 1, 2, 3, 4])), 30);
        assert_eq!(score(Category::SmallStraight, &dice([6, 4, 3, 5, 1])), 30);
        assert_eq!(score(Category::SmallStraight, &dice([2, 3, 4, 5, 6])), 30);
        assert_eq!(score(Category::SmallStraight, &dice([1, 2, 3, 5, 6])), 0);
    }

    #[test]
    fn large_straight_rejects_duplicates() {
        assert_eq!(score(Category::LargeStraight, &dice([1, 2, 3, 4, 5])), 40);
        assert_eq!(score(Category::LargeStraight, &dice([6, 5, 4, 3, 2])), 40);
        assert_eq!(score(Category::LargeStraight, &dice([1, 1, 2, 3, 4])), 0);
        assert_eq!(score(Category::LargeStraight, &dice([1, 2, 3, 4, 6])), 0);
    }

    #[test]
    fn yahtzee_and_chance() {
        assert_eq!(score(Category::Yahtzee, &dice([6, 6, 6, 6, 6])), 50);
        assert_eq!(score(Category::Yahtzee, &dice([6, 6, 6, 6, 1])), 0);
        assert_eq!(score(Category::Chance, &dice([3, 3, 3, 3, 3])), 15);
        assert_eq!(score(Category::Chance, &dice([1, 2, 3, 4, 6])), 16);
    }

    fn permutations(faces: &[u8]) -> Vec<Vec<u8>> {
        if faces.len() <= 1 {
            return vec![faces.to_vec()];
        }
        let mut result = Vec::new();
        for i in 0..faces.len() {
            let mut rest = faces.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                result.push(tail);
            }
        }
        result
    }

    #[test]
    fn scores_are_permutation_invariant() {
        for base in [[2u8, 2, 3, 5, 3], [1, 2, 3, 4, 5], [6, 6, 6, 1, 6]] {
            let reference = score_all(&dice(base).state());
            let perms = permutations(&base);
            assert_eq!(perms.len(), 120);

            for perm in perms {
                let rolled = Dice::new(&perm).unwrap();
                for category in Category::ALL {
                    assert_eq!(score(category, &rolled), reference[category.index()]);
                }
            }
        }
    }

    #[test]
    fn score_all_matches_individual_scores() {
        let state = dice([1, 3, 4, 5, 6]).state();
        let all = score_all(&state);
        for category in Category::ALL {
            assert_eq!(all[category.index()], score_state(category, &state));
        }
        assert_eq!(all[Category::SmallStraight.index()], 30);
    }
}
