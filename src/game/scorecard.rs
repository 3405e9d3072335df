//! Solitaire scorecard with bonus accounting
//!
//! The solver ignores both bonuses when choosing moves; they are applied
//! here, when a card is totalled.

use crate::core::{Category, CategorySet, Dice, NUM_CATEGORIES, YAHTZEE_SCORE, YahtzeeError, score};
use std::fmt;

/// Upper-section total needed for the upper bonus
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;
/// Awarded for each extra Yahtzee once the Yahtzee box holds 50
pub const YAHTZEE_BONUS: u32 = 100;

/// Thirteen boxes plus the extra-Yahtzee tally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    boxes: [Option<u32>; NUM_CATEGORIES],
    yahtzee_bonuses: u32,
}

impl Scorecard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `dice` in `category` and record it
    ///
    /// A Yahtzee filed anywhere while the Yahtzee box already holds 50 earns a
    /// Yahtzee bonus.
    ///
    /// # Errors
    /// Returns `CategoryAlreadyUsed` if the box is filled.
    pub fn fill(&mut self, category: Category, dice: &Dice) -> Result<u32, YahtzeeError> {
        let slot = &mut self.boxes[category.index()];
        if slot.is_some() {
            return Err(YahtzeeError::CategoryAlreadyUsed(category));
        }

        let points = score(category, dice);
        *slot = Some(points);

        let rolled_yahtzee = score(Category::Yahtzee, dice) == YAHTZEE_SCORE;
        if rolled_yahtzee
            && category != Category::Yahtzee
            && self.boxes[Category::Yahtzee.index()] == Some(YAHTZEE_SCORE)
        {
            self.yahtzee_bonuses += 1;
        }

        Ok(points)
    }

    #[must_use]
    pub const fn get(&self, category: Category) -> Option<u32> {
        self.boxes[category.index()]
    }

    /// Categories still open
    #[must_use]
    pub fn available(&self) -> CategorySet {
        Category::ALL
            .into_iter()
            .filter(|c| self.boxes[c.index()].is_none())
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.boxes.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn upper_total(&self) -> u32 {
        self.section_total(true)
    }

    #[must_use]
    pub fn upper_bonus(&self) -> u32 {
        if self.upper_total() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    #[must_use]
    pub fn lower_total(&self) -> u32 {
        self.section_total(false)
    }

    #[must_use]
    pub const fn yahtzee_bonuses(&self) -> u32 {
        self.yahtzee_bonuses
    }

    #[must_use]
    pub const fn yahtzee_bonus(&self) -> u32 {
        self.yahtzee_bonuses * YAHTZEE_BONUS
    }

    /// Sum of all boxes plus both bonuses
    #[must_use]
    pub fn total(&self) -> u32 {
        self.upper_total() + self.upper_bonus() + self.lower_total() + self.yahtzee_bonus()
    }

    fn section_total(&self, upper: bool) -> u32 {
        Category::ALL
            .into_iter()
            .filter(|c| c.is_upper() == upper)
            .filter_map(|c| self.boxes[c.index()])
            .sum()
    }
}

impl fmt::Display for Scorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::ALL {
            match self.get(category) {
                Some(points) => writeln!(f, "{:<16}{points:>4}", category.label())?,
                None => writeln!(f, "{:<16}{:>4}", category.label(), "-")?,
            }
            if category == Category::Sixes {
                writeln!(f, "{:<16}{:>4}", "Upper bonus", self.upper_bonus())?;
            }
        }
        writeln!(f, "{:<16}{:>4}", "Yahtzee bonus", self.yahtzee_bonus())?;
        write!(f, "{:<16}{:>4}", "Total", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(faces: [u8; 5]) -> Dice {
        Dice::new(&faces).unwrap()
    }

    #[test]
    fn new_card_is_open() {
        let card = Scorecard::new();
        assert_eq!(card.available(), CategorySet::ALL);
        assert!(!card.is_complete());
        assert_eq!(card.total(), 0);
    }

    #[test]
    fn filling_records_score_and_closes_box() {
        let mut card = Scorecard::new();
        assert_eq!(card.fill(Category::FullHouse, &dice([2, 2, 3, 3, 3])), Ok(25));
        assert_eq!(card.get(Category::FullHouse), Some(25));
        assert!(!card.available().contains(Category::FullHouse));
        assert_eq!(card.available().len(), 12);
    }

    #[test]
    fn filled_box_is_rejected() {
        let mut card = Scorecard::new();
        card.fill(Category::Chance, &dice([1, 1, 1, 1, 2])).unwrap();
        assert_eq!(
            card.fill(Category::Chance, &dice([6, 6, 6, 6, 6])),
            Err(YahtzeeError::CategoryAlreadyUsed(Category::Chance))
        );
        assert_eq!(card.get(Category::Chance), Some(6));
    }

    #[test]
    fn zero_scores_still_use_the_box() {
        let mut card = Scorecard::new();
        assert_eq!(card.fill(Category::Yahtzee, &dice([1, 2, 3, 4, 6])), Ok(0));
        assert!(!card.available().contains(Category::Yahtzee));
    }

    #[test]
    fn upper_bonus_at_threshold() {
        let mut card = Scorecard::new();
        // Three of each face: 3 + 6 + 9 + 12 + 15 + 18 = 63
        for face in 1..=6u8 {
            let category = Category::from_index(usize::from(face - 1)).unwrap();
            card.fill(category, &dice([face, face, face, 7 - face, 7 - face]))
                .unwrap();
        }
        assert!(card.upper_total() >= UPPER_BONUS_THRESHOLD);
        assert_eq!(card.upper_bonus(), UPPER_BONUS);
        assert_eq!(card.total(), card.upper_total() + UPPER_BONUS);
    }

    #[test]
    fn no_upper_bonus_below_threshold() {
        let mut card = Scorecard::new();
        card.fill(Category::Sixes, &dice([6, 6, 6, 6, 6])).unwrap();
        assert_eq!(card.upper_total(), 30);
        assert_eq!(card.upper_bonus(), 0);
    }

    #[test]
    fn extra_yahtzees_earn_bonus_after_fifty() {
        let mut card = Scorecard::new();
        card.fill(Category::Yahtzee, &dice([4, 4, 4, 4, 4])).unwrap();
        card.fill(Category::Fours, &dice([4, 4, 4, 4, 4])).unwrap();
        card.fill(Category::Chance, &dice([2, 2, 2, 2, 2])).unwrap();

        assert_eq!(card.yahtzee_bonuses(), 2);
        assert_eq!(card.lower_total(), 60);
        assert_eq!(card.total(), 20 + 60 + 2 * YAHTZEE_BONUS);
    }

    #[test]
    fn scratched_yahtzee_earns_no_bonus() {
        let mut card = Scorecard::new();
        card.fill(Category::Yahtzee, &dice([1, 2, 3, 4, 5])).unwrap();
        card.fill(Category::Sixes, &dice([6, 6, 6, 6, 6])).unwrap();
        assert_eq!(card.yahtzee_bonuses(), 0);
    }

    #[test]
    fn complete_after_thirteen_boxes() {
        let mut card = Scorecard::new();
        for category in Category::ALL {
            card.fill(category, &dice([1, 2, 3, 4, 5])).unwrap();
        }
        assert!(card.is_complete());
        assert!(card.available().is_empty());
        // Ones..Fives = 15, small 30, large 40, chance 15
        assert_eq!(card.total(), 15 + 30 + 40 + 15);
    }
}
