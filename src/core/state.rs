//! Turn state: rolls remaining, keep patterns, and the solver key

use super::{CategorySet, DiceError, DiceState, NUM_DICE, YahtzeeError};
use std::fmt;

/// Rerolls still available this turn
///
/// 2 right after the opening roll, 0 once the player must score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RollsRemaining(u8);

impl RollsRemaining {
    pub const NONE: Self = Self(0);
    pub const MAX: Self = Self(2);

    /// All levels in solve order (0 first)
    pub const LEVELS: [Self; 3] = [Self(0), Self(1), Self(2)];

    /// # Errors
    /// Returns `InvalidRollsRemaining` for values above 2.
    pub fn new(rolls: u8) -> Result<Self, YahtzeeError> {
        if rolls <= Self::MAX.0 {
            Ok(Self(rolls))
        } else {
            Err(YahtzeeError::InvalidRollsRemaining(rolls))
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_final(self) -> bool {
        self.0 == 0
    }

    /// The level a reroll leads to, `None` on the final roll
    #[must_use]
    pub const fn after_reroll(self) -> Option<Self> {
        if self.0 == 0 {
            None
        } else {
            Some(Self(self.0 - 1))
        }
    }
}

impl fmt::Display for RollsRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which dice positions are held on a reroll (bit `i` keeps position `i`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeepPattern(u8);

impl KeepPattern {
    /// Number of distinct patterns over five positions
    pub const COUNT: usize = 1 << NUM_DICE;

    pub const REROLL_ALL: Self = Self(0);
    pub const KEEP_ALL: Self = Self((1 << NUM_DICE) - 1);

    /// # Panics
    /// Panics in debug mode if bits beyond the five positions are set
    #[inline]
    #[must_use]
    pub const fn new(mask: u8) -> Self {
        debug_assert!(mask < (1 << NUM_DICE), "keep mask must be < 32");
        Self(mask)
    }

    #[must_use]
    pub fn from_flags(flags: [bool; NUM_DICE]) -> Self {
        Self(
            flags
                .iter()
                .enumerate()
                .filter(|&(_, &keep)| keep)
                .fold(0, |mask, (i, _)| mask | (1 << i)),
        )
    }

    /// Build a pattern from kept positions
    ///
    /// # Errors
    /// Returns `InvalidDice` if a position is outside 0..5.
    pub fn from_positions(positions: &[usize]) -> Result<Self, YahtzeeError> {
        positions.iter().try_fold(Self::REROLL_ALL, |pattern, &i| {
            if i < NUM_DICE {
                Ok(Self(pattern.0 | (1 << i)))
            } else {
                Err(DiceError::Position(i).into())
            }
        })
    }

    /// Every pattern in ascending mask order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn keeps(self, position: usize) -> bool {
        self.0 & (1 << position) != 0
    }

    #[must_use]
    pub const fn kept_count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn rerolled_count(self) -> usize {
        NUM_DICE - self.kept_count()
    }

    /// Kept positions in ascending order
    pub fn positions(self) -> impl Iterator<Item = usize> {
        (0..NUM_DICE).filter(move |&i| self.keeps(i))
    }
}

/// The solver's key: canonical dice, open categories, and rolls remaining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub dice: DiceState,
    pub categories: CategorySet,
    pub rolls: RollsRemaining,
}

impl GameState {
    #[must_use]
    pub const fn new(dice: DiceState, categories: CategorySet, rolls: RollsRemaining) -> Self {
        Self {
            dice,
            categories,
            rolls,
        }
    }

    /// Same dice and categories with no rerolls left
    #[must_use]
    pub const fn at_final_roll(self) -> Self {
        Self {
            rolls: RollsRemaining::NONE,
            ..self
        }
    }
}
