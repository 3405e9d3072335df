//! Core domain types for Yahtzee
//!
//! This module contains the fundamental domain types with zero external dependencies
//! beyond error derivation. Everything here is pure and permutation-aware: ordered
//! `Dice` exist only at the boundary, the rest works on canonical `DiceState`s.

mod category;
mod dice;
mod error;
mod scoring;
mod state;

pub use category::{Category, CategorySet, NUM_CATEGORIES, NUM_CATEGORY_SETS};
pub use dice::{Dice, DiceState, FaceCounts, NUM_DICE, NUM_DICE_STATES, NUM_FACES};
pub use error::{DiceError, YahtzeeError};
pub use scoring::{
    FULL_HOUSE_SCORE, LARGE_STRAIGHT_SCORE, SMALL_STRAIGHT_SCORE, YAHTZEE_SCORE, score,
    score_all, score_counts, score_state,
};
pub use state::{GameState, KeepPattern, RollsRemaining};
