//! Error types shared by the domain and solver layers

use super::{Category, CategorySet};
use thiserror::Error;

/// Why a dice configuration was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("expected exactly 5 dice, got {0}")]
    Count(usize),
    #[error("die face {0} is outside 1..=6")]
    Face(u8),
    #[error("die position {0} is outside 0..5")]
    Position(usize),
}

/// Errors surfaced at the library boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YahtzeeError {
    #[error("invalid dice: {0}")]
    InvalidDice(#[from] DiceError),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("category '{0}' has already been used")]
    CategoryAlreadyUsed(Category),

    #[error("rolls remaining must be 0, 1 or 2, got {0}")]
    InvalidRollsRemaining(u8),

    /// Strict lookup miss. The advisor recovers from this by solving on demand.
    #[error("no solved entries for category set {{{0}}}")]
    StateNotComputed(CategorySet),
}
