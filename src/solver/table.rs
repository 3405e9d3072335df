//! Expected-value and best-action tables
//!
//! A turn's value depends only on its own open categories, so the table is a
//! dense array of independent blocks, one per category set, indexed by the
//! set's bitmask. Each block is written once (lazily or by a batch worker)
//! and frozen from then on.

use crate::core::{Category, CategorySet, KeepPattern, NUM_CATEGORY_SETS, NUM_DICE_STATES};
use std::sync::OnceLock;

/// Number of rolls-remaining levels per block (0, 1, 2)
pub const NUM_LEVELS: usize = 3;

/// Per-level, per-state values: `[rolls][dice rank]`
pub type LevelValues = [[f64; NUM_DICE_STATES]; NUM_LEVELS];

/// The optimal action recorded for a solved state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BestAction {
    /// Final roll with every category already used
    NoCategory,
    /// Final roll: score the dice in this category
    Score(Category),
    /// Rerolls remain but the dice are best left as they are
    Stop,
    /// Keep these positions of the sorted canonical dice and reroll the rest
    Keep(KeepPattern),
}

impl BestAction {
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Score(category) => Some(category),
            _ => None,
        }
    }

    #[must_use]
    pub const fn keep(self) -> Option<KeepPattern> {
        match self {
            Self::Keep(pattern) => Some(pattern),
            _ => None,
        }
    }
}

/// A looked-up table entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub expected_value: f64,
    pub action: BestAction,
}

/// All solved entries for one category set
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedBlock {
    pub(crate) values: LevelValues,
    pub(crate) actions: [[BestAction; NUM_DICE_STATES]; NUM_LEVELS],
}

impl SolvedBlock {
    pub(crate) const fn empty() -> Self {
        Self {
            values: [[0.0; NUM_DICE_STATES]; NUM_LEVELS],
            actions: [[BestAction::NoCategory; NUM_DICE_STATES]; NUM_LEVELS],
        }
    }

    #[inline]
    #[must_use]
    pub fn entry(&self, rolls: usize, rank: usize) -> Entry {
        Entry {
            expected_value: self.values[rolls][rank],
            action: self.actions[rolls][rank],
        }
    }

    /// Values of every dice state at one rolls-remaining level
    #[must_use]
    pub const fn level(&self, rolls: usize) -> &[f64; NUM_DICE_STATES] {
        &self.values[rolls]
    }

    #[must_use]
    pub const fn values(&self) -> &LevelValues {
        &self.values
    }
}

/// ExpectedValueTable and BestActionTable, stored together
///
/// Cells are set at most once. Lazy lookups and batch workers share the same
/// cell, so a block is never computed twice and never rewritten.
#[derive(Debug)]
pub struct PolicyTable {
    blocks: Vec<OnceLock<Box<SolvedBlock>>>,
}

impl PolicyTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: (0..NUM_CATEGORY_SETS).map(|_| OnceLock::new()).collect(),
        }
    }

    /// The frozen block for `categories`, if it has been solved
    #[must_use]
    pub fn get(&self, categories: CategorySet) -> Option<&SolvedBlock> {
        self.blocks[categories.rank()].get().map(AsRef::as_ref)
    }

    /// The block for `categories`, running `solve` first if it is missing
    pub fn get_or_solve(
        &self,
        categories: CategorySet,
        solve: impl FnOnce() -> SolvedBlock,
    ) -> &SolvedBlock {
        self.blocks[categories.rank()].get_or_init(|| Box::new(solve()))
    }

    /// Store an externally built block; false if the cell was already frozen
    pub fn install(&self, categories: CategorySet, block: SolvedBlock) -> bool {
        self.blocks[categories.rank()].set(Box::new(block)).is_ok()
    }

    #[must_use]
    pub fn contains(&self, categories: CategorySet) -> bool {
        self.blocks[categories.rank()].get().is_some()
    }

    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.blocks.iter().filter(|cell| cell.get().is_some()).count()
    }

    /// Solved blocks in ascending category-set order
    pub fn solved(&self) -> impl Iterator<Item = (CategorySet, &SolvedBlock)> {
        self.blocks.iter().enumerate().filter_map(|(rank, cell)| {
            let block = cell.get()?;
            let categories = CategorySet::from_bits(u16::try_from(rank).ok()?)?;
            Some((categories, block.as_ref()))
        })
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::new()
    }
}
