use super::{RECORDS_PER_BLOCK, StorageError, TableRecord};
use crate::core::{Category, CategorySet, Dice, NUM_DICE_STATES, RollsRemaining, YahtzeeError};
use crate::solver::table::{LevelValues, NUM_LEVELS};
use crate::solver::{Solver, SolvedBlock};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Largest accepted relative gap between a stored and a recomputed value
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// What an import added to the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub records: usize,
    pub blocks: usize,
    /// Blocks that were not already solved
    pub installed: usize,
}

struct PendingBlock {
    values: Box<LevelValues>,
    seen: Box<[[bool; NUM_DICE_STATES]; NUM_LEVELS]>,
    found: usize,
}

impl PendingBlock {
    fn new() -> Self {
        Self {
            values: Box::new([[0.0; NUM_DICE_STATES]; NUM_LEVELS]),
            seen: Box::new([[false; NUM_DICE_STATES]; NUM_LEVELS]),
            found: 0,
        }
    }
}

/// Read a table dump and freeze its blocks into `solver`
///
/// The whole input is validated before anything is installed: every record
/// must parse, every category set must be complete, and every stored value
/// must agree with the value recomputed from the level below it.
///
/// # Errors
/// Returns the first `StorageError` found; the solver is left untouched.
pub fn read_table<R: BufRead>(solver: &Solver, source: R) -> Result<LoadSummary, StorageError> {
    let mut pending: FxHashMap<CategorySet, PendingBlock> = FxHashMap::default();
    let mut records = 0;

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let TableRecord(faces, names, rolls, expected_value) =
            serde_json::from_str::<TableRecord>(&line).map_err(|source| StorageError::Json {
                line: line_no,
                source,
            })?;

        let record_error = |source: YahtzeeError| StorageError::Record {
            line: line_no,
            source,
        };
        let dice = Dice::new(&faces).map_err(|e| record_error(e.into()))?;
        let rolls = RollsRemaining::new(rolls).map_err(record_error)?;
        let categories = parse_categories(&names, line_no)?;

        if !expected_value.is_finite() || expected_value < 0.0 {
            return Err(StorageError::Malformed {
                line: line_no,
                reason: format!("expected value {expected_value} is not finite and non-negative"),
            });
        }

        let block = pending.entry(categories).or_insert_with(PendingBlock::new);
        let (level, rank) = (rolls.index(), dice.state().rank());
        if block.seen[level][rank] {
            return Err(StorageError::Malformed {
                line: line_no,
                reason: format!("duplicate record for {dice} with {rolls} rolls left"),
            });
        }
        block.seen[level][rank] = true;
        block.values[level][rank] = expected_value;
        block.found += 1;
        records += 1;
    }

    let mut pending: Vec<(CategorySet, PendingBlock)> = pending.into_iter().collect();
    pending.sort_unstable_by_key(|(categories, _)| *categories);

    let verified = pending
        .par_iter()
        .map(|(categories, block)| verify_block(solver, *categories, block))
        .collect::<Result<Vec<_>, _>>()?;

    let blocks = verified.len();
    let mut installed = 0;
    for (categories, block) in verified {
        if solver.install(categories, block) {
            installed += 1;
        }
    }

    Ok(LoadSummary {
        records,
        blocks,
        installed,
    })
}

/// Open `path` and import it with [`read_table`]
///
/// # Errors
/// `Io` if the file cannot be opened, otherwise as [`read_table`].
pub fn load_table(solver: &Solver, path: impl AsRef<Path>) -> Result<LoadSummary, StorageError> {
    read_table(solver, BufReader::new(File::open(path)?))
}

fn parse_categories(names: &[String], line: usize) -> Result<CategorySet, StorageError> {
    let mut categories = CategorySet::EMPTY;
    for name in names {
        let category: Category = name
            .parse()
            .map_err(|source| StorageError::Record { line, source })?;
        if categories.contains(category) {
            return Err(StorageError::Malformed {
                line,
                reason: format!("category '{category}' listed twice"),
            });
        }
        categories = categories.with(category);
    }
    Ok(categories)
}

fn verify_block(
    solver: &Solver,
    categories: CategorySet,
    pending: &PendingBlock,
) -> Result<(CategorySet, SolvedBlock), StorageError> {
    if pending.found != RECORDS_PER_BLOCK {
        return Err(StorageError::Incomplete {
            categories,
            found: pending.found,
        });
    }

    let rebuilt = solver.rebuild_block(categories, &pending.values);
    for rolls in 0..NUM_LEVELS {
        let recomputed = rebuilt.level(rolls);
        let stored_level = pending.values[rolls].iter().zip(recomputed);
        for (rank, (&stored, &expected)) in stored_level.enumerate() {
            let scale = stored.abs().max(expected.abs()).max(1.0);
            if (stored - expected).abs() > RELATIVE_TOLERANCE * scale {
                return Err(StorageError::Mismatch {
                    categories,
                    rolls: rolls as u8,
                    dice: solver.states()[rank],
                });
            }
        }
    }

    Ok((categories, rebuilt))
}
