//! Table precomputation command
//!
//! Solves every subset of a working category set up front and optionally
//! dumps the resulting table.

use crate::core::CategorySet;
use crate::output::formatters::progress_style;
use crate::solver::Solver;
use crate::storage::{StorageError, save_table};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

/// Configuration for a batch solve
pub struct SolveConfig {
    pub categories: CategorySet,
    pub output: Option<PathBuf>,
    pub show_progress: bool,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            output: None,
            show_progress: true,
        }
    }
}

/// Result of a batch solve
pub struct SolveResult {
    pub categories: CategorySet,
    /// Category sets visited in this run
    pub blocks: usize,
    /// Category sets solved in the whole table afterwards
    pub solved_total: usize,
    pub duration: Duration,
    /// Expected score of a fresh turn with every working category open
    pub opening_value: f64,
    pub records_written: Option<usize>,
}

/// Precompute every subset of the configured category set
///
/// # Errors
///
/// Returns an error if the table dump cannot be written.
pub fn run_solve(config: &SolveConfig, solver: &Solver) -> Result<SolveResult, StorageError> {
    let total = 1u64 << config.categories.len();
    let pb = if config.show_progress {
        ProgressBar::new(total)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(progress_style());
    pb.set_message(format!("solving {{{}}}", config.categories));

    let start = Instant::now();
    let cancel = AtomicBool::new(false);
    let blocks = solver.precompute_with(config.categories, &cancel, |_| pb.inc(1));
    let duration = start.elapsed();
    pb.finish_with_message("Complete!");

    let records_written = config
        .output
        .as_ref()
        .map(|path| save_table(solver, path))
        .transpose()?;

    Ok(SolveResult {
        categories: config.categories,
        blocks,
        solved_total: solver.solved_count(),
        duration,
        opening_value: solver.opening_value(config.categories),
        records_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;

    fn quiet(categories: CategorySet) -> SolveConfig {
        SolveConfig {
            show_progress: false,
            ..SolveConfig::new(categories)
        }
    }

    #[test]
    fn solve_visits_every_subset() {
        let solver = Solver::new();
        let categories: CategorySet = [Category::Ones, Category::Yahtzee].into_iter().collect();

        let result = run_solve(&quiet(categories), &solver).unwrap();

        assert_eq!(result.blocks, 4);
        assert_eq!(result.solved_total, 4);
        assert!(result.opening_value > 0.0);
        assert_eq!(result.records_written, None);
    }

    #[test]
    fn solve_reports_opening_value() {
        let solver = Solver::new();
        let chance = CategorySet::EMPTY.with(Category::Chance);

        let result = run_solve(&quiet(chance), &solver).unwrap();
        assert!((result.opening_value - 70.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn solve_writes_table_dump() {
        let solver = Solver::new();
        let path = std::env::temp_dir().join(format!(
            "yahtzee_solver_dump_{}.jsonl",
            std::process::id()
        ));
        let config = SolveConfig {
            output: Some(path.clone()),
            ..quiet(CategorySet::EMPTY.with(Category::Twos))
        };

        let result = run_solve(&config, &solver).unwrap();
        let _ = std::fs::remove_file(&path);

        // Empty set and {twos}
        assert_eq!(result.records_written, Some(2 * crate::storage::RECORDS_PER_BLOCK));
    }
}
