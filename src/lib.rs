//! Yahtzee Solver
//!
//! Optimal single-turn Yahtzee play by exact backward induction over
//! (dice, open categories, rolls remaining).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use yahtzee_solver::core::CategorySet;
//! use yahtzee_solver::solver::{MoveAdvisor, Solver};
//!
//! let solver = Solver::new();
//! let advisor = MoveAdvisor::new(&solver);
//!
//! // Opening roll, every category open, two rerolls left
//! let suggestion = advisor.suggest(&[2, 5, 5, 1, 5], CategorySet::ALL, 2).unwrap();
//! println!("keep {:?}, expected {:.2}", suggestion.keep, suggestion.expected_value);
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Solitaire games and scorecards
pub mod game;

// Table dump and import
pub mod storage;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
