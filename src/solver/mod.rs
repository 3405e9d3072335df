//! Optimal-play solver
//!
//! State enumeration, reroll transitions, backward induction over the policy
//! table, and the query and strategy layers built on top of it.

pub mod advisor;
mod engine;
pub mod enumerate;
pub mod strategy;
pub mod table;
pub mod transitions;

pub use advisor::{KeepOption, MoveAdvisor, Suggestion};
pub use engine::Solver;
pub use strategy::{OptimalStrategy, RandomStrategy, Strategy, StrategyType};
pub use table::{BestAction, Entry, LevelValues, PolicyTable, SolvedBlock};
pub use transitions::{Distribution, TransitionModel};
