//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod solve;
pub mod suggest;

pub use analyze::{AnalysisResult, analyze_roll};
pub use benchmark::{BenchmarkConfig, BenchmarkResult, run_benchmark};
pub use solve::{SolveConfig, SolveResult, run_solve};
pub use suggest::{SuggestConfig, SuggestResult, run_suggest};
