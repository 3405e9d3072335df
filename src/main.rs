//! Yahtzee Solver - CLI
//!
//! Exact single-turn Yahtzee advice by backward induction over every
//! combination of dice, open categories and rolls remaining.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use yahtzee_solver::{
    commands::{
        BenchmarkConfig, SolveConfig, SuggestConfig, analyze_roll, run_benchmark, run_solve,
        run_suggest,
    },
    core::CategorySet,
    output::{
        print_analysis_result, print_benchmark_result, print_load_summary, print_solve_result,
        print_suggestion,
    },
    solver::{Solver, StrategyType},
    storage::load_table,
};

#[derive(Parser)]
#[command(
    name = "yahtzee_solver",
    about = "Optimal Yahtzee turn solver using backward induction",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Strategy for benchmark games: optimal (default), random
    #[arg(short, long, global = true, default_value = "optimal")]
    strategy: String,

    /// Previously dumped table to load before running the command
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Precompute every subset of a category set
    Solve {
        /// Comma separated category names, or 'all'
        #[arg(short, long, default_value = "all")]
        categories: String,

        /// Write the solved table as newline-delimited JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recommend the best action for a roll
    Suggest {
        /// Five dice, e.g. 1,2,3,4,5
        #[arg(short, long, value_delimiter = ',', num_args = 1.., required = true)]
        dice: Vec<u8>,

        /// Open categories, comma separated, or 'all'
        #[arg(short, long, default_value = "all")]
        categories: String,

        /// Rerolls still available this turn (0-2)
        #[arg(short, long, default_value = "0")]
        rolls: u8,
    },

    /// Rank every keep and category for a roll
    Analyze {
        /// Five dice, e.g. 1,2,3,4,5
        #[arg(short, long, value_delimiter = ',', num_args = 1.., required = true)]
        dice: Vec<u8>,

        /// Open categories, comma separated, or 'all'
        #[arg(short, long, default_value = "all")]
        categories: String,

        /// Rerolls still available this turn (0-2)
        #[arg(short, long, default_value = "0")]
        rolls: u8,
    },

    /// Play full solitaire games and report score statistics
    Benchmark {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        games: usize,

        /// Base seed; game i uses seed + i
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Solve the whole table before playing
        #[arg(short, long)]
        precompute: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let solver = Solver::new();

    if let Some(path) = &cli.table {
        let summary = load_table(&solver, path)?;
        print_load_summary(&summary, path);
    }

    match cli.command {
        Commands::Solve { categories, output } => run_solve_command(&solver, &categories, output),
        Commands::Suggest {
            dice,
            categories,
            rolls,
        } => run_suggest_command(&solver, dice, &categories, rolls),
        Commands::Analyze {
            dice,
            categories,
            rolls,
        } => run_analyze_command(&solver, &dice, &categories, rolls),
        Commands::Benchmark {
            games,
            seed,
            precompute,
        } => run_benchmark_command(&solver, &cli.strategy, games, seed, precompute),
    }
}

fn run_solve_command(solver: &Solver, categories: &str, output: Option<PathBuf>) -> Result<()> {
    let config = SolveConfig {
        output,
        ..SolveConfig::new(CategorySet::parse_list(categories)?)
    };
    let result = run_solve(&config, solver)?;
    print_solve_result(&result);
    Ok(())
}

fn run_suggest_command(solver: &Solver, dice: Vec<u8>, categories: &str, rolls: u8) -> Result<()> {
    let config = SuggestConfig {
        categories: CategorySet::parse_list(categories)?,
        rolls,
        ..SuggestConfig::new(dice)
    };
    let result = run_suggest(&config, solver)?;
    print_suggestion(&result);
    Ok(())
}

fn run_analyze_command(solver: &Solver, dice: &[u8], categories: &str, rolls: u8) -> Result<()> {
    let categories = CategorySet::parse_list(categories)?;
    let result = analyze_roll(dice, categories, rolls, solver)?;
    print_analysis_result(&result);
    Ok(())
}

fn run_benchmark_command(
    solver: &Solver,
    strategy_name: &str,
    games: usize,
    seed: u64,
    precompute: bool,
) -> Result<()> {
    if precompute {
        let result = run_solve(&SolveConfig::new(CategorySet::ALL), solver)?;
        print_solve_result(&result);
    }

    let strategy = StrategyType::from_name(strategy_name, solver);
    println!(
        "Running benchmark: {games} games with the {} strategy...",
        strategy.name()
    );

    let config = BenchmarkConfig {
        seed,
        ..BenchmarkConfig::new(games)
    };
    let result = run_benchmark(&strategy, &config)?;
    print_benchmark_result(&result);
    Ok(())
}
