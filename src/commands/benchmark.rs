//! Benchmark command
//!
//! Plays complete solitaire games with a strategy and summarizes the scores.

use crate::core::{Category, YAHTZEE_SCORE, YahtzeeError};
use crate::game::{Scorecard, play_game};
use crate::output::formatters::progress_style;
use crate::solver::Strategy;
use indicatif::ProgressBar;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Width of one score histogram bucket
pub const BUCKET_WIDTH: u32 = 25;

/// Configuration for a benchmark run
pub struct BenchmarkConfig {
    pub games: usize,
    /// Game `i` rolls its dice from `seed + i`
    pub seed: u64,
    pub show_progress: bool,
}

impl BenchmarkConfig {
    #[must_use]
    pub const fn new(games: usize) -> Self {
        Self {
            games,
            seed: 0,
            show_progress: true,
        }
    }
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_games: usize,
    pub average_score: f64,
    pub min_score: u32,
    pub max_score: u32,
    pub std_dev: f64,
    /// Games per histogram bucket, keyed by the bucket's lower bound
    pub distribution: BTreeMap<u32, usize>,
    /// Share of games that earned the upper bonus
    pub upper_bonus_rate: f64,
    /// Share of games with a 50 in the Yahtzee box
    pub yahtzee_rate: f64,
    pub yahtzee_bonuses: u32,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Play `config.games` games in parallel and collect statistics
///
/// # Errors
///
/// Returns the first error a strategy raises while playing.
pub fn run_benchmark<S: Strategy + Sync>(
    strategy: &S,
    config: &BenchmarkConfig,
) -> Result<BenchmarkResult, YahtzeeError> {
    let pb = if config.show_progress {
        ProgressBar::new(config.games as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(progress_style());
    pb.set_message("playing");

    let start = Instant::now();
    let cards = (0..config.games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let card = play_game(strategy, &mut rng);
            pb.inc(1);
            card
        })
        .collect::<Result<Vec<Scorecard>, _>>()?;
    let duration = start.elapsed();
    pb.finish_with_message("Complete!");

    Ok(summarize(&cards, duration))
}

fn summarize(cards: &[Scorecard], duration: Duration) -> BenchmarkResult {
    let total_games = cards.len();
    let scores: Vec<u32> = cards.iter().map(Scorecard::total).collect();

    let mut distribution: BTreeMap<u32, usize> = BTreeMap::new();
    for &score in &scores {
        *distribution
            .entry(score / BUCKET_WIDTH * BUCKET_WIDTH)
            .or_insert(0) += 1;
    }

    let games = total_games.max(1) as f64;
    let average_score = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / games;
    let variance = scores
        .iter()
        .map(|&s| (f64::from(s) - average_score).powi(2))
        .sum::<f64>()
        / games;

    let rate = |hits: usize| hits as f64 / games;

    BenchmarkResult {
        total_games,
        average_score,
        min_score: scores.iter().copied().min().unwrap_or(0),
        max_score: scores.iter().copied().max().unwrap_or(0),
        std_dev: variance.sqrt(),
        distribution,
        upper_bonus_rate: rate(cards.iter().filter(|c| c.upper_bonus() > 0).count()),
        yahtzee_rate: rate(
            cards
                .iter()
                .filter(|c| c.get(Category::Yahtzee) == Some(YAHTZEE_SCORE))
                .count(),
        ),
        yahtzee_bonuses: cards.iter().map(Scorecard::yahtzee_bonuses).sum(),
        duration,
        games_per_second: total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}
