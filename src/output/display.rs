//! Display functions for command results

use super::formatters::{create_progress_bar, format_dice, format_positions};
use crate::commands::{AnalysisResult, BenchmarkResult, SolveResult, SuggestResult};
use crate::core::RollsRemaining;
use crate::solver::Suggestion;
use crate::storage::LoadSummary;
use colored::Colorize;
use std::path::Path;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

fn describe(suggestion: &Suggestion, rolls: RollsRemaining) -> String {
    if rolls.is_final() {
        return suggestion.category.map_or_else(
            || "no open category left to score".to_string(),
            |category| format!("score {}", category.label()),
        );
    }

    if suggestion.stop {
        "keep all dice (stop rolling)".to_string()
    } else if suggestion.keep.is_empty() {
        "reroll all dice".to_string()
    } else {
        format!("keep positions {}", format_positions(&suggestion.keep))
    }
}

/// Print the result of a batch solve
pub fn print_solve_result(result: &SolveResult) {
    header("SOLVE RESULTS");

    println!("\n📊 {}", "Table:".bright_cyan().bold());
    println!("   Working set:      {{{}}}", result.categories);
    println!("   Blocks visited:   {}", result.blocks);
    println!("   Blocks in table:  {}", result.solved_total);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!(
        "   Opening value:    {}",
        format!("{:.4}", result.opening_value).bright_yellow().bold()
    );
    if let Some(records) = result.records_written {
        println!("   Records written:  {records}");
    }
}

/// Print a single recommendation
pub fn print_suggestion(result: &SuggestResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Dice: {}   rolls left: {}",
        format_dice(&result.dice).bright_yellow().bold(),
        result.rolls
    );
    println!("Open: {{{}}}", result.categories);
    println!("{}", "─".repeat(60).cyan());

    let suggestion = &result.suggestion;
    if result.rolls.is_final() && suggestion.category.is_none() {
        println!("\n{}", describe(suggestion, result.rolls).red().bold());
        return;
    }

    println!("\n✅ {}", describe(suggestion, result.rolls).green().bold());
    println!(
        "   Expected turn score: {}",
        format!("{:.4}", suggestion.expected_value).bright_yellow()
    );
}

/// Print the ranked keeps and category scores for a roll
pub fn print_analysis_result(result: &AnalysisResult) {
    header("DECISION ANALYSIS");
    println!(
        "\nDice: {}   rolls left: {}",
        format_dice(&result.dice).bright_yellow().bold(),
        result.rolls
    );
    println!("Best: {}", describe(&result.best, result.rolls).green().bold());

    if !result.keeps.is_empty() {
        let top = result.keeps[0].expected_value;
        println!("\n🎲 {}", "Keeps (best first):".bright_cyan().bold());
        for option in &result.keeps {
            let label = if option.stop {
                "stop".to_string()
            } else {
                let faces: Vec<String> = option.kept_faces.iter().map(u8::to_string).collect();
                format!("[{}]", faces.join(" "))
            };
            let bar = create_progress_bar(option.expected_value, top, 20);
            println!(
                "   {label:<13} {} {:>9.4}",
                bar.green(),
                option.expected_value
            );
        }
    }

    println!("\n📋 {}", "Scores now:".bright_cyan().bold());
    for (category, points) in &result.category_scores {
        println!("   {:<16}{points:>4}", category.label());
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    header("BENCHMARK RESULTS");

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Average score:    {}",
        format!("{:.2}", result.average_score).bright_yellow().bold()
    );
    println!("   Std deviation:    {:.2}", result.std_dev);
    println!(
        "   Best game:        {}",
        format!("{}", result.max_score).green()
    );
    println!(
        "   Worst game:       {}",
        format!("{}", result.min_score).yellow()
    );
    println!(
        "   Upper bonus:      {:.1}%",
        result.upper_bonus_rate * 100.0
    );
    println!("   Yahtzee scored:   {:.1}%", result.yahtzee_rate * 100.0);
    println!("   Yahtzee bonuses:  {}", result.yahtzee_bonuses);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.total_games == 0 {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&bucket, &count) in &result.distribution {
        let pct = (count as f64 / result.total_games as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {bucket:>4}+ {bar} {count:5} ({pct:5.1}%)");
    }
}

/// Print what a table import added
pub fn print_load_summary(summary: &LoadSummary, path: &Path) {
    println!(
        "Loaded {} records ({} blocks, {} new) from {}",
        summary.records,
        summary.blocks,
        summary.installed,
        path.display()
    );
}
