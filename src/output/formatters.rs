//! Formatting utilities for terminal output

use crate::core::Dice;
use indicatif::ProgressStyle;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}";

/// Shared style for long-running batch work
#[must_use]
pub fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("█▓▒░"))
}

/// Unicode die face for 1..=6, `?` otherwise
#[must_use]
pub const fn die_face(face: u8) -> char {
    match face {
        1 => '⚀',
        2 => '⚁',
        3 => '⚂',
        4 => '⚃',
        5 => '⚄',
        6 => '⚅',
        _ => '?',
    }
}

/// Dice as die faces followed by their values, e.g. `⚀ ⚄ ⚄ (1 5 5)`
#[must_use]
pub fn format_dice(dice: &Dice) -> String {
    let faces: Vec<String> = dice.faces().iter().map(|&f| die_face(f).to_string()).collect();
    let values: Vec<String> = dice.faces().iter().map(u8::to_string).collect();
    format!("{} ({})", faces.join(" "), values.join(" "))
}

/// Zero-based dice positions as a comma list, `none` when empty
#[must_use]
pub fn format_positions(positions: &[usize]) -> String {
    if positions.is_empty() {
        return "none".to_string();
    }
    let parts: Vec<String> = positions.iter().map(usize::to_string).collect();
    parts.join(", ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64).max(0.0) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
