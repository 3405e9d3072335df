//! Flat dump and import of the solved table
//!
//! One JSON array per line:
//!
//! ```text
//! [[1,1,2,5,6],["ones","chance"],2,21.437...]
//! ```
//!
//! holding the sorted dice faces, the open category identifiers, rolls
//! remaining, and the expected value. Actions are not stored; they are
//! recomputed from the values on import.

mod loader;
mod writer;

pub use loader::{LoadSummary, RELATIVE_TOLERANCE, load_table, read_table};
pub use writer::{save_table, write_table};

use crate::core::{CategorySet, DiceState, YahtzeeError};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Records per fully stored category set: 3 levels × 252 dice states
pub const RECORDS_PER_BLOCK: usize = 3 * crate::core::NUM_DICE_STATES;

/// One table entry as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord(pub Vec<u8>, pub Vec<String>, pub u8, pub f64);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: not a table record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: YahtzeeError,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("category set {{{categories}}} has {found} of 756 records")]
    Incomplete {
        categories: CategorySet,
        found: usize,
    },

    #[error(
        "category set {{{categories}}}: stored value for {dice} with {rolls} rolls left disagrees with the recomputed table"
    )]
    Mismatch {
        categories: CategorySet,
        rolls: u8,
        dice: DiceState,
    },
}
