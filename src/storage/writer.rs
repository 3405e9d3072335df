use super::{StorageError, TableRecord};
use crate::solver::Solver;
use crate::solver::table::NUM_LEVELS;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write every solved block, ascending by category set, then rolls, then dice
///
/// Returns the number of records written.
///
/// # Errors
/// Returns `Io` if the sink fails.
pub fn write_table<W: Write>(solver: &Solver, sink: W) -> Result<usize, StorageError> {
    let mut out = BufWriter::new(sink);
    let mut written = 0;

    for (categories, block) in solver.solved_blocks() {
        let names: Vec<String> = categories.iter().map(|c| c.name().to_string()).collect();

        for rolls in 0..NUM_LEVELS {
            for (rank, state) in solver.states().iter().enumerate() {
                let record = TableRecord(
                    state.faces().to_vec(),
                    names.clone(),
                    rolls as u8,
                    block.level(rolls)[rank],
                );
                let mut line = serde_json::to_vec(&record).map_err(io::Error::from)?;
                line.push(b'\n');
                out.write_all(&line)?;
                written += 1;
            }
        }
    }

    out.flush()?;
    Ok(written)
}

/// Dump the solved table to `path`, replacing any existing file
///
/// # Errors
/// Returns `Io` if the file cannot be created or written.
pub fn save_table(solver: &Solver, path: impl AsRef<Path>) -> Result<usize, StorageError> {
    write_table(solver, File::create(path)?)
}
