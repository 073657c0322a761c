//! Submission output.
//!
//! The game reads one seed per line and expects the whole seed block once
//! per round:
//!
//! ```text
//! 12        ┐
//! 7         │ round 1
//! 40        ┘
//! 12        ┐
//! 7         │ round 2
//! 40        ┘
//! ...
//! ```

use crate::{NodeId, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Rounds per submission file when not configured otherwise.
pub const DEFAULT_ROUNDS: usize = 50;

/// Render `seeds` as `rounds` identical newline-terminated blocks.
///
/// # Example
///
/// ```
/// use contagion_core::{emit, NodeId};
///
/// let seeds = vec![NodeId::from("3"), NodeId::from("1")];
/// assert_eq!(emit::render(&seeds, 2), "3\n1\n3\n1\n");
/// ```
#[must_use]
pub fn render(seeds: &[NodeId], rounds: usize) -> String {
    let block: String = seeds.iter().map(|id| format!("{id}\n")).collect();
    block.repeat(rounds)
}

/// Write the submission to `path`, replacing any existing file.
pub fn write_submission(path: impl AsRef<Path>, seeds: &[NodeId], rounds: usize) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    for _ in 0..rounds {
        for id in seeds {
            writeln!(out, "{id}")?;
        }
    }
    out.flush()?;
    tracing::info!(
        path = %path.display(),
        seeds = seeds.len(),
        rounds,
        "submission written"
    );
    Ok(())
}

/// Submission path for a graph file: same name, `.txt` extension.
///
/// `2.10.31.json` becomes `2.10.31.txt`, next to the input.
#[must_use]
pub fn submission_path(input: &Path) -> PathBuf {
    input.with_extension("txt")
}
