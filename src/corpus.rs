//! Transcript loading: debate exports on disk -> in-memory line sequences.
//!
//! Exports carry a four-line header (the second line is the debate
//! subject), the argument body, and an optional `Sources:` trailer
//! listing citations. Only the body reaches the line parser.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{MinerError, MinerResult};

/// Number of header lines preceding the argument body.
pub const HEADER_LINES: usize = 4;

/// One debate transcript, header and trailer already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Debate title, taken from the header
    pub subject: String,
    /// Argument body lines, blank lines removed
    pub lines: Vec<String>,
}

impl Transcript {
    /// Parses raw export content: cuts at the `Sources:` trailer, drops
    /// blank lines, strips the header and keeps its second line as the
    /// subject.
    pub fn parse(content: &str) -> MinerResult<Self> {
        let mut lines: Vec<String> = Vec::new();
        for line in content.lines() {
            if line.starts_with("Sources:") {
                break;
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        if lines.len() < HEADER_LINES {
            return Err(MinerError::InvalidHeader(format!(
                "expected at least {HEADER_LINES} non-empty lines, got {}",
                lines.len()
            )));
        }
        let header: Vec<String> = lines.drain(..HEADER_LINES).collect();
        let subject = header[1].clone();

        Ok(Self { subject, lines })
    }

    pub fn from_file(path: &Path) -> MinerResult<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

/// Lists every `.txt` debate export under `dir`, sorted for stable
/// batch order.
pub fn discover(dir: &Path) -> MinerResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| MinerError::Io(e.into()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "txt")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
