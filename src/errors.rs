//! Crate-level errors (no external concerns beyond transcript I/O)

use thiserror::Error;

/// Errors raised while parsing transcripts, building trees or sampling pairs.
///
/// Every variant is recoverable at the per-transcript or per-call level;
/// batch callers are expected to log and skip rather than abort.
#[derive(Error, Debug)]
pub enum MinerError {
    #[error("no position path or stance marker in line: {0:?}")]
    MalformedLine(String),

    #[error("parent {parent} not found for node {child}")]
    MissingParent { child: String, parent: String },

    #[error("could not find a neutral pair after {0} attempts")]
    AttemptsExhausted(usize),

    #[error("requested {requested} pairs but only {available} candidates exist")]
    NotEnoughCandidates { requested: usize, available: usize },

    #[error("transcript header malformed: {0}")]
    InvalidHeader(String),

    #[error("failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
}

pub type MinerResult<T> = Result<T, MinerError>;
