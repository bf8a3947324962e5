use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed gazetteer record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("malformed coordinate literal for {subject}: {literal:?}")]
    MalformedLiteral { subject: String, literal: String },

    #[error("malformed fact on line {line}: {reason}")]
    MalformedFact { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
