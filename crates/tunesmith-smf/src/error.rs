//! Error types for sequence construction and serialization.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what} out of range: {value} (max {max})")]
    OutOfRange {
        what: &'static str,
        value: u64,
        max: u64,
    },

    #[error("malformed sysex payload (must be framed by F0 .. F7)")]
    MalformedSysEx,

    #[error("track {0} has no end-of-track marker")]
    MissingEndOfTrack(usize),

    #[error("track {0} has events after its end-of-track marker")]
    TrailingEvents(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
