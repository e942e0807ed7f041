//! Centralized error type for the tunesmith umbrella crate.
//!
//! Wraps the subsystem errors so `?` propagates naturally across crate
//! boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Smf(#[from] tunesmith_smf::Error),

    #[error(transparent)]
    Tunes(#[from] tunesmith_tunes::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
