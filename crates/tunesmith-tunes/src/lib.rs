//! Built-in tune generators and the name-keyed registry.
//!
//! Every tune is a variant of [`Tune`]; callers pick one (directly or through
//! [`TuneRegistry`]) and stream the rendered Standard MIDI File into any
//! `io::Write` sink via [`Tune::generate`].

use std::collections::BTreeMap;
use std::io::Write;

use tracing::debug;
use tunesmith_smf::{write_sequence, Sequence};

mod demo;
mod mario;
mod pentatonic;

/// MIME type for the rendered files, for callers that serve them over HTTP.
pub const MIDI_MIME: &str = "application/x-midi";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The requested name matches no registered tune.
    #[error("unknown tune: {0}")]
    UnknownTune(String),
    #[error(transparent)]
    Smf(#[from] tunesmith_smf::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One of the built-in tunes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tune {
    /// Two-voice flute demo with a trailing solo run.
    Demo,
    /// The Super Mario Bros. overworld theme, square lead.
    Mario,
    /// Minor-pentatonic runs on distortion guitar.
    Pentatonic,
}

impl Tune {
    pub const ALL: [Tune; 3] = [Tune::Demo, Tune::Mario, Tune::Pentatonic];

    pub fn name(self) -> &'static str {
        match self {
            Tune::Demo => "demo",
            Tune::Mario => "mario",
            Tune::Pentatonic => "pentatonic",
        }
    }

    /// Builds the tune's sequence and writes it to `sink` as a format 1 SMF.
    pub fn generate<W: Write>(self, sink: &mut W) -> Result<()> {
        let sequence = self.sequence()?;
        debug!(tune = self.name(), tracks = sequence.tracks().len(), "rendering tune");
        write_sequence(&sequence, sink)?;
        Ok(())
    }

    fn sequence(self) -> tunesmith_smf::Result<Sequence> {
        match self {
            Tune::Demo => demo::sequence(),
            Tune::Mario => mario::sequence(),
            Tune::Pentatonic => pentatonic::sequence(),
        }
    }
}

/// Name-keyed lookup over the built-in tunes.
#[derive(Debug)]
pub struct TuneRegistry {
    tunes: BTreeMap<&'static str, Tune>,
}

impl TuneRegistry {
    pub fn new() -> Self {
        let tunes = Tune::ALL.iter().map(|&t| (t.name(), t)).collect();
        Self { tunes }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tunes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Tune> {
        self.tunes.get(name).copied()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tunes.keys().copied()
    }

    /// Renders the named tune into `sink`. An unknown name fails before a
    /// single byte is written.
    pub fn generate<W: Write>(&self, name: &str, sink: &mut W) -> Result<()> {
        let tune = self
            .get(name)
            .ok_or_else(|| Error::UnknownTune(name.to_owned()))?;
        tune.generate(sink)
    }
}

impl Default for TuneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
