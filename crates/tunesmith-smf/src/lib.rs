//! Tick-cursor track building and Standard MIDI File serialization.
//!
//! The crate is built around three layers: [`Message`] is a validated
//! channel/meta/sysex event, [`SequenceBuilder`] assembles tracks of
//! absolute-tick events behind per-channel tick cursors, and
//! [`write_sequence`] serializes the finished [`Sequence`] as a format 1
//! Standard MIDI File.

pub mod error;
pub use error::{Error, Result};

mod message;
pub use message::{
    Message, DEFAULT_TEMPO, GM_ENABLE_SYSEX, NOTE_OFF_VELOCITY, NOTE_ON_VELOCITY,
    OMNI_ON_CONTROLLER, POLY_ON_CONTROLLER,
};

mod sequence;
pub use sequence::{Event, Sequence, Track, TrackId, TICKS_PER_QUARTER};

mod builder;
pub use builder::{SequenceBuilder, INITIAL_TICKS};

mod writer;
pub use writer::write_sequence;

pub mod gm;
