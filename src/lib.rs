//! # Tunesmith - MIDI tune generation
//!
//! Umbrella crate over two subsystems:
//! - **tunesmith-smf** - tick-cursor track building and Standard MIDI File
//!   serialization
//! - **tunesmith-tunes** - the built-in tunes and the name-keyed registry
//!
//! ```no_run
//! use tunesmith::{Tune, TuneRegistry};
//!
//! # fn main() -> tunesmith::Result<()> {
//! let registry = TuneRegistry::new();
//! let mut out = Vec::new();
//! registry.generate("mario", &mut out)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub use tunesmith_smf as smf;
pub use tunesmith_tunes as tunes;

pub use tunesmith_smf::{Sequence, SequenceBuilder, TrackId};
pub use tunesmith_tunes::{Tune, TuneRegistry, MIDI_MIME};
