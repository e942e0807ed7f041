//! In-memory sequence model: timestamped events grouped into tracks.
//!
//! Ticks are absolute (pulses since track start); delta times only appear
//! at serialization. The model is write-only by design: generators append
//! events through [`SequenceBuilder`](crate::SequenceBuilder) and the whole
//! sequence is discarded once it has been written to a sink.

use crate::message::Message;

/// Pulses per quarter note. The tempo meta event in
/// [`DEFAULT_TEMPO`](crate::message::DEFAULT_TEMPO) assumes this division.
pub const TICKS_PER_QUARTER: u16 = 24;

/// Handle to a track inside a [`Sequence`].
///
/// Only meaningful for the sequence (and builder) that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(pub(crate) usize);

impl TrackId {
    /// Position of the track in the sequence's track list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A message stamped at an absolute tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub tick: u64,
    pub message: Message,
}

/// An ordered list of events. Identified by its position in the sequence.
#[derive(Debug, Clone, Default)]
pub struct Track {
    events: Vec<Event>,
}

impl Track {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The furthest tick any event has been stamped at so far; 0 for an
    /// empty track.
    pub fn end_tick(&self) -> u64 {
        self.events.iter().map(|e| e.tick).max().unwrap_or(0)
    }

    pub(crate) fn push(&mut self, tick: u64, message: Message) {
        self.events.push(Event { tick, message });
    }
}

/// The top-level container handed to the serializer: a division plus one or
/// more tracks.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    tracks: Vec<Track>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulses per quarter note. Fixed for every sequence this crate builds.
    pub fn division(&self) -> u16 {
        TICKS_PER_QUARTER
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> &Track {
        &self.tracks[id.0]
    }

    pub(crate) fn create_track(&mut self) -> TrackId {
        self.tracks.push(Track::default());
        TrackId(self.tracks.len() - 1)
    }

    pub(crate) fn track_mut(&mut self, id: TrackId) -> &mut Track {
        &mut self.tracks[id.0]
    }
}
