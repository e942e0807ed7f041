//! The tick-cursor track builder.
//!
//! [`SequenceBuilder`] owns the sequence under construction together with a
//! cursor per `(track, channel)` pair. Cursors start at tick 1, advance
//! monotonically as notes are appended, and never leak outside the builder:
//! every `generate` call allocates a fresh builder on its own stack, so
//! concurrent generations cannot corrupt each other's timing.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::message::{
    Message, DEFAULT_TEMPO, GM_ENABLE_SYSEX, NOTE_OFF_VELOCITY, NOTE_ON_VELOCITY,
    OMNI_ON_CONTROLLER, POLY_ON_CONTROLLER,
};
use crate::sequence::{Sequence, TrackId};

/// Initial value of every tick cursor.
pub const INITIAL_TICKS: u64 = 1;

#[derive(Debug, Default)]
pub struct SequenceBuilder {
    sequence: Sequence,
    cursors: HashMap<(TrackId, u8), u64>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a track and stamps its configuration prologue at tick 0:
    /// the General MIDI enable sysex, the fixed tempo, the track name, and
    /// the omni-on / poly-on channel mode controllers.
    ///
    /// The returned handle is immediately usable for voice selection and
    /// note emission. The prologue values are constants, so the only
    /// failures that can surface here are construction bugs.
    pub fn create_track(&mut self, name: &str) -> Result<TrackId> {
        let sysex = Message::sysex(GM_ENABLE_SYSEX.to_vec())?;
        let tempo = Message::tempo(DEFAULT_TEMPO)?;
        let omni = Message::controller(0, OMNI_ON_CONTROLLER, 0)?;
        let poly = Message::controller(0, POLY_ON_CONTROLLER, 0)?;

        let id = self.sequence.create_track();
        let track = self.sequence.track_mut(id);
        track.push(0, sysex);
        track.push(0, tempo);
        track.push(0, Message::TrackName(name.to_string()));
        track.push(0, omni);
        track.push(0, poly);
        debug!(track = id.index(), name, "created track");
        Ok(id)
    }

    /// Selects the instrument for channel 0 of `track`.
    pub fn set_voice(&mut self, track: TrackId, program: u8) -> Result<()> {
        self.set_channel_voice(track, 0, program)
    }

    /// Selects the instrument for a specific channel, stamped at tick 0.
    pub fn set_channel_voice(&mut self, track: TrackId, channel: u8, program: u8) -> Result<()> {
        let message = Message::program_change(channel, program)?;
        self.sequence.track_mut(track).push(0, message);
        Ok(())
    }

    /// Appends a note on channel 0 at the track's cursor and advances the
    /// cursor past `duration`.
    pub fn add_note(&mut self, track: TrackId, key: u8, duration: u64) -> Result<()> {
        self.add_channel_note(track, 0, key, 0, duration)
    }

    /// Like [`add_note`](Self::add_note), but first advances the cursor by
    /// `rest` ticks without emitting anything.
    pub fn add_note_after(&mut self, track: TrackId, key: u8, rest: u64, duration: u64) -> Result<()> {
        self.add_channel_note(track, 0, key, rest, duration)
    }

    /// The core timing primitive. Advances the `(track, channel)` cursor by
    /// `rest`, stamps a note-on there, advances by `duration`, and stamps
    /// the matching note-off. A zero duration is legal and produces both
    /// events at the same tick.
    pub fn add_channel_note(
        &mut self,
        track: TrackId,
        channel: u8,
        key: u8,
        rest: u64,
        duration: u64,
    ) -> Result<()> {
        let on = Message::note_on(channel, key, NOTE_ON_VELOCITY)?;
        let off = Message::note_off(channel, key, NOTE_OFF_VELOCITY)?;
        let on_tick = self.advance(track, channel, rest);
        let off_tick = self.advance(track, channel, duration);
        let events = self.sequence.track_mut(track);
        events.push(on_tick, on);
        events.push(off_tick, off);
        Ok(())
    }

    /// Current cursor position for a `(track, channel)` pair.
    pub fn cursor(&self, track: TrackId, channel: u8) -> u64 {
        self.cursors
            .get(&(track, channel))
            .copied()
            .unwrap_or(INITIAL_TICKS)
    }

    /// Moves a cursor forward without emitting events (an audible-silence
    /// offset, e.g. to start one line after another has finished). Returns
    /// the new position.
    pub fn advance(&mut self, track: TrackId, channel: u8, ticks: u64) -> u64 {
        let cursor = self
            .cursors
            .entry((track, channel))
            .or_insert(INITIAL_TICKS);
        *cursor += ticks;
        *cursor
    }

    /// Puts a cursor back at tick 1, so an independent line on another
    /// channel of the same track can restart from the beginning.
    pub fn reset_ticks(&mut self, track: TrackId, channel: u8) {
        self.cursors.insert((track, channel), INITIAL_TICKS);
    }

    /// Terminates the track with an end-of-track meta event at the furthest
    /// of its event ticks and its channel cursors. Call exactly once per
    /// track, after all notes.
    pub fn end_track(&mut self, track: TrackId) {
        self.end_track_after(track, 0);
    }

    /// [`end_track`](Self::end_track) with a trailing pause before the
    /// marker.
    pub fn end_track_after(&mut self, track: TrackId, trailing: u64) {
        let cursor_max = self
            .cursors
            .iter()
            .filter(|((id, _), _)| *id == track)
            .map(|(_, &cursor)| cursor)
            .max()
            .unwrap_or(INITIAL_TICKS);
        let tick = self.sequence.track(track).end_tick().max(cursor_max) + trailing;
        self.sequence.track_mut(track).push(tick, Message::EndOfTrack);
    }

    /// The sequence built so far.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Consumes the builder, dropping all cursor state.
    pub fn finish(self) -> Sequence {
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_ticks(builder: &SequenceBuilder, track: TrackId) -> Vec<(u64, bool)> {
        builder
            .sequence()
            .track(track)
            .events()
            .iter()
            .filter_map(|e| match e.message {
                Message::NoteOn { .. } => Some((e.tick, true)),
                Message::NoteOff { .. } => Some((e.tick, false)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn cursor_starts_at_one() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        assert_eq!(b.cursor(t, 0), INITIAL_TICKS);
    }

    #[test]
    fn durations_accumulate() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        for duration in [10, 20, 30] {
            b.add_note(t, 60, duration).unwrap();
        }
        assert_eq!(b.cursor(t, 0), 1 + 10 + 20 + 30);
    }

    #[test]
    fn rest_shifts_note_on() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note_after(t, 60, 5, 8).unwrap();
        assert_eq!(note_ticks(&b, t), vec![(6, true), (14, false)]);
        assert_eq!(b.cursor(t, 0), 14);
    }

    #[test]
    fn contiguous_notes_share_boundary_ticks() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note(t, 60, 120).unwrap();
        b.add_note(t, 62, 120).unwrap();
        b.add_note(t, 64, 120).unwrap();
        assert_eq!(
            note_ticks(&b, t),
            vec![
                (1, true),
                (121, false),
                (121, true),
                (241, false),
                (241, true),
                (361, false)
            ]
        );
    }

    #[test]
    fn zero_duration_is_legal() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note(t, 60, 0).unwrap();
        assert_eq!(note_ticks(&b, t), vec![(1, true), (1, false)]);
    }

    #[test]
    fn channels_have_independent_cursors() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_channel_note(t, 0, 60, 0, 100).unwrap();
        b.add_channel_note(t, 1, 48, 0, 7).unwrap();
        assert_eq!(b.cursor(t, 0), 101);
        assert_eq!(b.cursor(t, 1), 8);
    }

    #[test]
    fn reset_restarts_a_line() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_channel_note(t, 1, 60, 0, 500).unwrap();
        b.reset_ticks(t, 1);
        b.add_channel_note(t, 1, 62, 0, 10).unwrap();
        let ticks = note_ticks(&b, t);
        assert_eq!(ticks[2], (1, true));
        assert_eq!(ticks[3], (11, false));
    }

    #[test]
    fn prologue_is_stamped_at_tick_zero_in_order() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("Treble Track").unwrap();
        let events = b.sequence().track(t).events();
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| e.tick == 0));
        assert!(matches!(events[0].message, Message::SysEx(_)));
        assert!(matches!(events[1].message, Message::Tempo(DEFAULT_TEMPO)));
        assert_eq!(
            events[2].message,
            Message::TrackName("Treble Track".to_string())
        );
        assert!(matches!(
            events[3].message,
            Message::Controller {
                controller: OMNI_ON_CONTROLLER,
                ..
            }
        ));
        assert!(matches!(
            events[4].message,
            Message::Controller {
                controller: POLY_ON_CONTROLLER,
                ..
            }
        ));
    }

    #[test]
    fn end_track_lands_on_last_event() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note(t, 60, 40).unwrap();
        b.end_track(t);
        let last = b.sequence().track(t).events().last().unwrap();
        assert_eq!(last.tick, 41);
        assert_eq!(last.message, Message::EndOfTrack);
    }

    #[test]
    fn end_track_on_a_bare_track_lands_on_the_cursor() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.end_track(t);
        let last = b.sequence().track(t).events().last().unwrap();
        assert_eq!(last.tick, INITIAL_TICKS);
        assert_eq!(last.message, Message::EndOfTrack);
    }

    #[test]
    fn end_track_follows_a_cursor_advanced_past_the_notes() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note(t, 60, 40).unwrap();
        b.advance(t, 0, 10);
        b.end_track(t);
        let last = b.sequence().track(t).events().last().unwrap();
        assert_eq!(last.tick, 51);
    }

    #[test]
    fn end_track_after_adds_trailing_silence() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note(t, 60, 40).unwrap();
        b.end_track_after(t, 19);
        let last = b.sequence().track(t).events().last().unwrap();
        assert_eq!(last.tick, 60);
    }

    #[test]
    fn advance_offsets_a_parallel_line() {
        let mut b = SequenceBuilder::new();
        let lead = b.create_track("lead").unwrap();
        b.add_note(lead, 64, 240).unwrap();
        let solo = b.create_track("solo").unwrap();
        let offset = b.cursor(lead, 0);
        b.advance(solo, 0, offset);
        b.add_note(solo, 72, 60).unwrap();
        assert_eq!(note_ticks(&b, solo), vec![(242, true), (302, false)]);
    }

    #[test]
    fn out_of_range_pitch_is_rejected() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        assert!(b.add_note(t, 200, 60).is_err());
        // a rejected note must leave the cursor and the track untouched
        assert!(note_ticks(&b, t).is_empty());
        assert_eq!(b.cursor(t, 0), INITIAL_TICKS);
    }
}
