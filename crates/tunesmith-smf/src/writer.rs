//! Serialization of a [`Sequence`] into Standard MIDI File bytes.
//!
//! The container format itself (MThd/MTrk chunks, variable-length delta
//! times) is handled by `midly`; this module validates every message,
//! orders each track by tick, and converts absolute ticks to deltas.

use std::io::Write;

use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use tracing::debug;

use crate::error::{Error, Result};
use crate::message::Message;
use crate::sequence::{Event, Sequence, Track};

/// Writes `sequence` as a format-1 SMF to `sink`.
///
/// Fails without writing anything if any track is missing its end-of-track
/// marker, carries events appended after it, or contains a message with
/// out-of-range parameters. Sink errors surface as [`Error::Io`].
pub fn write_sequence<W: Write>(sequence: &Sequence, sink: &mut W) -> Result<()> {
    let header = Header::new(
        Format::Parallel,
        Timing::Metrical(sequence.division().into()),
    );

    let mut tracks = Vec::with_capacity(sequence.tracks().len());
    for (index, track) in sequence.tracks().iter().enumerate() {
        tracks.push(encode_track(index, track)?);
    }

    let smf = Smf { header, tracks };
    smf.write_std(&mut *sink)?;
    debug!(
        tracks = sequence.tracks().len(),
        division = sequence.division(),
        "wrote sequence"
    );
    Ok(())
}

fn encode_track<'a>(index: usize, track: &'a Track) -> Result<Vec<TrackEvent<'a>>> {
    let events = track.events();

    // Exactly one end-of-track, and nothing appended after it.
    let terminators = events
        .iter()
        .filter(|e| e.message == Message::EndOfTrack)
        .count();
    if terminators == 0 {
        return Err(Error::MissingEndOfTrack(index));
    }
    if terminators > 1 || !matches!(events.last(), Some(e) if e.message == Message::EndOfTrack) {
        return Err(Error::TrailingEvents(index));
    }

    for event in events {
        event.message.validate()?;
    }

    // Stable sort: interleaved channel lines come out in time order while
    // same-tick events keep their append order.
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by_key(|e| e.tick);

    // Variable-length delta times top out at 28 bits.
    const DELTA_MAX: u64 = (1 << 28) - 1;

    let mut encoded = Vec::with_capacity(ordered.len());
    let mut last_tick = 0u64;
    for event in ordered {
        let gap = event.tick - last_tick;
        if gap > DELTA_MAX {
            return Err(Error::OutOfRange {
                what: "delta time",
                value: gap,
                max: DELTA_MAX,
            });
        }
        let delta = gap as u32;
        last_tick = event.tick;
        encoded.push(TrackEvent {
            delta: delta.into(),
            kind: event_kind(&event.message),
        });
    }
    Ok(encoded)
}

fn event_kind(message: &Message) -> TrackEventKind<'_> {
    match message {
        Message::NoteOn {
            channel,
            key,
            velocity,
        } => TrackEventKind::Midi {
            channel: (*channel).into(),
            message: MidiMessage::NoteOn {
                key: (*key).into(),
                vel: (*velocity).into(),
            },
        },
        Message::NoteOff {
            channel,
            key,
            velocity,
        } => TrackEventKind::Midi {
            channel: (*channel).into(),
            message: MidiMessage::NoteOff {
                key: (*key).into(),
                vel: (*velocity).into(),
            },
        },
        Message::Controller {
            channel,
            controller,
            value,
        } => TrackEventKind::Midi {
            channel: (*channel).into(),
            message: MidiMessage::Controller {
                controller: (*controller).into(),
                value: (*value).into(),
            },
        },
        Message::ProgramChange { channel, program } => TrackEventKind::Midi {
            channel: (*channel).into(),
            message: MidiMessage::ProgramChange {
                program: (*program).into(),
            },
        },
        Message::TrackName(name) => TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
        Message::Tempo(micros) => TrackEventKind::Meta(MetaMessage::Tempo((*micros).into())),
        Message::EndOfTrack => TrackEventKind::Meta(MetaMessage::EndOfTrack),
        // midly frames sysex itself: it lays out the leading 0xF0, so only
        // the payload (through the trailing 0xF7) is passed along.
        Message::SysEx(frame) => TrackEventKind::SysEx(&frame[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SequenceBuilder;
    use crate::message::{DEFAULT_TEMPO, GM_ENABLE_SYSEX, NOTE_OFF_VELOCITY, NOTE_ON_VELOCITY};
    use crate::sequence::TICKS_PER_QUARTER;

    fn render(builder: SequenceBuilder) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_sequence(&builder.finish(), &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn header_declares_format_one_at_fixed_division() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.end_track(t);
        let bytes = render(b);

        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.header.format, Format::Parallel);
        match smf.header.timing {
            Timing::Metrical(division) => assert_eq!(division.as_int(), TICKS_PER_QUARTER),
            other => panic!("unexpected timing {other:?}"),
        }
        assert_eq!(smf.tracks.len(), 1);
    }

    #[test]
    fn round_trip_preserves_events_and_ticks() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("lead").unwrap();
        b.set_voice(t, 0x49).unwrap();
        b.add_note(t, 64, 120).unwrap();
        b.add_note_after(t, 67, 24, 48).unwrap();
        b.end_track(t);
        let bytes = render(b);

        let smf = Smf::parse(&bytes).unwrap();
        let track = &smf.tracks[0];

        let mut tick = 0u32;
        let mut notes = Vec::new();
        let mut program = None;
        let mut tempo = None;
        let mut sysex = None;
        for event in track {
            tick += event.delta.as_int();
            match event.kind {
                TrackEventKind::Midi { message, .. } => match message {
                    MidiMessage::NoteOn { key, vel } => {
                        notes.push((tick, key.as_int(), vel.as_int(), true));
                    }
                    MidiMessage::NoteOff { key, vel } => {
                        notes.push((tick, key.as_int(), vel.as_int(), false));
                    }
                    MidiMessage::ProgramChange { program: p } => program = Some(p.as_int()),
                    _ => {}
                },
                TrackEventKind::Meta(MetaMessage::Tempo(t)) => tempo = Some(t.as_int()),
                TrackEventKind::SysEx(data) => sysex = Some(data.to_vec()),
                _ => {}
            }
        }

        assert_eq!(program, Some(0x49));
        assert_eq!(tempo, Some(DEFAULT_TEMPO));
        // midly strips the 0xF0 status byte on parse, keeps the 0xF7
        assert_eq!(sysex.as_deref(), Some(&GM_ENABLE_SYSEX[1..]));
        assert_eq!(
            notes,
            vec![
                (1, 64, NOTE_ON_VELOCITY, true),
                (121, 64, NOTE_OFF_VELOCITY, false),
                (145, 67, NOTE_ON_VELOCITY, true),
                (193, 67, NOTE_OFF_VELOCITY, false),
            ]
        );
    }

    #[test]
    fn interleaved_channel_lines_serialize_in_time_order() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("layers").unwrap();
        b.add_channel_note(t, 0, 60, 0, 100).unwrap();
        b.reset_ticks(t, 1);
        b.add_channel_note(t, 1, 48, 0, 10).unwrap();
        b.end_track(t);
        let bytes = render(b);

        let smf = Smf::parse(&bytes).unwrap();
        let mut tick = 0u32;
        let mut last = 0u32;
        for event in &smf.tracks[0] {
            tick += event.delta.as_int();
            assert!(tick >= last, "deltas must never run backwards");
            last = tick;
        }
    }

    #[test]
    fn missing_end_of_track_is_rejected() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note(t, 60, 10).unwrap();
        let mut sink = Vec::new();
        let err = write_sequence(&b.finish(), &mut sink).unwrap_err();
        assert!(matches!(err, Error::MissingEndOfTrack(0)));
        assert!(sink.is_empty());
    }

    #[test]
    fn events_after_end_of_track_are_rejected() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.add_note(t, 60, 10).unwrap();
        b.end_track(t);
        b.add_note(t, 62, 10).unwrap();
        let mut sink = Vec::new();
        let err = write_sequence(&b.finish(), &mut sink).unwrap_err();
        assert!(matches!(err, Error::TrailingEvents(0)));
        assert!(sink.is_empty());
    }

    #[test]
    fn double_end_of_track_is_rejected() {
        let mut b = SequenceBuilder::new();
        let t = b.create_track("t").unwrap();
        b.end_track(t);
        b.end_track(t);
        let mut sink = Vec::new();
        assert!(matches!(
            write_sequence(&b.finish(), &mut sink),
            Err(Error::TrailingEvents(0))
        ));
    }

    #[test]
    fn multiple_tracks_round_trip() {
        let mut b = SequenceBuilder::new();
        let treble = b.create_track("treble").unwrap();
        let bass = b.create_track("bass").unwrap();
        b.add_note(treble, 64, 60).unwrap();
        b.add_note(bass, 48, 240).unwrap();
        b.end_track(treble);
        b.end_track(bass);
        let bytes = render(b);

        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.tracks.len(), 2);
        for track in &smf.tracks {
            assert!(matches!(
                track.last().map(|e| &e.kind),
                Some(TrackEventKind::Meta(MetaMessage::EndOfTrack))
            ));
        }
    }
}
