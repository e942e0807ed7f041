//! MIDI message construction with range checking.
//!
//! Every parameter that ends up as a MIDI data byte is limited to 7 bits;
//! out-of-range values are a bug in the caller's note data and are rejected
//! before they can reach the serializer.

use crate::error::{Error, Result};

/// Attack velocity stamped on every note-on.
pub const NOTE_ON_VELOCITY: u8 = 0x60;

/// Release velocity stamped on every note-off.
pub const NOTE_OFF_VELOCITY: u8 = 0x40;

/// Controller number for "omni mode on".
pub const OMNI_ON_CONTROLLER: u8 = 0x7D;

/// Controller number for "poly mode on".
pub const POLY_ON_CONTROLLER: u8 = 0x7F;

/// The universal sysex frame that switches a synth to the General MIDI
/// sound set.
pub const GM_ENABLE_SYSEX: [u8; 6] = [0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7];

/// Fixed tempo in microseconds per quarter note, paired with the 24 PPQ
/// division. Changing one without the other changes playback speed.
pub const DEFAULT_TEMPO: u32 = 0x02_00_00;

const DATA_MAX: u8 = 0x7F;
const CHANNEL_MAX: u8 = 0x0F;
const TEMPO_MAX: u32 = 0xFF_FF_FF;

/// A single MIDI message, stored with plain integer fields.
///
/// Channel-voice variants carry their channel explicitly; meta and sysex
/// variants are channel-less. Construct through the checked helpers rather
/// than the variants directly so invalid data is caught early; the
/// serializer re-validates regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    Controller { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    /// Track name meta event.
    TrackName(String),
    /// Tempo meta event, microseconds per quarter note (24-bit).
    Tempo(u32),
    /// End-of-track meta event. Must terminate every track.
    EndOfTrack,
    /// Raw system-exclusive frame, including the leading 0xF0 and the
    /// trailing 0xF7.
    SysEx(Vec<u8>),
}

impl Message {
    pub fn note_on(channel: u8, key: u8, velocity: u8) -> Result<Self> {
        check_channel(channel)?;
        check_data("note", key)?;
        check_data("velocity", velocity)?;
        Ok(Message::NoteOn {
            channel,
            key,
            velocity,
        })
    }

    pub fn note_off(channel: u8, key: u8, velocity: u8) -> Result<Self> {
        check_channel(channel)?;
        check_data("note", key)?;
        check_data("velocity", velocity)?;
        Ok(Message::NoteOff {
            channel,
            key,
            velocity,
        })
    }

    pub fn controller(channel: u8, controller: u8, value: u8) -> Result<Self> {
        check_channel(channel)?;
        check_data("controller", controller)?;
        check_data("controller value", value)?;
        Ok(Message::Controller {
            channel,
            controller,
            value,
        })
    }

    pub fn program_change(channel: u8, program: u8) -> Result<Self> {
        check_channel(channel)?;
        check_data("program", program)?;
        Ok(Message::ProgramChange { channel, program })
    }

    pub fn tempo(micros_per_quarter: u32) -> Result<Self> {
        if micros_per_quarter > TEMPO_MAX {
            return Err(Error::OutOfRange {
                what: "tempo",
                value: micros_per_quarter as u64,
                max: TEMPO_MAX as u64,
            });
        }
        Ok(Message::Tempo(micros_per_quarter))
    }

    pub fn sysex(frame: Vec<u8>) -> Result<Self> {
        if frame.len() < 2 || frame[0] != 0xF0 || frame[frame.len() - 1] != 0xF7 {
            return Err(Error::MalformedSysEx);
        }
        Ok(Message::SysEx(frame))
    }

    /// Re-checks the invariants the constructors enforce. The serializer
    /// calls this for every event so hand-built variants cannot smuggle
    /// out-of-range bytes into a file.
    pub fn validate(&self) -> Result<()> {
        match self {
            Message::NoteOn { channel, key, velocity }
            | Message::NoteOff { channel, key, velocity } => {
                check_channel(*channel)?;
                check_data("note", *key)?;
                check_data("velocity", *velocity)
            }
            Message::Controller {
                channel,
                controller,
                value,
            } => {
                check_channel(*channel)?;
                check_data("controller", *controller)?;
                check_data("controller value", *value)
            }
            Message::ProgramChange { channel, program } => {
                check_channel(*channel)?;
                check_data("program", *program)
            }
            Message::Tempo(micros) => {
                if *micros > TEMPO_MAX {
                    return Err(Error::OutOfRange {
                        what: "tempo",
                        value: *micros as u64,
                        max: TEMPO_MAX as u64,
                    });
                }
                Ok(())
            }
            Message::SysEx(frame) => {
                if frame.len() < 2 || frame[0] != 0xF0 || frame[frame.len() - 1] != 0xF7 {
                    return Err(Error::MalformedSysEx);
                }
                Ok(())
            }
            Message::TrackName(_) | Message::EndOfTrack => Ok(()),
        }
    }
}

fn check_data(what: &'static str, value: u8) -> Result<()> {
    if value > DATA_MAX {
        return Err(Error::OutOfRange {
            what,
            value: value as u64,
            max: DATA_MAX as u64,
        });
    }
    Ok(())
}

fn check_channel(channel: u8) -> Result<()> {
    if channel > CHANNEL_MAX {
        return Err(Error::OutOfRange {
            what: "channel",
            value: channel as u64,
            max: CHANNEL_MAX as u64,
        });
    }
    Ok(())
}
