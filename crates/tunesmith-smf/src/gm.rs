//! General MIDI reference constants.
//!
//! Key numbers follow the GM convention where middle C is 0x3C; program
//! numbers index the GM Level 1 instrument table (zero-based, so "Acoustic
//! Grand Piano" patch 1 is program 0).

/// Middle C (C4), the reference point for melodic offsets.
pub const MIDDLE_C: u8 = 0x3C;

/// Acoustic Grand Piano, the power-on default program.
pub const PIANO: u8 = 0x00;

/// Distortion Guitar (patch 31).
pub const DISTORTION_GUITAR: u8 = 30;

/// Flute (patch 74).
pub const FLUTE: u8 = 0x49;

/// Lead 1 "square" synth lead (patch 81).
pub const LEAD_1_SQUARE: u8 = 0x50;
