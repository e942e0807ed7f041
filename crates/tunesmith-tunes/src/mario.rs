//! The Super Mario Bros. overworld theme on a square synth lead.
//!
//! One melody track; every note lasts a quarter while the rest before it
//! carries the rhythm, so the line reads as (offset, rest) pairs.

use tunesmith_smf::{gm, Sequence, SequenceBuilder};

const SIXTEENTH: u64 = 8;
const QUARTER: u64 = SIXTEENTH * 2;
const HALF: u64 = QUARTER * 2;
const WHOLE: u64 = HALF * 2;

/// Melody as (semitone offset from middle C, rest before the note).
const MELODY: [(i8, u64); 130] = [
    (16, 0),
    (16, SIXTEENTH),
    (16, HALF),
    (12, HALF),
    (16, SIXTEENTH),
    (19, HALF),
    // first phrase
    (12, QUARTER + HALF + WHOLE + WHOLE),
    (7, WHOLE - SIXTEENTH),
    (4, WHOLE - SIXTEENTH),
    (9, WHOLE - SIXTEENTH),
    (11, HALF),
    (10, HALF),
    (9, SIXTEENTH),
    (7, HALF),
    (16, QUARTER),
    (19, QUARTER),
    (21, QUARTER),
    (17, HALF),
    (19, SIXTEENTH),
    (16, HALF),
    (12, HALF),
    (14, SIXTEENTH),
    (11, SIXTEENTH),
    // first phrase, repeated
    (12, WHOLE - SIXTEENTH),
    (7, WHOLE - SIXTEENTH),
    (4, WHOLE - SIXTEENTH),
    (9, WHOLE - SIXTEENTH),
    (11, HALF),
    (10, HALF),
    (9, SIXTEENTH),
    (7, HALF),
    (16, QUARTER),
    (19, QUARTER),
    (21, QUARTER),
    (17, HALF),
    (19, SIXTEENTH),
    (16, HALF),
    (12, HALF),
    (14, SIXTEENTH),
    (11, SIXTEENTH),
    // second phrase
    (19, (WHOLE - SIXTEENTH) + WHOLE - QUARTER),
    (18, SIXTEENTH),
    (17, SIXTEENTH),
    (15, SIXTEENTH),
    (16, HALF),
    (8, HALF),
    (9, SIXTEENTH),
    (12, SIXTEENTH),
    (9, HALF),
    (12, SIXTEENTH),
    (14, SIXTEENTH),
    (19, SIXTEENTH + WHOLE - QUARTER),
    (18, SIXTEENTH),
    (17, SIXTEENTH),
    (15, SIXTEENTH),
    (16, HALF),
    (24, HALF),
    (24, HALF),
    (24, SIXTEENTH),
    (19, (SIXTEENTH + WHOLE) + WHOLE - QUARTER),
    (18, SIXTEENTH),
    (17, SIXTEENTH),
    (15, SIXTEENTH),
    (16, HALF),
    (8, HALF),
    (9, SIXTEENTH),
    (12, SIXTEENTH),
    (9, HALF),
    (12, SIXTEENTH),
    (14, SIXTEENTH),
    (15, SIXTEENTH + WHOLE - SIXTEENTH),
    (14, WHOLE),
    (12, WHOLE),
    // second phrase, repeated
    (19, (SIXTEENTH + QUARTER + WHOLE + WHOLE) + WHOLE - QUARTER),
    (18, SIXTEENTH),
    (17, SIXTEENTH),
    (15, SIXTEENTH),
    (16, HALF),
    (8, HALF),
    (9, SIXTEENTH),
    (12, SIXTEENTH),
    (9, HALF),
    (12, SIXTEENTH),
    (14, SIXTEENTH),
    (19, SIXTEENTH + WHOLE - SIXTEENTH),
    (18, SIXTEENTH),
    (17, SIXTEENTH),
    (15, SIXTEENTH),
    (16, HALF),
    (24, HALF),
    (24, HALF),
    (24, SIXTEENTH),
    (19, (SIXTEENTH + WHOLE) + WHOLE - QUARTER),
    (18, SIXTEENTH),
    (17, SIXTEENTH),
    (15, SIXTEENTH),
    (16, HALF),
    (8, HALF),
    (9, SIXTEENTH),
    (12, SIXTEENTH),
    (9, HALF),
    (12, SIXTEENTH),
    (14, SIXTEENTH),
    (15, SIXTEENTH + WHOLE - SIXTEENTH),
    (14, WHOLE),
    (12, WHOLE),
    // coda
    (12, SIXTEENTH + QUARTER + WHOLE + WHOLE),
    (12, SIXTEENTH),
    (12, HALF),
    (12, HALF),
    (14, SIXTEENTH),
    (16, HALF),
    (12, SIXTEENTH),
    (9, HALF),
    (7, SIXTEENTH),
    (12, QUARTER + WHOLE),
    (12, SIXTEENTH),
    (12, HALF),
    (12, HALF),
    (14, SIXTEENTH),
    (16, SIXTEENTH),
    (12, SIXTEENTH + WHOLE + WHOLE + WHOLE),
    (12, SIXTEENTH),
    (12, HALF),
    (12, HALF),
    (14, SIXTEENTH),
    (16, HALF),
    (12, SIXTEENTH),
    (9, HALF),
    (7, SIXTEENTH),
];

pub(crate) fn sequence() -> tunesmith_smf::Result<Sequence> {
    let mut builder = SequenceBuilder::new();

    let melody = builder.create_track("Melody Track")?;
    builder.set_voice(melody, gm::LEAD_1_SQUARE)?;
    for (offset, rest) in MELODY {
        let key = (gm::MIDDLE_C as i16 + offset as i16) as u8;
        builder.add_note_after(melody, key, rest, QUARTER)?;
    }
    builder.end_track(melody);
    Ok(builder.finish())
}
