//! Two-voice flute demo: an eight-bar treble melody over whole-note bass,
//! followed by a solo track that enters once the melody has finished.

use tunesmith_smf::{gm, Sequence, SequenceBuilder};

const QUARTER: u64 = 60;

/// Treble line as (semitone offset from middle C, duration in ticks).
const TREBLE: [(i8, u64); 15] = [
    (4, QUARTER),
    (4, QUARTER),
    (5, QUARTER),
    (7, QUARTER),
    (7, QUARTER),
    (5, QUARTER),
    (4, QUARTER),
    (2, QUARTER),
    (0, QUARTER),
    (0, QUARTER),
    (2, QUARTER),
    (4, QUARTER),
    (4, QUARTER + QUARTER / 2),
    (2, QUARTER / 2),
    (2, QUARTER * 2),
];

/// Bass line, one whole note per bar.
const BASS: [(i8, u64); 4] = [
    (-12, QUARTER * 4),
    (-3, QUARTER * 4),
    (-12, QUARTER * 4),
    (-3, QUARTER * 4),
];

/// Forty quarter-note solo offsets, a run down and back over two octaves.
const SOLO: [i8; 40] = [
    11, 9, 7, 5, 4, 2, 0, -1, -3, -5, -7, -8, -10, -12, -10, -8, -7, -5, -3, -1, 0, 2, 4, 5, 7, 9,
    11, 9, 7, 4, 0, -3, -7, -12, -7, -3, 0, 4, 7, 11,
];

fn key(offset: i8) -> u8 {
    (gm::MIDDLE_C as i16 + offset as i16) as u8
}

pub(crate) fn sequence() -> tunesmith_smf::Result<Sequence> {
    let mut builder = SequenceBuilder::new();

    let treble = builder.create_track("Treble Track")?;
    let bass = builder.create_track("Treble Track")?;
    let solo = builder.create_track("Epic Solo Not Flute Drop")?;
    for track in [treble, bass, solo] {
        builder.set_voice(track, gm::FLUTE)?;
    }

    for (offset, duration) in TREBLE {
        builder.add_note(treble, key(offset), duration)?;
    }
    for (offset, duration) in BASS {
        builder.add_note(bass, key(offset), duration)?;
    }

    // The solo waits out the whole melody before its first note.
    let melody_end = builder.cursor(treble, 0);
    builder.advance(solo, 0, melody_end);
    for offset in SOLO {
        builder.add_note(solo, key(offset), QUARTER)?;
    }

    builder.end_track(treble);
    builder.end_track(bass);
    builder.end_track(solo);
    Ok(builder.finish())
}
