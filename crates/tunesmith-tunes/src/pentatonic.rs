//! Minor-pentatonic runs on distortion guitar: fifteen laps up and back
//! down the scale from middle C.

use tunesmith_smf::{gm, Sequence, SequenceBuilder};

/// Minor-pentatonic scale degrees in semitones.
const DEGREES: [i8; 5] = [0, 3, 5, 7, 10];

const NOTE_TICKS: u64 = 20;
const REPS: usize = 15;

pub(crate) fn sequence() -> tunesmith_smf::Result<Sequence> {
    let mut builder = SequenceBuilder::new();

    let track = builder.create_track("Pentatonic Track")?;
    builder.set_voice(track, gm::DISTORTION_GUITAR)?;
    for _ in 0..REPS {
        for degree in DEGREES.iter().chain(DEGREES.iter().rev()) {
            builder.add_note(track, (gm::MIDDLE_C as i16 + *degree as i16) as u8, NOTE_TICKS)?;
        }
    }
    builder.end_track(track);
    Ok(builder.finish())
}
