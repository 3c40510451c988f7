use embassy_time::Duration;

use crate::config::MELODY_NOTE_DURATION;

use super::note::{Beat, Melody, Note};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SongId {
    Demo,
}

impl SongId {
    pub fn melody(self) -> &'static Melody {
        match self {
            SongId::Demo => &DEMO_SONG,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            SongId::Demo => "demo",
        }
    }
}

const fn note(note: Note) -> Beat {
    Beat::Note { note, duration: MELODY_NOTE_DURATION }
}

const fn rest(ms: u64) -> Beat {
    Beat::Rest(Duration::from_millis(ms))
}

// Super Mario Bros. overworld theme opening, every note 150 ms.
// Adjacent notes have no gap between them other than the gain closing.
pub static DEMO_SONG: [Beat; 97] = [
    // phrase 1
    note(Note::E4),
    note(Note::E4),
    rest(150),
    note(Note::E4),
    note(Note::C4),
    note(Note::E4),
    rest(150),
    note(Note::G4),
    rest(450),
    note(Note::G3),
    rest(450),

    // phrase 2
    note(Note::C4),
    rest(300),
    note(Note::G3),
    rest(300),
    note(Note::E3),
    rest(300),
    note(Note::A3),
    rest(150),
    note(Note::B3),
    rest(150),
    note(Note::As3),
    note(Note::A3),
    rest(150),

    // phrase 3
    note(Note::G3),
    note(Note::E4),
    rest(150),
    note(Note::G4),
    note(Note::A4),
    rest(150),
    note(Note::F4),
    note(Note::G4),
    rest(150),
    note(Note::E4),
    rest(150),
    note(Note::C4),
    note(Note::D4),
    note(Note::B3),
    rest(300),

    // phrase 4
    rest(300),
    note(Note::G4),
    note(Note::Fs4),
    note(Note::F4),
    note(Note::Ds4),
    rest(150),
    note(Note::E4),
    rest(150),
    note(Note::Gs3),
    note(Note::A3),
    note(Note::C4),
    rest(150),
    note(Note::A3),
    note(Note::C4),
    note(Note::D4),

    // phrase 5
    rest(300),
    note(Note::G4),
    note(Note::Fs4),
    note(Note::F4),
    note(Note::Ds4),
    rest(150),
    note(Note::E4),
    rest(150),
    note(Note::C5),
    rest(150),
    note(Note::C5),
    note(Note::C5),
    rest(450),

    // phrase 6
    rest(300),
    note(Note::Ds4),
    rest(300),
    note(Note::D4),
    rest(300),
    note(Note::C4),
    rest(1050),

    // phrase 7
    note(Note::C4),
    note(Note::C4),
    rest(150),
    note(Note::C4),
    rest(150),
    note(Note::C4),
    note(Note::D4),
    rest(150),
    note(Note::E4),
    note(Note::C4),
    rest(150),
    note(Note::A3),
    note(Note::G3),
    rest(450),

    // phrase 8
    note(Note::C4),
    note(Note::C4),
    rest(150),
    note(Note::C4),
    rest(150),
    note(Note::C4),
    note(Note::D4),
    note(Note::E4),
    rest(1050),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_opens_with_the_theme() {
        let opening: [Option<Note>; 4] = [Some(Note::E4), Some(Note::E4), None, Some(Note::E4)];
        for (beat, expected) in DEMO_SONG.iter().zip(opening) {
            match (beat, expected) {
                (Beat::Note { note, duration: _ }, Some(expected)) => assert_eq!(*note, expected),
                (Beat::Rest(_), None) => { },
                _ => panic!("demo opening out of order"),
            }
        }
    }

    #[test]
    fn demo_notes_are_uniform_length() {
        for beat in DEMO_SONG.iter() {
            if let Beat::Note { note: _, duration } = beat {
                assert_eq!(*duration, MELODY_NOTE_DURATION);
            }
        }
    }

    #[test]
    fn demo_runtime() {
        let total_ms: u64 = DEMO_SONG.iter().map(|beat| beat.duration().as_millis()).sum();
        // 61 notes at 150 ms plus the authored rests
        assert_eq!(total_ms, 61 * 150 + 21 * 150 + 9 * 300 + 4 * 450 + 2 * 1050);
        assert!(matches!(DEMO_SONG[DEMO_SONG.len() - 1], Beat::Rest(_)));
    }
}
