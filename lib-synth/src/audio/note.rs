use core::num::NonZeroU32;

use embassy_time::Duration;

/// Equal tempered pitches (A4 = 440 Hz) with the fractional Hz rounded up,
/// e.g. F4 = 349.23 Hz is stored as 350 Hz. The discriminant is the frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Note {
    E3 = 165,
    G3 = 196,
    Gs3 = 208,
    A3 = 220,
    As3 = 234,
    B3 = 247,

    C4 = 262,
    D4 = 294,
    Ds4 = 312,
    E4 = 330,
    F4 = 350,
    Fs4 = 370,
    G4 = 392,
    Gs4 = 416,
    A4 = 440,
    As4 = 467,
    B4 = 494,

    C5 = 524,
    D5 = 588,
    Ds5 = 623,
    E5 = 660,
    F5 = 699,
    G5 = 784,
    A5 = 880,
    B5 = 988,
}

impl Note {
    /// Notes reachable from the keypad and the terminal, low to high.
    pub const KEYBOARD: [Note; 14] = [
        Note::C4, Note::D4, Note::E4, Note::F4, Note::G4, Note::A4, Note::B4,
        Note::C5, Note::D5, Note::E5, Note::F5, Note::G5, Note::A5, Note::B5,
    ];

    pub const ALL: [Note; 25] = [
        Note::E3, Note::G3, Note::Gs3, Note::A3, Note::As3, Note::B3,
        Note::C4, Note::D4, Note::Ds4, Note::E4, Note::F4, Note::Fs4, Note::G4,
        Note::Gs4, Note::A4, Note::As4, Note::B4,
        Note::C5, Note::D5, Note::Ds5, Note::E5, Note::F5, Note::G5, Note::A5, Note::B5,
    ];

    pub const fn hz(self) -> NonZeroU32 {
        match NonZeroU32::new(self as u16 as u32) {
            Some(hz) => hz,
            // every discriminant above is non-zero
            None => NonZeroU32::MIN,
        }
    }

    /// Scientific pitch name, also the terminal command for keyboard notes.
    pub const fn name(self) -> &'static str {
        match self {
            Note::E3 => "E3",
            Note::G3 => "G3",
            Note::Gs3 => "G#3",
            Note::A3 => "A3",
            Note::As3 => "A#3",
            Note::B3 => "B3",
            Note::C4 => "C4",
            Note::D4 => "D4",
            Note::Ds4 => "D#4",
            Note::E4 => "E4",
            Note::F4 => "F4",
            Note::Fs4 => "F#4",
            Note::G4 => "G4",
            Note::Gs4 => "G#4",
            Note::A4 => "A4",
            Note::As4 => "A#4",
            Note::B4 => "B4",
            Note::C5 => "C5",
            Note::D5 => "D5",
            Note::Ds5 => "D#5",
            Note::E5 => "E5",
            Note::F5 => "F5",
            Note::G5 => "G5",
            Note::A5 => "A5",
            Note::B5 => "B5",
        }
    }

    /// Helmholtz pitch name (c' is middle C), shown next to the scientific
    /// name on the display.
    pub const fn helmholtz(self) -> &'static str {
        match self {
            Note::E3 => "e",
            Note::G3 => "g",
            Note::Gs3 => "gis",
            Note::A3 => "a",
            Note::As3 => "ais",
            Note::B3 => "h",
            Note::C4 => "c'",
            Note::D4 => "d'",
            Note::Ds4 => "dis'",
            Note::E4 => "e'",
            Note::F4 => "f'",
            Note::Fs4 => "fis'",
            Note::G4 => "g'",
            Note::Gs4 => "gis'",
            Note::A4 => "a'",
            Note::As4 => "ais'",
            Note::B4 => "h'",
            Note::C5 => "c''",
            Note::D5 => "d''",
            Note::Ds5 => "dis''",
            Note::E5 => "e''",
            Note::F5 => "f''",
            Note::G5 => "g''",
            Note::A5 => "a''",
            Note::B5 => "h''",
        }
    }

    pub fn from_keyboard_name(name: &str) -> Option<Note> {
        Note::KEYBOARD.iter().copied().find(|note| note.name() == name)
    }
}

pub enum Beat {
    Note { note: Note, duration: Duration },
    Rest(Duration),
}

impl Beat {
    pub const fn duration(&self) -> Duration {
        match self {
            Beat::Note { note: _, duration } => *duration,
            Beat::Rest(duration) => *duration,
        }
    }
}

pub type Melody = [Beat];

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_tempered_hz(semitones_from_a4: i32) -> f64 {
        440.0 * 2f64.powf(semitones_from_a4 as f64 / 12.0)
    }

    #[test]
    fn frequencies_round_fraction_up() {
        let offsets: [(Note, i32); 25] = [
            (Note::E3, -17), (Note::G3, -14), (Note::Gs3, -13), (Note::A3, -12),
            (Note::As3, -11), (Note::B3, -10), (Note::C4, -9), (Note::D4, -7),
            (Note::Ds4, -6), (Note::E4, -5), (Note::F4, -4), (Note::Fs4, -3),
            (Note::G4, -2), (Note::Gs4, -1), (Note::A4, 0), (Note::As4, 1),
            (Note::B4, 2), (Note::C5, 3), (Note::D5, 5), (Note::Ds5, 6),
            (Note::E5, 7), (Note::F5, 8), (Note::G5, 10), (Note::A5, 12),
            (Note::B5, 14),
        ];

        for (note, offset) in offsets {
            // trim float noise on exact pitches such as G4 = 391.995 vs A = 440.000
            let exact = (equal_tempered_hz(offset) * 1000.0).round() / 1000.0;
            assert_eq!(note.hz().get(), exact.ceil() as u32, "{}", note.name());
        }
    }

    #[test]
    fn keyboard_names_resolve() {
        for note in Note::KEYBOARD {
            assert_eq!(Note::from_keyboard_name(note.name()), Some(note));
        }
    }

    #[test]
    fn melody_only_notes_are_not_keyboard_names() {
        assert_eq!(Note::from_keyboard_name("G3"), None);
        assert_eq!(Note::from_keyboard_name("D#4"), None);
        assert_eq!(Note::from_keyboard_name("c4"), None);
        assert_eq!(Note::from_keyboard_name(""), None);
    }
}
