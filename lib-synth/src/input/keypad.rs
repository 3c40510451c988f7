use crate::audio::note::Note;
use crate::audio::songs::SongId;

use super::Request;

pub const KEYPAD_ROWS: usize = 4;
pub const KEYPAD_COLS: usize = 4;

/// Keys of the 4x4 matrix, discriminant is `row * 4 + col`.
///
/// ```text
/// 1 2 3 A
/// 4 5 6 B
/// 7 8 9 C
/// * 0 # D
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Key {
    K1 = 0, K2 = 1, K3 = 2, KA = 3,
    K4 = 4, K5 = 5, K6 = 6, KB = 7,
    K7 = 8, K8 = 9, K9 = 10, KC = 11,
    Star = 12, K0 = 13, Hash = 14, KD = 15,
}

impl Key {
    const LAYOUT: [[Key; KEYPAD_COLS]; KEYPAD_ROWS] = [
        [Key::K1, Key::K2, Key::K3, Key::KA],
        [Key::K4, Key::K5, Key::K6, Key::KB],
        [Key::K7, Key::K8, Key::K9, Key::KC],
        [Key::Star, Key::K0, Key::Hash, Key::KD],
    ];

    pub const fn at(row: usize, col: usize) -> Option<Key> {
        if row < KEYPAD_ROWS && col < KEYPAD_COLS {
            Some(Key::LAYOUT[row][col])
        } else {
            None
        }
    }

    pub const fn mask(self) -> u16 {
        1 << self as u8
    }

    pub const fn label(self) -> char {
        match self {
            Key::K1 => '1',
            Key::K2 => '2',
            Key::K3 => '3',
            Key::KA => 'A',
            Key::K4 => '4',
            Key::K5 => '5',
            Key::K6 => '6',
            Key::KB => 'B',
            Key::K7 => '7',
            Key::K8 => '8',
            Key::K9 => '9',
            Key::KC => 'C',
            Key::Star => '*',
            Key::K0 => '0',
            Key::Hash => '#',
            Key::KD => 'D',
        }
    }

    /// Action bound to the key, `B` has none.
    pub const fn request(self) -> Option<Request> {
        let note = match self {
            Key::K1 => Note::C4,
            Key::K2 => Note::D4,
            Key::K3 => Note::E4,
            Key::KA => Note::F4,
            Key::K4 => Note::G4,
            Key::K5 => Note::A4,
            Key::K6 => Note::B4,
            Key::K7 => Note::C5,
            Key::K8 => Note::D5,
            Key::K9 => Note::E5,
            Key::KC => Note::F5,
            Key::Star => Note::G5,
            Key::K0 => Note::A5,
            Key::Hash => Note::B5,
            Key::KD => return Some(Request::PlaySong(SongId::Demo)),
            Key::KB => return None,
        };

        Some(Request::PlayNote(note))
    }
}

// when several keys are down the first one in this list wins
const DECODE_PRIORITY: [Key; 15] = [
    Key::K1, Key::K2, Key::K3, Key::KA,
    Key::K4, Key::K5, Key::K6,
    Key::K7, Key::K8, Key::K9, Key::KC,
    Key::Star, Key::K0, Key::Hash,
    Key::KD,
];

/// Keys held down during one matrix scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet(u16);

impl KeySet {
    pub const EMPTY: KeySet = KeySet(0);

    pub const fn from_bits(bits: u16) -> KeySet {
        KeySet(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, key: Key) -> bool {
        self.0 & key.mask() != 0
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.mask();
    }

    pub fn set_pressed(&mut self, row: usize, col: usize) {
        if let Some(key) = Key::at(row, col) {
            self.insert(key);
        }
    }

    /// The highest priority bound key that is down and its action.
    pub fn decode(self) -> Option<(Key, Request)> {
        DECODE_PRIORITY
            .iter()
            .copied()
            .filter(|key| self.contains(*key))
            .find_map(|key| key.request().map(|request| (key, request)))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut keys = KeySet::EMPTY;
        for key in iter {
            keys.insert(key);
        }

        keys
    }
}
