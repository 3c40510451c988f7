use crate::audio::note::Note;
use crate::audio::songs::SongId;

pub mod keypad;
pub mod terminal;

/// What a decoded keypad press or terminal command asks the instrument to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    PlayNote(Note),
    PlaySong(SongId),
    Help,
}
