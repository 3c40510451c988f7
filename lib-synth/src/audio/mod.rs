pub mod note;
pub mod sampler;
pub mod songs;
pub mod tick;
pub mod tone_player;
pub mod tone_state;
pub mod waveform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    UnplayablePitch,
    NoMelodyLoaded,
}
