use core::sync::atomic::{AtomicU16, AtomicU32, AtomicU8, Ordering};

use num_traits::clamp;

use crate::config::{GAIN_FULL, GAIN_MUTED};

use super::note::Note;
use super::tick::note_tick_interval;

/// Tone parameters shared between the foreground player and the sampler
/// interrupt.
///
/// The foreground is the only writer of every field here. The sampler reads
/// `tick_interval` and `gain` and keeps its waveform phase to itself.
///
/// Update order: `retune` publishes the new tick interval before `open_gain`
/// raises the gain, so the sampler never runs a stale interval at full volume.
/// A tick firing between the frequency and tick interval stores sees at most one
/// sample of the previous interval.
pub struct ToneState {
    tick_rate_hz: u32,

    frequency: AtomicU16,
    tick_interval: AtomicU32,
    gain: AtomicU8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneSnapshot {
    pub frequency: u16,
    pub tick_interval: u32,
    pub gain: u8,
}

impl ToneState {
    pub const fn new(tick_rate_hz: u32, default_note: Note) -> ToneState {
        ToneState {
            tick_rate_hz,
            frequency: AtomicU16::new(default_note as u16),
            tick_interval: AtomicU32::new(note_tick_interval(tick_rate_hz, default_note)),
            gain: AtomicU8::new(GAIN_MUTED),
        }
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    pub fn frequency(&self) -> u16 {
        self.frequency.load(Ordering::Relaxed)
    }

    pub fn tick_interval(&self) -> u32 {
        self.tick_interval.load(Ordering::Acquire)
    }

    pub fn gain(&self) -> u8 {
        self.gain.load(Ordering::Acquire)
    }

    pub fn interval_for(&self, note: Note) -> u32 {
        note_tick_interval(self.tick_rate_hz, note)
    }

    /// Sets the frequency and recomputes the tick interval from it.
    pub fn retune(&self, note: Note) {
        self.frequency.store(note as u16, Ordering::Relaxed);
        self.tick_interval.store(self.interval_for(note), Ordering::Release);
    }

    pub fn set_gain(&self, gain: u8) {
        self.gain.store(clamp(gain, GAIN_MUTED, GAIN_FULL), Ordering::Release);
    }

    pub fn open_gain(&self) {
        self.set_gain(GAIN_FULL);
    }

    pub fn close_gain(&self) {
        self.set_gain(GAIN_MUTED);
    }

    /// Consistent view of the foreground fields, read with interrupts masked.
    pub fn snapshot(&self) -> ToneSnapshot {
        critical_section::with(|_| ToneSnapshot {
            frequency: self.frequency(),
            tick_interval: self.tick_interval(),
            gain: self.gain(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TICK_RATE_HZ;

    #[test]
    fn starts_muted_on_default_note() {
        let state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
        assert_eq!(
            state.snapshot(),
            ToneSnapshot { frequency: 262, tick_interval: 62, gain: 0 }
        );
    }

    #[test]
    fn retune_recomputes_interval() {
        let state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
        state.retune(Note::A4);
        assert_eq!(state.frequency(), 440);
        assert_eq!(state.tick_interval(), 32_768 / 440 / 2);
        assert_eq!(state.gain(), 0);
    }

    #[test]
    fn gain_is_clamped() {
        let state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
        state.set_gain(250);
        assert_eq!(state.gain(), 100);
        state.close_gain();
        assert_eq!(state.gain(), 0);
    }
}
