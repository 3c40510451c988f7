use crate::config::{GAIN_FULL, SAMPLES_PER_CYCLE};

use super::tone_state::ToneState;
use super::waveform::SQUARE_WAVE;

/// DAC channel the sampler drives.
pub trait SampleOutput {
    fn write_sample(&mut self, sample: u8);
}

/// Free running timer with a compare channel that raises the sampler interrupt.
pub trait CompareTimer {
    fn compare(&self) -> u32;
    fn set_compare(&mut self, compare: u32);
}

/// Interrupt side of the tone engine. Called once per tick interval, it steps
/// through the waveform table, writes the gain scaled sample to the DAC and
/// arms the next compare.
///
/// Must not allocate, block or log, and is not reentrant: one instance per
/// hardware timer, owned by that timer's interrupt.
pub struct Sampler {
    phase: u8,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    pub const fn new() -> Sampler {
        // the first tick advances to the high level
        Sampler { phase: 0 }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// `raw` scaled to `gain` percent, truncating.
    pub const fn scale(raw: u8, gain: u8) -> u8 {
        (raw as u16 * gain as u16 / GAIN_FULL as u16) as u8
    }

    pub fn on_tick<O: SampleOutput, T: CompareTimer>(&mut self, tone_state: &ToneState, output: &mut O, timer: &mut T) {
        self.phase = (self.phase + 1) % SAMPLES_PER_CYCLE as u8;

        let gain = tone_state.gain();
        let sample = Sampler::scale(SQUARE_WAVE[self.phase as usize], gain);
        output.write_sample(sample);

        // accumulate from the previous compare rather than the counter so a
        // retune mid note keeps the waveform phase continuous
        let next_compare = timer.compare().wrapping_add(tone_state.tick_interval());
        timer.set_compare(next_compare);
    }
}
