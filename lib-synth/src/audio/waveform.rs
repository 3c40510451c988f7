use crate::config::SAMPLES_PER_CYCLE;

pub const SAMPLE_LOW: u8 = 0;
pub const SAMPLE_HIGH: u8 = u8::MAX;

/// One period of the square wave, cycled by the sampler.
pub const SQUARE_WAVE: [u8; SAMPLES_PER_CYCLE as usize] = [SAMPLE_LOW, SAMPLE_HIGH];

/// Largest raw sample in the table, the DAC value at full gain.
pub const fn waveform_max(table: &[u8]) -> u8 {
    let mut max = 0;
    let mut i = 0;
    while i < table.len() {
        if table[i] > max {
            max = table[i];
        }
        i += 1;
    }

    max
}
