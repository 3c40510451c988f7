use core::num::NonZeroU32;

use crate::config::SAMPLES_PER_CYCLE;

use super::note::Note;

/// Timer ticks between two waveform samples so that one full table cycle
/// takes `1 / frequency` seconds.
///
/// Integer division truncates, so the played frequency comes out slightly
/// sharp of the request (C4 at 32768 Hz: 32768 / 262 / 2 = 62 ticks, 264.3 Hz).
/// `frequency` is non-zero by type, a 0 Hz request can't reach the division.
pub const fn tick_interval(tick_rate_hz: u32, frequency: NonZeroU32, samples_per_cycle: NonZeroU32) -> u32 {
    tick_rate_hz / frequency.get() / samples_per_cycle.get()
}

pub const fn note_tick_interval(tick_rate_hz: u32, note: Note) -> u32 {
    let samples_per_cycle = match NonZeroU32::new(SAMPLES_PER_CYCLE) {
        Some(samples) => samples,
        None => NonZeroU32::MIN,
    };

    tick_interval(tick_rate_hz, note.hz(), samples_per_cycle)
}

/// Frequency the sampler actually produces for a given tick interval.
pub const fn played_frequency(tick_rate_hz: u32, tick_interval: u32) -> u32 {
    if tick_interval == 0 {
        return 0;
    }

    tick_rate_hz / (tick_interval * SAMPLES_PER_CYCLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TICK_RATE_HZ;

    #[test]
    fn c4_at_aclk() {
        assert_eq!(note_tick_interval(DEFAULT_TICK_RATE_HZ, Note::C4), 62);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        // 32768 / 350 / 2 = 46.81
        assert_eq!(note_tick_interval(DEFAULT_TICK_RATE_HZ, Note::F4), 46);
        // 32768 / 988 / 2 = 16.58
        assert_eq!(note_tick_interval(DEFAULT_TICK_RATE_HZ, Note::B5), 16);
    }

    #[test]
    fn every_note_matches_formula() {
        for note in Note::ALL {
            let expected = DEFAULT_TICK_RATE_HZ / note.hz().get() / 2;
            assert_eq!(note_tick_interval(DEFAULT_TICK_RATE_HZ, note), expected);
        }
    }

    #[test]
    fn played_frequency_is_never_flat() {
        for note in Note::ALL {
            let ticks = note_tick_interval(DEFAULT_TICK_RATE_HZ, note);
            assert!(played_frequency(DEFAULT_TICK_RATE_HZ, ticks) >= note.hz().get());
        }
    }

    #[test]
    fn generic_sample_count() {
        let hz = NonZeroU32::new(1000).unwrap();
        let samples = NonZeroU32::new(4).unwrap();
        assert_eq!(tick_interval(1_000_000, hz, samples), 250);
    }
}
