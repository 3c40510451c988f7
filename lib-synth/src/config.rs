use embassy_time::Duration;

use crate::audio::note::Note;

// ACLK on the reference hardware, the sampler compare timer counts at this rate
pub const DEFAULT_TICK_RATE_HZ: u32 = 32_768;

// square wave, one low and one high sample per period
pub const SAMPLES_PER_CYCLE: u32 = 2;

pub const GAIN_MUTED: u8 = 0;
pub const GAIN_FULL: u8 = 100;

// below this many ticks between samples the ISR can no longer keep up
pub const MIN_TICK_INTERVAL: u32 = 4;

pub const DEFAULT_NOTE: Note = Note::C4;

pub const SINGLE_NOTE_DURATION: Duration = Duration::from_millis(300);
pub const MELODY_NOTE_DURATION: Duration = Duration::from_millis(150);

pub const TERMINAL_LINE_CAPACITY: usize = 16;

// 2 line character LCD, 16 columns per line
pub const LCD_COLUMNS: usize = 16;
pub const LCD_ROWS: usize = 2;
