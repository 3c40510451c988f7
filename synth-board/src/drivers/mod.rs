pub mod dac_sampler;
pub mod keypad;
pub mod lcd;
