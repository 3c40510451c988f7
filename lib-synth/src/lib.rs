#![cfg_attr(not(test), no_std)]

// must stay first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

pub mod audio;
pub mod config;
pub mod input;
pub mod synth;
