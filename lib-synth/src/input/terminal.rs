use heapless::String;

use crate::audio::note::Note;
use crate::audio::songs::SongId;
use crate::config::TERMINAL_LINE_CAPACITY;

use super::Request;

pub const HELP_COMMAND: &str = "help";
pub const DEMO_COMMAND: &str = "DEMO";

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

pub type CommandLine = String<TERMINAL_LINE_CAPACITY>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandStatus {
    Accepted,
    Unknown,
}

/// Case sensitive match of one terminal line, surrounding whitespace ignored.
pub fn decode_command(line: &str) -> Option<Request> {
    let command = line.trim_matches(|c: char| c.is_ascii_whitespace());

    match command {
        HELP_COMMAND => Some(Request::Help),
        DEMO_COMMAND => Some(Request::PlaySong(SongId::Demo)),
        _ => Note::from_keyboard_name(command).map(Request::PlayNote),
    }
}

/// Assembles received bytes into command lines.
pub struct LineBuffer {
    line: CommandLine,
    overflowed: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub const fn new() -> LineBuffer {
        LineBuffer {
            line: String::new(),
            overflowed: false,
        }
    }

    /// Feeds one byte, returns the finished line on CR or LF.
    ///
    /// Empty lines and lines longer than the buffer are dropped. Non ASCII
    /// bytes are ignored.
    pub fn push(&mut self, byte: u8) -> Option<CommandLine> {
        match byte {
            b'\r' | b'\n' => {
                let overflowed = core::mem::replace(&mut self.overflowed, false);
                let line = core::mem::take(&mut self.line);

                if overflowed {
                    warn!("terminal line longer than {} bytes dropped", TERMINAL_LINE_CAPACITY);
                    None
                } else if line.is_empty() {
                    None
                } else {
                    Some(line)
                }
            },
            BACKSPACE | DELETE => {
                self.line.pop();
                None
            },
            byte if byte.is_ascii() && !byte.is_ascii_control() => {
                if self.line.push(byte as char).is_err() {
                    self.overflowed = true;
                }
                None
            },
            _ => None,
        }
    }
}

/// Control reference printed by the `help` command, one terminal line each.
pub const HELP_TEXT: [&str; 38] = [
    "DAC synth controls",
    "Keypad:",
    "  1 plays C4 (c')",
    "  2 plays D4 (d')",
    "  3 plays E4 (e')",
    "  A plays F4 (f')",
    "  4 plays G4 (g')",
    "  5 plays A4 (a')",
    "  6 plays B4 (h')",
    "  7 plays C5 (c'')",
    "  8 plays D5 (d'')",
    "  9 plays E5 (e'')",
    "  C plays F5 (f'')",
    "  * plays G5 (g'')",
    "  0 plays A5 (a'')",
    "  # plays B5 (h'')",
    "  D plays the demo song",
    "Terminal:",
    "  C4 plays C4 (c')",
    "  D4 plays D4 (d')",
    "  E4 plays E4 (e')",
    "  F4 plays F4 (f')",
    "  G4 plays G4 (g')",
    "  A4 plays A4 (a')",
    "  B4 plays B4 (h')",
    "  C5 plays C5 (c'')",
    "  D5 plays D5 (d'')",
    "  E5 plays E5 (e'')",
    "  F5 plays F5 (f'')",
    "  G5 plays G5 (g'')",
    "  A5 plays A5 (a'')",
    "  B5 plays B5 (h'')",
    "  DEMO plays the demo song",
    "  help prints this text",
    "Commands are case sensitive.",
    "Each note sounds for 300 ms, the demo",
    "can't be interrupted once started.",
    "",
];

pub const BANNER_TEXT: [&str; 5] = [
    "DAC SYNTH",
    "The tone is generated on DAC1 channel 1 (PA4).",
    "Connect a speaker between PA4 and GND.",
    "Play from the keypad or from this terminal.",
    "Type 'help' for the controls.",
];
