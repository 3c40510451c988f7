use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::audio::AudioError;
use crate::audio::tone_player::TonePlayer;
use crate::config::{LCD_COLUMNS, SINGLE_NOTE_DURATION};
use crate::input::keypad::KeySet;
use crate::input::terminal::{decode_command, CommandStatus, BANNER_TEXT, HELP_TEXT};
use crate::input::Request;

pub const TITLE_LABEL: &str = "DAC synth";
pub const DEMO_LABEL: &str = "Playing demo";

pub type Label = String<LCD_COLUMNS>;

/// Character display showing what is playing. `show` replaces the previous text.
pub trait TextDisplay {
    fn show(&mut self, text: &str);
}

/// Line oriented terminal output.
pub trait Console {
    fn write_line(&mut self, line: &str);
}

/// Text shown on the display when `request` is handled, `None` for requests
/// that only talk to the terminal.
pub fn label_for(request: Request) -> Option<Label> {
    let mut label = Label::new();
    match request {
        Request::PlayNote(note) => {
            // "Note D#5 (dis'')" is the longest and still fits 16 columns
            let _ = write!(label, "Note {} ({})", note.name(), note.helmholtz());
        },
        Request::PlaySong(_) => {
            let _ = label.push_str(DEMO_LABEL);
        },
        Request::Help => return None,
    }

    Some(label)
}

/// The instrument: routes decoded input to the tone player and reports on the
/// display and terminal. Every handler returns only once playback has ended.
pub struct Synth<'a, D: DelayNs, L: TextDisplay, C: Console> {
    player: TonePlayer<'a, D>,
    display: L,
    console: C,
}

impl<'a, D: DelayNs, L: TextDisplay, C: Console> Synth<'a, D, L, C> {
    pub fn new(player: TonePlayer<'a, D>, display: L, console: C) -> Self {
        Synth {
            player,
            display,
            console,
        }
    }

    pub fn player(&self) -> &TonePlayer<'a, D> {
        &self.player
    }

    pub fn display(&self) -> &L {
        &self.display
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn start(&mut self) {
        self.display.show(TITLE_LABEL);
        for line in BANNER_TEXT {
            self.console.write_line(line);
        }
    }

    pub fn print_help(&mut self) {
        for line in HELP_TEXT {
            self.console.write_line(line);
        }
    }

    pub async fn handle(&mut self, request: Request) -> Result<(), AudioError> {
        if let Some(label) = label_for(request) {
            self.display.show(&label);
        }

        match request {
            Request::PlayNote(note) => {
                self.player.play_note(note, SINGLE_NOTE_DURATION).await
            },
            Request::PlaySong(song) => {
                info!("playing {} song", song.title());
                self.player.load_melody(song.melody())?;
                self.player.play_melody().await
            },
            Request::Help => {
                self.print_help();
                Ok(())
            },
        }
    }

    /// Decodes one keypad scan. Returns true if a key triggered playback.
    pub async fn handle_keys(&mut self, keys: KeySet) -> bool {
        let Some((key, request)) = keys.decode() else {
            return false;
        };

        debug!("key {} pressed", key.label());
        if let Err(err) = self.handle(request).await {
            warn!("keypad request failed {}", err);
        }

        true
    }

    pub async fn handle_command(&mut self, line: &str) -> CommandStatus {
        let Some(request) = decode_command(line) else {
            info!("unknown command {}", line);
            return CommandStatus::Unknown;
        };

        if let Err(err) = self.handle(request).await {
            warn!("command failed {}", err);
        }

        CommandStatus::Accepted
    }
}
