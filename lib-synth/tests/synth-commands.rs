use dac_synth_lib::audio::note::Note;
use dac_synth_lib::audio::songs::{SongId, DEMO_SONG};
use dac_synth_lib::audio::tone_player::TonePlayer;
use dac_synth_lib::audio::tone_state::{ToneSnapshot, ToneState};
use dac_synth_lib::config::DEFAULT_TICK_RATE_HZ;
use dac_synth_lib::input::keypad::{Key, KeySet};
use dac_synth_lib::input::terminal::{decode_command, CommandStatus, LineBuffer, HELP_TEXT};
use dac_synth_lib::input::Request;
use dac_synth_lib::synth::{label_for, Console, Synth, TextDisplay, DEMO_LABEL, TITLE_LABEL};
use embassy_futures::block_on;
use embedded_hal_async::delay::DelayNs;

#[derive(Default)]
struct Lcd {
    shown: Vec<String>,
}

impl TextDisplay for Lcd {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

#[derive(Default)]
struct Terminal {
    lines: Vec<String>,
}

impl Console for Terminal {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

struct RecordingDelay<'a> {
    tone_state: &'a ToneState,
    waits: Vec<(ToneSnapshot, u32)>,
}

impl DelayNs for RecordingDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits.push((self.tone_state.snapshot(), ms));
    }
}

fn synth<'a>(tone_state: &'a ToneState) -> Synth<'a, RecordingDelay<'a>, Lcd, Terminal> {
    let delay = RecordingDelay { tone_state, waits: Vec::new() };
    Synth::new(TonePlayer::new(tone_state, delay), Lcd::default(), Terminal::default())
}

#[test]
fn start_shows_title_and_banner() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut synth = synth(&tone_state);

    synth.start();

    assert_eq!(synth.display().shown, vec![TITLE_LABEL.to_string()]);
    assert!(synth.console().lines.iter().any(|line| line.contains("help")));
}

#[test]
fn terminal_note_command() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut synth = synth(&tone_state);

    assert_eq!(block_on(synth.handle_command("E5")), CommandStatus::Accepted);

    assert_eq!(synth.display().shown, vec!["Note E5 (e'')".to_string()]);
    assert_eq!(tone_state.gain(), 0);
    assert_eq!(tone_state.frequency(), 660);
}

#[test]
fn unknown_command_leaves_tone_state_alone() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut synth = synth(&tone_state);

    block_on(synth.handle_command("G4"));
    let before = tone_state.snapshot();

    for line in ["g4", "C6", "PLAY", "", "DEMO!"] {
        assert_eq!(block_on(synth.handle_command(line)), CommandStatus::Unknown);
    }

    assert_eq!(tone_state.snapshot(), before);
    assert_eq!(synth.display().shown.len(), 1);
}

#[test]
fn help_prints_reference_without_sound() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let before = tone_state.snapshot();
    let mut synth = synth(&tone_state);

    assert_eq!(block_on(synth.handle_command("help")), CommandStatus::Accepted);

    assert_eq!(synth.console().lines.len(), HELP_TEXT.len());
    assert!(synth.display().shown.is_empty());
    assert_eq!(tone_state.snapshot(), before);
}

#[test]
fn keypad_demo_blocks_until_last_beat() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut synth = synth(&tone_state);

    let keys: KeySet = [Key::KD].into_iter().collect();
    assert!(block_on(synth.handle_keys(keys)));

    assert_eq!(synth.display().shown, vec![DEMO_LABEL.to_string()]);
    assert_eq!(tone_state.gain(), 0);
}

#[test]
fn demo_command_plays_every_beat() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut delay = RecordingDelay { tone_state: &tone_state, waits: Vec::new() };

    {
        let mut synth = Synth::new(
            TonePlayer::new(&tone_state, &mut delay),
            Lcd::default(),
            Terminal::default(),
        );
        assert_eq!(block_on(synth.handle_command("DEMO")), CommandStatus::Accepted);
    }

    assert_eq!(delay.waits.len(), DEMO_SONG.len());
    assert_eq!(delay.waits.last().map(|(snapshot, _)| snapshot.gain), Some(0));
    assert_eq!(tone_state.gain(), 0);
}

#[test]
fn empty_and_unbound_keys_do_nothing() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut synth = synth(&tone_state);

    assert!(!block_on(synth.handle_keys(KeySet::EMPTY)));
    let keys: KeySet = [Key::KB].into_iter().collect();
    assert!(!block_on(synth.handle_keys(keys)));

    assert!(synth.display().shown.is_empty());
}

#[test]
fn single_note_lasts_300_ms() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut delay = RecordingDelay { tone_state: &tone_state, waits: Vec::new() };

    {
        let mut synth = Synth::new(
            TonePlayer::new(&tone_state, &mut delay),
            Lcd::default(),
            Terminal::default(),
        );
        let keys: KeySet = [Key::K1].into_iter().collect();
        assert!(block_on(synth.handle_keys(keys)));
    }

    assert_eq!(delay.waits.len(), 1);
    let (snapshot, ms) = delay.waits[0];
    assert_eq!(ms, 300);
    assert_eq!(snapshot, ToneSnapshot { frequency: 262, tick_interval: 62, gain: 100 });
}

#[test]
fn same_input_decodes_to_same_note() {
    let keys: KeySet = [Key::K5].into_iter().collect();
    assert_eq!(keys.decode(), keys.decode());
    assert_eq!(decode_command("A4"), decode_command("A4"));
    assert_eq!(keys.decode().map(|(_, request)| request), decode_command("A4"));
}

#[test]
fn received_bytes_drive_commands() {
    let tone_state = ToneState::new(DEFAULT_TICK_RATE_HZ, Note::C4);
    let mut synth = synth(&tone_state);
    let mut buffer = LineBuffer::new();

    let mut statuses = Vec::new();
    for byte in b"B4\r\nxx\r\n".iter().copied() {
        if let Some(line) = buffer.push(byte) {
            statuses.push(block_on(synth.handle_command(&line)));
        }
    }

    assert_eq!(statuses, vec![CommandStatus::Accepted, CommandStatus::Unknown]);
    assert_eq!(tone_state.frequency(), 494);
}

#[test]
fn labels() {
    assert_eq!(label_for(Request::PlayNote(Note::F4)).unwrap().as_str(), "Note F4 (f')");
    assert_eq!(label_for(Request::PlaySong(SongId::Demo)).unwrap().as_str(), DEMO_LABEL);
    assert!(label_for(Request::Help).is_none());

    // every label fits the 16 column display untruncated
    for note in Note::ALL {
        let label = label_for(Request::PlayNote(note)).unwrap();
        assert!(label.ends_with(')'), "{} label truncated", note.name());
    }
}
