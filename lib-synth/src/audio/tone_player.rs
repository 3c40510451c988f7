use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::config::MIN_TICK_INTERVAL;

use super::AudioError;
use super::note::{Beat, Melody, Note};
use super::tone_state::ToneState;

/// Foreground half of the tone engine. Sets the shared tone state and waits
/// out each note while the sampler interrupt renders it.
pub struct TonePlayer<'a, D: DelayNs> {
    tone_state: &'a ToneState,
    delay: D,
    melody: Option<&'a Melody>,
}

impl<'a, D: DelayNs> TonePlayer<'a, D> {
    pub fn new(tone_state: &'a ToneState, delay: D) -> Self {
        TonePlayer {
            tone_state,
            delay,
            melody: None,
        }
    }

    pub fn tone_state(&self) -> &'a ToneState {
        self.tone_state
    }

    pub fn can_play_note(&self, note: Note) -> bool {
        self.tone_state.interval_for(note) >= MIN_TICK_INTERVAL
    }

    pub fn load_melody(&mut self, melody: &'a Melody) -> Result<(), AudioError> {
        for beat in melody.iter() {
            match beat {
                Beat::Note { note, duration: _ } => {
                    if !self.can_play_note(*note) {
                        warn!("melody rejected, {} is too high for the tick rate", note.name());
                        return Err(AudioError::UnplayablePitch);
                    }
                },
                Beat::Rest(_) => { },
            }
        }

        self.melody = Some(melody);

        Ok(())
    }

    /// Sounds `note` for `duration`, then mutes. The interval is published
    /// before the gain opens.
    pub async fn play_note(&mut self, note: Note, duration: Duration) -> Result<(), AudioError> {
        if !self.can_play_note(note) {
            warn!("refusing to play {}, tick interval too short", note.name());
            return Err(AudioError::UnplayablePitch);
        }

        self.tone_state.retune(note);
        self.tone_state.open_gain();
        self.wait(duration).await;
        self.tone_state.close_gain();

        Ok(())
    }

    /// Waits `duration` without touching the tone state.
    pub async fn play_silence(&mut self, duration: Duration) {
        self.wait(duration).await;
    }

    /// Plays the loaded melody start to finish in authored order.
    pub async fn play_melody(&mut self) -> Result<(), AudioError> {
        let Some(melody) = self.melody else {
            return Err(AudioError::NoMelodyLoaded);
        };

        debug!("melody start, {} beats", melody.len());

        for beat in melody.iter() {
            match beat {
                Beat::Note { note, duration } => {
                    self.play_note(*note, *duration).await?;
                },
                Beat::Rest(duration) => {
                    self.play_silence(*duration).await;
                },
            }
        }

        debug!("melody end");

        Ok(())
    }

    async fn wait(&mut self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        self.delay.delay_ms(ms).await;
    }
}
