#![no_std]
#![no_main]

use core::cell::RefCell;

use dac_synth_lib::{
    audio::{note::Note, songs::SongId, tone_player::TonePlayer, tone_state::ToneState},
    config::{DEFAULT_NOTE, SINGLE_NOTE_DURATION},
};
use embassy_stm32::interrupt;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Timer};

use defmt_rtt as _;

use dac_synth_board::{
    drivers::dac_sampler::{service_sampler, start_dac_sampler, SharedDacSampler},
    get_system_config, SYNTH_TICK_RATE_HZ,
};

// provide embedded panic probe
use panic_probe as _;

static TONE_STATE: ToneState = ToneState::new(SYNTH_TICK_RATE_HZ, DEFAULT_NOTE);
static DAC_SAMPLER: SharedDacSampler = Mutex::new(RefCell::new(None));

#[interrupt]
unsafe fn TIM2() {
    service_sampler(&DAC_SAMPLER, &TONE_STATE);
}

#[embassy_executor::main]
async fn main(_spawner: embassy_executor::Spawner) {
    // init system
    let sys_config = get_system_config();
    let p = embassy_stm32::init(sys_config);

    defmt::info!("embassy HAL configured.");

    start_dac_sampler(&DAC_SAMPLER, &TONE_STATE, p.DAC1, p.PA4, p.TIM2);

    let mut tone_player = TonePlayer::new(&TONE_STATE, Delay);

    // walk the keyboard once, listen for a missing or off pitch step
    for note in Note::KEYBOARD {
        defmt::info!("{} ({} Hz), tick interval {}", note.name(), note.hz().get(), TONE_STATE.interval_for(note));
        if tone_player.play_note(note, SINGLE_NOTE_DURATION).await.is_err() {
            defmt::warn!("{} can't be played at this tick rate", note.name());
        }
        tone_player.play_silence(SINGLE_NOTE_DURATION).await;
    }

    if tone_player.load_melody(SongId::Demo.melody()).is_err() {
        defmt::warn!("song uses pitch outside of operating range");
    }

    defmt::unwrap!(tone_player.play_melody().await);

    defmt::info!("tone test done.");

    loop {
        Timer::after_millis(1000).await;
    }
}
