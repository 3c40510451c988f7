#![no_std]
#![no_main]

use core::cell::RefCell;

use dac_synth_lib::{
    audio::{tone_player::TonePlayer, tone_state::ToneState},
    config::DEFAULT_NOTE,
    input::terminal::CommandStatus,
    synth::Synth,
};
use embassy_stm32::interrupt;
use embassy_sync::{blocking_mutex::Mutex, channel::Channel};
use embassy_time::{Delay, Timer};

use defmt_rtt as _;

use dac_synth_board::{
    create_keypad, create_lcd, create_terminal_task,
    drivers::dac_sampler::{service_sampler, start_dac_sampler, SharedDacSampler},
    get_system_config, pins::TerminalLines, KEYPAD_POLL_MS, SYNTH_TICK_RATE_HZ,
};

// provide embedded panic probe
use panic_probe as _;

static TONE_STATE: ToneState = ToneState::new(SYNTH_TICK_RATE_HZ, DEFAULT_NOTE);
static DAC_SAMPLER: SharedDacSampler = Mutex::new(RefCell::new(None));
static TERMINAL_LINES: TerminalLines = Channel::new();

#[interrupt]
unsafe fn TIM2() {
    service_sampler(&DAC_SAMPLER, &TONE_STATE);
}

#[embassy_executor::main]
async fn main(main_spawner: embassy_executor::Spawner) {
    // init system
    let sys_config = get_system_config();
    let p = embassy_stm32::init(sys_config);

    defmt::info!("embassy HAL configured.");

    ///////////////////
    //  tone engine  //
    ///////////////////

    start_dac_sampler(&DAC_SAMPLER, &TONE_STATE, p.DAC1, p.PA4, p.TIM2);

    ///////////////////
    //  start tasks  //
    ///////////////////

    let console = create_terminal_task!(main_spawner, &TERMINAL_LINES, p);

    /////////////////
    //  user i/o   //
    /////////////////

    let mut keypad = create_keypad!(p);
    let lcd = create_lcd!(p);

    let tone_player = TonePlayer::new(&TONE_STATE, Delay);
    let mut synth = Synth::new(tone_player, lcd, console);
    synth.start();

    defmt::info!("synth ready.");

    // every handler returns only after playback, input arriving meanwhile
    // waits in the terminal channel or is missed by the keypad scan
    loop {
        if let Ok(line) = TERMINAL_LINES.try_receive() {
            if synth.handle_command(&line).await == CommandStatus::Unknown {
                defmt::info!("ignored terminal line");
            }
        }

        let keys = keypad.scan().await;
        synth.handle_keys(keys).await;

        Timer::after_millis(KEYPAD_POLL_MS).await;
    }
}
