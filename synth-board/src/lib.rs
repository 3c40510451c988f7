#![no_std]

use embassy_stm32::{
    bind_interrupts, peripherals, rcc::{
        mux::Usart234578sel,
        AHBPrescaler, APBPrescaler,
        Hse, HseMode,
        Pll, PllDiv, PllMul, PllPreDiv, PllSource,
        Sysclk,
        VoltageScale
    }, time::Hertz, usart, Config
};

pub mod drivers;
pub mod pins;
pub mod tasks;

bind_interrupts!(pub struct SystemIrqs {
    USART3 => usart::InterruptHandler<peripherals::USART3>;
});

/// Sampler timer tick rate, handed to `ToneState::new`.
pub const SYNTH_TICK_RATE_HZ: u32 = dac_synth_lib::config::DEFAULT_TICK_RATE_HZ;

pub const KEYPAD_POLL_MS: u64 = 20;
pub const TERMINAL_BAUD_RATE: u32 = 115_200;

pub fn get_system_config() -> Config {
    let mut config = Config::default();

    // 8 MHz from the ST-LINK MCO
    config.rcc.hse = Some(Hse {
        freq: Hertz(8_000_000),
        mode: HseMode::Bypass,
    });

    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSE,
        prediv: PllPreDiv::DIV1,
        mul: PllMul::MUL68,
        divp: Some(PllDiv::DIV1), // 544 MHz
        divq: Some(PllDiv::DIV4), // 136 MHz
        divr: Some(PllDiv::DIV2)  // 272 MHz
    });

    // configure core busses
    config.rcc.sys = Sysclk::PLL1_P; // 544 MHz
    config.rcc.d1c_pre = AHBPrescaler::DIV1; // 544 MHz
    config.rcc.ahb_pre = AHBPrescaler::DIV2; // 272 MHz

    // configure peripheral busses, timers on APB1 run at 272 MHz
    config.rcc.apb1_pre = APBPrescaler::DIV2; // 136 MHz
    config.rcc.apb2_pre = APBPrescaler::DIV2; // 136 MHz
    config.rcc.apb3_pre = APBPrescaler::DIV2; // 136 MHz
    config.rcc.apb4_pre = APBPrescaler::DIV2; // 136 MHz

    config.rcc.mux.usart234578sel = Usart234578sel::PCLK1; // 136 MHz

    config.rcc.voltage_scale = VoltageScale::Scale0;

    config
}
