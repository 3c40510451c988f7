use core::cell::RefCell;

use dac_synth_lib::audio::sampler::{CompareTimer, SampleOutput, Sampler};
use dac_synth_lib::audio::tone_state::ToneState;
use embassy_stm32::dac::{DacCh1, Value};
use embassy_stm32::dma::NoDma;
use embassy_stm32::interrupt::{self, InterruptExt, Priority};
use embassy_stm32::pac::timer::TimGp32;
use embassy_stm32::timer::low_level::Timer;
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::pins::{SynthDac, SynthDacPin, SynthTimer};

// compare channel 1
const COMPARE_CHANNEL: usize = 0;

pub type SharedDacSampler = Mutex<CriticalSectionRawMutex, RefCell<Option<DacSampler<'static>>>>;

pub struct DacOutput<'d> {
    dac: DacCh1<'d, SynthDac, NoDma>,
}

impl SampleOutput for DacOutput<'_> {
    fn write_sample(&mut self, sample: u8) {
        self.dac.set(Value::Bit8(sample));
    }
}

/// 32 bit timer free running at the tick rate, compare channel 1 raises the
/// sampler interrupt.
pub struct CompareChannel<'d> {
    timer: Timer<'d, SynthTimer>,
}

impl CompareChannel<'_> {
    fn regs(&self) -> TimGp32 {
        self.timer.regs_gp32()
    }

    fn clear_compare_flag(&self) {
        self.regs().sr().modify(|w| w.set_ccif(COMPARE_CHANNEL, false));
    }
}

impl CompareTimer for CompareChannel<'_> {
    fn compare(&self) -> u32 {
        self.regs().ccr(COMPARE_CHANNEL).read()
    }

    fn set_compare(&mut self, compare: u32) {
        self.regs().ccr(COMPARE_CHANNEL).write_value(compare);
    }
}

/// Sampler bound to DAC1 channel 1 and TIM2.
pub struct DacSampler<'d> {
    sampler: Sampler,
    output: DacOutput<'d>,
    timer: CompareChannel<'d>,
}

impl<'d> DacSampler<'d> {
    pub fn new(dac: SynthDac, dac_pin: SynthDacPin, timer: SynthTimer, tick_rate_hz: u32) -> DacSampler<'d> {
        let mut dac = DacCh1::new(dac, NoDma, dac_pin);
        dac.set(Value::Bit8(0));
        dac.enable();

        let timer = Timer::new(timer);
        let timer_clock = timer.get_clock_frequency().0;
        let prescaler = (timer_clock / tick_rate_hz).saturating_sub(1);
        let prescaler = u16::try_from(prescaler).unwrap_or(u16::MAX);

        let regs = timer.regs_gp32();
        regs.psc().write_value(prescaler);
        regs.arr().write_value(u32::MAX);
        // latch the prescaler and zero the counter
        regs.egr().write(|w| w.set_ug(true));

        defmt::info!("sampler timer {} Hz, prescaler {}, tick {} Hz",
            timer_clock, prescaler, timer_clock / (prescaler as u32 + 1));

        DacSampler {
            sampler: Sampler::new(),
            output: DacOutput { dac },
            timer: CompareChannel { timer },
        }
    }

    /// Arms the first compare one tick interval out and starts counting.
    pub fn start(&mut self, tone_state: &ToneState) {
        let regs = self.timer.regs();
        let first_compare = regs.cnt().read().wrapping_add(tone_state.tick_interval());
        regs.ccr(COMPARE_CHANNEL).write_value(first_compare);

        self.timer.clear_compare_flag();
        regs.dier().modify(|w| w.set_ccie(COMPARE_CHANNEL, true));
        self.timer.timer.start();
    }

    #[inline]
    pub fn on_interrupt(&mut self, tone_state: &ToneState) {
        self.timer.clear_compare_flag();
        self.sampler.on_tick(tone_state, &mut self.output, &mut self.timer);
    }
}

/// Body of the TIM2 handler.
pub fn service_sampler(shared: &SharedDacSampler, tone_state: &ToneState) {
    shared.lock(|cell| {
        if let Some(sampler) = cell.borrow_mut().as_mut() {
            sampler.on_interrupt(tone_state);
        }
    });
}

/// Brings up DAC and timer, hands them to the interrupt and unmasks it.
/// The caller's binary must define the `TIM2` handler calling `service_sampler`.
pub fn start_dac_sampler(
    shared: &'static SharedDacSampler,
    tone_state: &'static ToneState,
    dac: SynthDac,
    dac_pin: SynthDacPin,
    timer: SynthTimer,
) {
    let mut dac_sampler = DacSampler::new(dac, dac_pin, timer, tone_state.tick_rate_hz());

    shared.lock(|cell| {
        dac_sampler.start(tone_state);
        cell.replace(Some(dac_sampler));
    });

    // above the executor, nothing else on this board is time critical
    interrupt::TIM2.set_priority(Priority::P1);
    unsafe { interrupt::TIM2.enable() };

    defmt::info!("sampler started at {} Hz", tone_state.frequency());
}
