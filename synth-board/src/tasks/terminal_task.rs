use dac_synth_lib::input::terminal::LineBuffer;
use dac_synth_lib::synth::Console;
use embassy_executor::Spawner;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, Uart, UartRx, UartTx};

use crate::pins::*;
use crate::{SystemIrqs, TERMINAL_BAUD_RATE};

const RX_CHUNK_LEN: usize = 16;

#[macro_export]
macro_rules! create_terminal_task {
    ($spawner:ident, $lines:expr, $p:ident) => {
        dac_synth_board::tasks::terminal_task::start_terminal_task(
            &$spawner, $lines, $p.USART3, $p.PD9, $p.PD8, $p.DMA1_CH0, $p.DMA1_CH1
        )
    };
}

/// Transmit half of the terminal UART. Writes block until the line is out.
pub struct UartConsole {
    tx: UartTx<'static, Async>,
}

impl Console for UartConsole {
    fn write_line(&mut self, line: &str) {
        let res = self.tx.blocking_write(line.as_bytes())
            .and_then(|_| self.tx.blocking_write(b"\r\n"));

        if let Err(err) = res {
            defmt::warn!("terminal write failed {}", err);
        }
    }
}

#[embassy_executor::task]
async fn terminal_task_entry(
    lines: &'static TerminalLines,
    mut rx: UartRx<'static, Async>,
) {
    let mut line_buffer = LineBuffer::new();
    let mut rx_buf = [0u8; RX_CHUNK_LEN];

    loop {
        match rx.read_until_idle(&mut rx_buf).await {
            Ok(len) => {
                for byte in rx_buf[..len].iter().copied() {
                    if let Some(line) = line_buffer.push(byte) {
                        defmt::trace!("terminal line {}", line.as_str());
                        // waits out any playback in the foreground
                        lines.send(line).await;
                    }
                }
            },
            Err(err) => {
                defmt::warn!("terminal rx error {}", err);
            },
        }
    }
}

pub fn start_terminal_task(
    spawner: &Spawner,
    lines: &'static TerminalLines,
    uart: TerminalUart,
    rx_pin: TerminalUartRxPin,
    tx_pin: TerminalUartTxPin,
    tx_dma: TerminalTxDma,
    rx_dma: TerminalRxDma,
) -> UartConsole {
    let mut config = usart::Config::default();
    config.baudrate = TERMINAL_BAUD_RATE;

    let uart = defmt::unwrap!(Uart::new(uart, rx_pin, tx_pin, SystemIrqs, tx_dma, rx_dma, config));
    let (tx, rx) = uart.split();

    defmt::unwrap!(spawner.spawn(terminal_task_entry(lines, rx)));

    UartConsole { tx }
}
