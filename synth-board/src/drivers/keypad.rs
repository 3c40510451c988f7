use dac_synth_lib::input::keypad::{KeySet, KEYPAD_COLS, KEYPAD_ROWS};
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pull, Speed};
use embassy_time::Timer;

use crate::pins::*;

const ROW_SETTLE_US: u64 = 10;

#[macro_export]
macro_rules! create_keypad {
    ($p:ident) => {
        dac_synth_board::drivers::keypad::Keypad::new_from_board_pins(
            $p.PE2, $p.PE4, $p.PE5, $p.PE6,
            $p.PE7, $p.PE8, $p.PE9, $p.PE10)
    };
}

/// 4x4 membrane keypad. Rows are driven low one at a time, a pressed key
/// pulls its column input low.
pub struct Keypad<'a> {
    rows: [Output<'a>; KEYPAD_ROWS],
    cols: [Input<'a>; KEYPAD_COLS],
}

impl<'a> Keypad<'a> {
    pub fn new_from_pins(row_pins: [AnyPin; KEYPAD_ROWS], col_pins: [AnyPin; KEYPAD_COLS]) -> Keypad<'a> {
        let rows = row_pins.map(|pin| Output::new(pin, Level::High, Speed::Low));
        let cols = col_pins.map(|pin| Input::new(pin, Pull::Up));

        Keypad {
            rows,
            cols,
        }
    }

    pub fn new_from_board_pins(
        row0: KeypadRow0Pin, row1: KeypadRow1Pin, row2: KeypadRow2Pin, row3: KeypadRow3Pin,
        col0: KeypadCol0Pin, col1: KeypadCol1Pin, col2: KeypadCol2Pin, col3: KeypadCol3Pin,
    ) -> Keypad<'static> {
        let row_pins: [AnyPin; KEYPAD_ROWS] = [row0.into(), row1.into(), row2.into(), row3.into()];
        let col_pins: [AnyPin; KEYPAD_COLS] = [col0.into(), col1.into(), col2.into(), col3.into()];
        Keypad::new_from_pins(row_pins, col_pins)
    }

    pub async fn scan(&mut self) -> KeySet {
        let mut keys = KeySet::EMPTY;

        for (row, row_pin) in self.rows.iter_mut().enumerate() {
            row_pin.set_low();
            Timer::after_micros(ROW_SETTLE_US).await;

            for (col, col_pin) in self.cols.iter().enumerate() {
                if col_pin.is_low() {
                    keys.set_pressed(row, col);
                }
            }

            row_pin.set_high();
        }

        keys
    }
}
