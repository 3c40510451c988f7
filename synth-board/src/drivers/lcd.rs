use dac_synth_lib::config::{LCD_COLUMNS, LCD_ROWS};
use dac_synth_lib::synth::TextDisplay;
use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::Peripheral;
use embassy_time::{block_for, Duration};

#[macro_export]
macro_rules! create_lcd {
    ($p:ident) => {
        dac_synth_board::drivers::lcd::CharacterLcd::new(
            $p.PD0, $p.PD1, $p.PD4, $p.PD5, $p.PD6, $p.PD7)
    };
}

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM_ADDR: u8 = 0x80;

const ROW_OFFSETS: [u8; LCD_ROWS] = [0x00, 0x40];

/// HD44780 character display on a write-only 4 bit bus (RW tied low).
///
/// Timing is done with `block_for` so `show` can be called from the
/// foreground without an executor round trip.
pub struct CharacterLcd<'a> {
    rs: Output<'a>,
    en: Output<'a>,
    data: [Output<'a>; 4],
}

impl<'a> CharacterLcd<'a> {
    pub fn new(
        rs: impl Peripheral<P = impl Pin> + 'a,
        en: impl Peripheral<P = impl Pin> + 'a,
        d4: impl Peripheral<P = impl Pin> + 'a,
        d5: impl Peripheral<P = impl Pin> + 'a,
        d6: impl Peripheral<P = impl Pin> + 'a,
        d7: impl Peripheral<P = impl Pin> + 'a,
    ) -> Self {
        let mut lcd = CharacterLcd {
            rs: Output::new(rs, Level::Low, Speed::Low),
            en: Output::new(en, Level::Low, Speed::Low),
            data: [
                Output::new(d4, Level::Low, Speed::Low),
                Output::new(d5, Level::Low, Speed::Low),
                Output::new(d6, Level::Low, Speed::Low),
                Output::new(d7, Level::Low, Speed::Low),
            ],
        };

        lcd.init();
        lcd
    }

    fn init(&mut self) {
        // power on reset needs >40ms after Vcc rises
        block_for(Duration::from_millis(50));

        // three 8 bit function sets, then switch to 4 bit
        self.write_nibble(0x3);
        block_for(Duration::from_millis(5));
        self.write_nibble(0x3);
        block_for(Duration::from_micros(150));
        self.write_nibble(0x3);
        block_for(Duration::from_micros(150));
        self.write_nibble(0x2);

        self.command(CMD_FUNCTION_4BIT_2LINE);
        self.command(CMD_DISPLAY_ON);
        self.command(CMD_ENTRY_MODE_INC);
        self.clear();

        defmt::debug!("lcd initialized");
    }

    fn pulse_enable(&mut self) {
        self.en.set_high();
        block_for(Duration::from_micros(1));
        self.en.set_low();
        // most instructions finish in 37us
        block_for(Duration::from_micros(50));
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_level(Level::from(nibble & (1 << bit) != 0));
        }

        self.pulse_enable();
    }

    fn write_byte(&mut self, byte: u8, rs: Level) {
        self.rs.set_level(rs);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn command(&mut self, command: u8) {
        self.write_byte(command, Level::Low);
    }

    pub fn clear(&mut self) {
        self.command(CMD_CLEAR);
        block_for(Duration::from_millis(2));
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(LCD_ROWS - 1);
        let col = col.min(LCD_COLUMNS - 1) as u8;
        self.command(CMD_SET_DDRAM_ADDR | (ROW_OFFSETS[row] + col));
    }

    /// Writes at the cursor, cut at the end of the row. Non ASCII is shown as `?`.
    pub fn write_str(&mut self, text: &str) {
        for byte in text.bytes().take(LCD_COLUMNS) {
            let byte = if byte.is_ascii() { byte } else { b'?' };
            self.write_byte(byte, Level::High);
        }
    }
}

impl TextDisplay for CharacterLcd<'_> {
    fn show(&mut self, text: &str) {
        self.clear();
        self.set_cursor(0, 0);
        self.write_str(text);
    }
}
