#![allow(dead_code)]

use dac_synth_lib::input::terminal::CommandLine;
use embassy_stm32::peripherals::*;
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};

///////////////////////
//  Channel Types    //
///////////////////////

const TERMINAL_LINES_DEPTH: usize = 1;

pub type TerminalLines = Channel<ThreadModeRawMutex, CommandLine, TERMINAL_LINES_DEPTH>;

/////////////
//  Audio  //
/////////////

pub type SynthDac = DAC1;
pub type SynthDacPin = PA4;
pub type SynthTimer = TIM2;

//////////////
//  Keypad  //
//////////////

pub type KeypadRow0Pin = PE2;
pub type KeypadRow1Pin = PE4;
pub type KeypadRow2Pin = PE5;
pub type KeypadRow3Pin = PE6;
pub type KeypadCol0Pin = PE7;
pub type KeypadCol1Pin = PE8;
pub type KeypadCol2Pin = PE9;
pub type KeypadCol3Pin = PE10;

///////////
//  LCD  //
///////////

pub type LcdRsPin = PD0;
pub type LcdEnPin = PD1;
pub type LcdD4Pin = PD4;
pub type LcdD5Pin = PD5;
pub type LcdD6Pin = PD6;
pub type LcdD7Pin = PD7;

////////////////
//  Terminal  //
////////////////

// ST-LINK virtual COM port
pub type TerminalUart = USART3;
pub type TerminalUartTxPin = PD8;
pub type TerminalUartRxPin = PD9;
pub type TerminalTxDma = DMA1_CH0;
pub type TerminalRxDma = DMA1_CH1;
