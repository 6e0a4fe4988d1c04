//! HD44780 character LCD, 8-bit parallel bus.
//!
//! ## Wiring
//!
//! RS on PD0, E on PD1, D0–D7 on port C.  The controller latches the data
//! bus on the falling edge of E; every line transition is followed by the
//! settle delay (1 µs by default).
//!
//! ## Addressing
//!
//! DDRAM row offsets are `0x00, 0x40, 0x10, 0x50` for rows 0–3, and the
//! set-address command is `0x80 | address`.  Writes stop at the display
//! width; [`DisplayStatus`] reports whether anything was cut.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::debug;

use crate::error::LcdError;
use crate::gpio::indexed::IndexedGpio;
use crate::gpio::port::PortGpio;
use crate::gpio::{Direction, Level, PortDirection};
use crate::pins;
use crate::registers::RegisterBus;

pub const COLUMNS: usize = 16;
pub const ROWS: u8 = 4;

pub const CMD_TWO_LINE_8_BIT: u8 = 0x38;
pub const CMD_CURSOR_OFF: u8 = 0x0C;
pub const CMD_CLEAR: u8 = 0x01;
pub const CMD_SET_DDRAM_ADDR: u8 = 0x80;

const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40, 0x10, 0x50];
const POWER_UP_MS: u32 = 20;
const CLEAR_SETTLE_US: u32 = 2_000;

/// Outcome of writing a string to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Fit,
    /// Longer than the display width; only the first 16 characters were sent.
    Truncated,
}

pub struct Lcd<'a, B: RegisterBus, D: DelayNs> {
    gpio: IndexedGpio<'a, B>,
    port: PortGpio<'a, B>,
    delay: D,
    settle_us: u32,
}

impl<'a, B: RegisterBus, D: DelayNs> Lcd<'a, B, D> {
    pub fn new(gpio: IndexedGpio<'a, B>, port: PortGpio<'a, B>, delay: D) -> Self {
        Self {
            gpio,
            port,
            delay,
            settle_us: 1,
        }
    }

    /// Override the per-transition settle delay.
    pub fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn init(&mut self) {
        self.gpio.pin(pins::LCD_RS).set_direction(Direction::Output);
        self.gpio.pin(pins::LCD_E).set_direction(Direction::Output);
        // Constant port index.
        let _ = self.port.set_port_direction(pins::LCD_DATA_PORT, PortDirection::AllOutput);
        self.delay.delay_ms(POWER_UP_MS);

        self.send_command(CMD_TWO_LINE_8_BIT);
        self.send_command(CMD_CURSOR_OFF);
        self.clear();
        debug!("lcd: initialised, 8-bit, 2 lines");
    }

    pub fn send_command(&mut self, command: u8) {
        self.transfer(Level::Low, command);
    }

    pub fn send_char(&mut self, c: u8) {
        self.transfer(Level::High, c);
    }

    fn transfer(&mut self, rs: Level, byte: u8) {
        self.gpio.pin(pins::LCD_RS).write(rs);
        self.delay.delay_us(self.settle_us);
        self.gpio.pin(pins::LCD_E).write(Level::High);
        self.delay.delay_us(self.settle_us);
        let _ = self.port.write_port(pins::LCD_DATA_PORT, byte);
        self.delay.delay_us(self.settle_us);
        self.gpio.pin(pins::LCD_E).write(Level::Low);
        self.delay.delay_us(self.settle_us);
    }

    /// Write at the current cursor, at most [`COLUMNS`] characters.
    pub fn display_string(&mut self, s: &str) -> DisplayStatus {
        let bytes = s.as_bytes();
        for &b in bytes.iter().take(COLUMNS) {
            self.send_char(b);
        }
        if bytes.len() > COLUMNS {
            DisplayStatus::Truncated
        } else {
            DisplayStatus::Fit
        }
    }

    pub fn move_cursor(&mut self, row: u8, col: u8) -> Result<(), LcdError> {
        let offset = *ROW_OFFSETS.get(row as usize).ok_or(LcdError::InvalidRow(row))?;
        let address = col.wrapping_add(offset) & !CMD_SET_DDRAM_ADDR;
        self.send_command(CMD_SET_DDRAM_ADDR | address);
        Ok(())
    }

    pub fn display_string_at(&mut self, row: u8, col: u8, s: &str) -> Result<DisplayStatus, LcdError> {
        self.move_cursor(row, col)?;
        Ok(self.display_string(s))
    }

    /// Decimal rendering of `value` at the current cursor.
    pub fn display_integer(&mut self, value: i32) -> DisplayStatus {
        let mut buf: String<12> = String::new();
        // i32::MIN is 11 characters, always fits.
        let _ = write!(buf, "{value}");
        self.display_string(&buf)
    }

    pub fn clear(&mut self) {
        self.send_command(CMD_CLEAR);
        self.delay.delay_us(CLEAR_SETTLE_US);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::CountingDelay;
    use crate::registers::{DDRC, DDRD, PORTC, PORTD, SimBus};

    fn lcd(bus: &SimBus) -> Lcd<'_, SimBus, CountingDelay> {
        let mut lcd = Lcd::new(IndexedGpio::new(bus), PortGpio::new(bus), CountingDelay::new());
        lcd.init();
        bus.clear_trace();
        lcd
    }

    #[test]
    fn init_sequence() {
        let bus = SimBus::new();
        let mut lcd = Lcd::new(IndexedGpio::new(&bus), PortGpio::new(&bus), CountingDelay::new());
        lcd.init();
        assert_eq!(bus.peek(DDRD) & 0b11, 0b11);
        assert_eq!(bus.peek(DDRC), 0xFF);
        assert_eq!(bus.writes_to(PORTC), vec![0x38, 0x0C, 0x01]);
        assert!(lcd.delay().total_us() >= 20_000);
    }

    #[test]
    fn char_transfer_strobes_enable_with_rs_high() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.send_char(b'A');
        // RS high, E high, E low.
        assert_eq!(bus.writes_to(PORTD), vec![0b01, 0b11, 0b01]);
        assert_eq!(bus.writes_to(PORTC), vec![b'A']);
    }

    #[test]
    fn each_transfer_waits_four_settle_periods() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        let before = lcd.delay().total_ns();
        lcd.send_command(0x80);
        assert_eq!(lcd.delay().total_ns() - before, 4_000);
    }

    #[test]
    fn sixteen_characters_fit() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        assert_eq!(lcd.display_string("0123456789ABCDEF"), DisplayStatus::Fit);
        assert_eq!(bus.writes_to(PORTC).len(), 16);
    }

    #[test]
    fn long_string_is_truncated_to_sixteen() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        assert_eq!(lcd.display_string("0123456789ABCDEFXYZ"), DisplayStatus::Truncated);
        assert_eq!(bus.writes_to(PORTC), b"0123456789ABCDEF".to_vec());
    }

    #[test]
    fn cursor_addresses_per_row() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.move_cursor(0, 0).unwrap();
        lcd.move_cursor(1, 9).unwrap();
        lcd.move_cursor(2, 1).unwrap();
        lcd.move_cursor(3, 15).unwrap();
        assert_eq!(bus.writes_to(PORTC), vec![0x80, 0xC9, 0x91, 0xDF]);
    }

    #[test]
    fn invalid_row_sends_nothing() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        assert_eq!(lcd.display_string_at(4, 0, "x"), Err(LcdError::InvalidRow(4)));
        assert!(bus.trace().is_empty());
    }

    #[test]
    fn integers_render_in_decimal() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.display_integer(-42);
        lcd.display_integer(100);
        assert_eq!(bus.writes_to(PORTC), b"-42100".to_vec());
    }
}
