//! Timer/Counter0 driver: Normal, CTC and Fast-PWM from one config record.
//!
//! ## Mode table
//!
//! | Mode    | WGM01:WGM00 | COM01:COM00       | FOC0 | Interrupt enable          | OCR0 |
//! |---------|-------------|-------------------|------|---------------------------|------|
//! | Normal  | 0:0         | forced 00         | 1    | TOIE0 if requested        | –    |
//! | CTC     | 1:0         | from config       | 1    | OCIE0 if requested        | tick |
//! | FastPWM | 1:1         | from config       | 0    | untouched                 | tick |
//!
//! `init` rebuilds TCCR0 from scratch, so re-initialising with the same
//! config is idempotent and switching mode never leaves stale bits behind.
//!
//! ## Callback slot
//!
//! One process-wide `fn()` slot, shared by the compare-match and overflow
//! vectors.  Guarded by an `embassy-sync` blocking mutex over a critical
//! section; the function pointer is copied out before it is called so the
//! lock is never held across user code.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::debug;

use crate::registers::{OCR0, RegisterBus, TCCR0, TCNT0, TIMSK, bit, tccr0, timsk};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Ctc,
    FastPwm,
}

/// CS02:CS00 clock select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockSource {
    Stopped = 0,
    Div1 = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
    ExternalFalling = 6,
    ExternalRising = 7,
}

impl ClockSource {
    /// Decode the low three bits; higher bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & tccr0::CS_MASK {
            0 => Self::Stopped,
            1 => Self::Div1,
            2 => Self::Div8,
            3 => Self::Div64,
            4 => Self::Div256,
            5 => Self::Div1024,
            6 => Self::ExternalFalling,
            _ => Self::ExternalRising,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8 & tccr0::CS_MASK
    }
}

/// COM01:COM00 behaviour of the OC0 pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompareOutput {
    Disconnected = 0,
    Reserved = 1,
    ClearOnMatch = 2,
    SetOnMatch = 3,
}

impl CompareOutput {
    /// Decode the low two bits; higher bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Disconnected,
            1 => Self::Reserved,
            2 => Self::ClearOnMatch,
            _ => Self::SetOnMatch,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8 & 0b11
    }
}

/// Consumed by [`Timer0::init`]; not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer0Config {
    pub mode: Mode,
    pub clock: ClockSource,
    pub compare_output: CompareOutput,
    pub interrupt: bool,
    /// OCR0 value (compare threshold, or PWM duty).
    pub tick: u8,
    /// TCNT0 value loaded on init.
    pub initial_count: u8,
}

/// State machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Uninitialized,
    Normal,
    Ctc,
    FastPwm,
}

impl From<Mode> for TimerState {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => Self::Normal,
            Mode::Ctc => Self::Ctc,
            Mode::FastPwm => Self::FastPwm,
        }
    }
}

/// The two Timer0 interrupt vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Vector {
    CompareMatch = 1,
    Overflow = 2,
}

impl Vector {
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::CompareMatch),
            2 => Some(Self::Overflow),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Callback slot
// ---------------------------------------------------------------------------

static CALLBACK: Mutex<CriticalSectionRawMutex, Cell<Option<fn()>>> = Mutex::new(Cell::new(None));

/// Store the callback run by both vectors.  Last writer wins.
pub fn set_callback(callback: fn()) {
    CALLBACK.lock(|slot| slot.set(Some(callback)));
}

pub fn clear_callback() {
    CALLBACK.lock(|slot| slot.set(None));
}

pub fn has_callback() -> bool {
    CALLBACK.lock(|slot| slot.get().is_some())
}

/// Vector entry: run the stored callback, if any.  Returns whether one ran.
pub fn dispatch(vector: Vector) -> bool {
    let callback = CALLBACK.lock(Cell::get);
    match callback {
        Some(f) => {
            f();
            true
        }
        None => {
            debug!("timer0: {vector:?} with empty callback slot");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub struct Timer0<'a, B: RegisterBus> {
    bus: &'a B,
    state: TimerState,
}

impl<'a, B: RegisterBus> Timer0<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Self {
            bus,
            state: TimerState::Uninitialized,
        }
    }

    pub fn init(&mut self, config: &Timer0Config) {
        self.bus.write(TCNT0, config.initial_count);

        let com = config.compare_output.bits() << tccr0::COM00;
        let mut tccr = config.clock.bits();
        match config.mode {
            Mode::Normal => {
                tccr |= bit(tccr0::FOC0);
            }
            Mode::Ctc => {
                tccr |= bit(tccr0::FOC0) | bit(tccr0::WGM01) | com;
            }
            Mode::FastPwm => {
                tccr |= bit(tccr0::WGM00) | bit(tccr0::WGM01) | com;
            }
        }
        self.bus.write(TCCR0, tccr);

        // TIMSK is only written when an interrupt is requested; otherwise
        // whatever enables are already set stay as they are.
        let timer_irqs = bit(timsk::TOIE0) | bit(timsk::OCIE0);
        match config.mode {
            Mode::Normal => {
                if config.interrupt {
                    self.bus.write_masked(TIMSK, timer_irqs, bit(timsk::TOIE0));
                }
            }
            Mode::Ctc => {
                if config.interrupt {
                    self.bus.write_masked(TIMSK, timer_irqs, bit(timsk::OCIE0));
                }
                self.bus.write(OCR0, config.tick);
            }
            Mode::FastPwm => {
                self.bus.write(OCR0, config.tick);
            }
        }

        self.state = config.mode.into();
        debug!("timer0: {:?} clock={:?} com={:?} tick={}", config.mode, config.clock, config.compare_output, config.tick);
    }

    /// Write OCR0.  Valid in any state; takes effect at the next compare.
    pub fn set_duty_cycle(&mut self, duty: u8) {
        self.bus.write(OCR0, duty);
    }

    pub fn duty_cycle(&self) -> u8 {
        self.bus.read(OCR0)
    }

    pub fn counter(&self) -> u8 {
        self.bus.read(TCNT0)
    }

    pub fn mode(&self) -> TimerState {
        self.state
    }
}

/// Serialises tests that touch the process-wide callback slot.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
