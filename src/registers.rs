//! ATmega32 register map and the bus that reaches it.
//!
//! Every register the firmware touches is listed here as a fixed data-space
//! address plus named bit positions.  Drivers never hard-code addresses;
//! they go through [`RegisterBus`] with a [`Register`] constant.
//!
//! ## Dual-target design
//!
//! On AVR: [`Mmio`] performs volatile single-byte accesses at the absolute
//! data-space address.
//! On host/test: [`SimBus`] keeps an in-memory register file and emulates
//! the peripheral side effects the drivers depend on (ADC conversion,
//! write-one-to-clear flags, externally driven input pins).

use core::fmt;

/// A memory-mapped 8-bit register at a fixed data-space address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u16);

impl Register {
    pub const fn at(addr: u16) -> Self {
        Self(addr)
    }

    pub const fn addr(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register(0x{:02X})", self.0)
    }
}

/// Single-bit mask for bit position `n` (0–7).
pub const fn bit(n: u8) -> u8 {
    1 << n
}

// ---------------------------------------------------------------------------
// GPIO ports (PINx read-only input, DDRx direction, PORTx output latch)
// ---------------------------------------------------------------------------

pub const PINA: Register = Register::at(0x39);
pub const DDRA: Register = Register::at(0x3A);
pub const PORTA: Register = Register::at(0x3B);

pub const PINB: Register = Register::at(0x36);
pub const DDRB: Register = Register::at(0x37);
pub const PORTB: Register = Register::at(0x38);

pub const PINC: Register = Register::at(0x33);
pub const DDRC: Register = Register::at(0x34);
pub const PORTC: Register = Register::at(0x35);

pub const PIND: Register = Register::at(0x30);
pub const DDRD: Register = Register::at(0x31);
pub const PORTD: Register = Register::at(0x32);

// ---------------------------------------------------------------------------
// Timer/Counter0
// ---------------------------------------------------------------------------

pub const TCNT0: Register = Register::at(0x52);
pub const TCCR0: Register = Register::at(0x53);
pub const OCR0: Register = Register::at(0x5C);
pub const TIFR: Register = Register::at(0x58);
pub const TIMSK: Register = Register::at(0x59);

/// TCCR0 bit layout: `FOC0 WGM00 COM01 COM00 WGM01 CS02 CS01 CS00`.
pub mod tccr0 {
    pub const CS_MASK: u8 = 0b0000_0111;
    pub const WGM01: u8 = 3;
    pub const COM00: u8 = 4;
    pub const COM01: u8 = 5;
    pub const WGM00: u8 = 6;
    pub const FOC0: u8 = 7;
}

/// TIMSK / TIFR bits owned by Timer0.
pub mod timsk {
    pub const TOIE0: u8 = 0;
    pub const OCIE0: u8 = 1;
}

// ---------------------------------------------------------------------------
// ADC
// ---------------------------------------------------------------------------

pub const ADCL: Register = Register::at(0x24);
pub const ADCH: Register = Register::at(0x25);
pub const ADCSRA: Register = Register::at(0x26);
pub const ADMUX: Register = Register::at(0x27);

/// ADMUX bit layout: `REFS1 REFS0 ADLAR MUX4..MUX0`.
pub mod admux {
    pub const REFS1: u8 = 7;
    pub const REFS0: u8 = 6;
    /// Bits preserved when the channel is switched (reference + adjust).
    pub const CONFIG_MASK: u8 = 0xE0;
    pub const MUX_MASK: u8 = 0x1F;
}

/// ADCSRA bit layout: `ADEN ADSC ADATE ADIF ADIE ADPS2 ADPS1 ADPS0`.
pub mod adcsra {
    pub const ADEN: u8 = 7;
    pub const ADSC: u8 = 6;
    pub const ADATE: u8 = 5;
    pub const ADIF: u8 = 4;
    pub const ADIE: u8 = 3;
    pub const ADPS_MASK: u8 = 0b0000_0111;
}

// ---------------------------------------------------------------------------
// Bus abstraction
// ---------------------------------------------------------------------------

/// Byte-wide access to the register data space.
///
/// Methods take `&self`: registers are shared hardware state, and every
/// driver holds a shared reference to the same bus.
pub trait RegisterBus {
    fn read(&self, reg: Register) -> u8;

    fn write(&self, reg: Register, value: u8);

    /// Read-modify-write.  Not atomic with respect to interrupts.
    fn modify(&self, reg: Register, f: impl FnOnce(u8) -> u8) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    fn set_bit(&self, reg: Register, n: u8) {
        self.modify(reg, |v| v | bit(n));
    }

    fn clear_bit(&self, reg: Register, n: u8) {
        self.modify(reg, |v| v & !bit(n));
    }

    fn toggle_bit(&self, reg: Register, n: u8) {
        self.modify(reg, |v| v ^ bit(n));
    }

    /// Returns the bit as `0` or `1`.
    fn get_bit(&self, reg: Register, n: u8) -> u8 {
        (self.read(reg) >> n) & 1
    }

    /// Replace the bits selected by `mask` with the same bits of `value`.
    fn write_masked(&self, reg: Register, mask: u8, value: u8) {
        self.modify(reg, |v| (v & !mask) | (value & mask));
    }
}

// ---------------------------------------------------------------------------
// AVR memory-mapped I/O
// ---------------------------------------------------------------------------

/// Volatile access to the real register file.
#[cfg(target_arch = "avr")]
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

#[cfg(target_arch = "avr")]
impl Mmio {
    /// # Safety
    ///
    /// The caller must be the only owner of the peripherals addressed
    /// through this bus; drivers assume no other code reconfigures them.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "avr")]
impl RegisterBus for Mmio {
    #[inline]
    fn read(&self, reg: Register) -> u8 {
        // SAFETY: every `Register` constant is a valid I/O address in the
        // ATmega32 data space; single-byte volatile reads have no side
        // effects beyond those defined by the peripheral.
        unsafe { core::ptr::read_volatile(reg.addr() as usize as *const u8) }
    }

    #[inline]
    fn write(&self, reg: Register, value: u8) {
        // SAFETY: see `read`.
        unsafe { core::ptr::write_volatile(reg.addr() as usize as *mut u8, value) }
    }
}

// ---------------------------------------------------------------------------
// Host simulation
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "avr"))]
pub use sim::SimBus;

#[cfg(not(target_arch = "avr"))]
mod sim {
    use core::cell::{Cell, RefCell};

    use super::{Register, RegisterBus, adcsra, admux, bit};
    use super::{ADCH, ADCL, ADCSRA, ADMUX, PINA, PINB, PINC, PIND};

    /// Size of the emulated data space (general registers + I/O space).
    const DATA_SPACE: usize = 0x60;
    const ADC_MAX: u16 = 1023;

    /// In-memory ATmega32 register file.
    ///
    /// Emulated side effects:
    /// - Writing ADSC with ADEN set completes a conversion immediately
    ///   (unless [`stall_adc`](Self::stall_adc) is active): the injected
    ///   analog value for the selected channel lands in ADCH:ADCL, ADIF is
    ///   raised and ADSC drops.
    /// - ADIF is write-one-to-clear.
    /// - PINx registers ignore firmware writes; tests drive them with
    ///   [`drive_input`](Self::drive_input).
    ///
    /// Every firmware write is appended to a trace for protocol assertions.
    pub struct SimBus {
        regs: [Cell<u8>; DATA_SPACE],
        analog: [Cell<u16>; 8],
        adc_stalled: Cell<bool>,
        trace: RefCell<Vec<(Register, u8)>>,
    }

    impl SimBus {
        pub fn new() -> Self {
            Self {
                regs: core::array::from_fn(|_| Cell::new(0)),
                analog: core::array::from_fn(|_| Cell::new(0)),
                adc_stalled: Cell::new(false),
                trace: RefCell::new(Vec::new()),
            }
        }

        /// Raw register value, bypassing side effects.
        pub fn peek(&self, reg: Register) -> u8 {
            self.slot(reg).map_or(0, Cell::get)
        }

        /// Store a raw register value, bypassing side effects and the trace.
        pub fn poke(&self, reg: Register, value: u8) {
            if let Some(cell) = self.slot(reg) {
                cell.set(value);
            }
        }

        /// Drive one bit of an input (PINx) register from the outside world.
        pub fn drive_input(&self, pin_reg: Register, n: u8, high: bool) {
            let v = self.peek(pin_reg);
            let v = if high { v | bit(n) } else { v & !bit(n) };
            self.poke(pin_reg, v);
        }

        /// Set the analog level seen by ADC channel `channel` (0–7).
        pub fn set_analog(&self, channel: u8, raw: u16) {
            if let Some(cell) = self.analog.get(channel as usize) {
                cell.set(raw.min(ADC_MAX));
            }
        }

        /// While stalled, started conversions never complete.
        pub fn stall_adc(&self, stalled: bool) {
            self.adc_stalled.set(stalled);
        }

        /// Every firmware write since construction (or the last clear).
        pub fn trace(&self) -> Vec<(Register, u8)> {
            self.trace.borrow().clone()
        }

        /// Firmware writes to one register, in order.
        pub fn writes_to(&self, reg: Register) -> Vec<u8> {
            self.trace
                .borrow()
                .iter()
                .filter(|(r, _)| *r == reg)
                .map(|(_, v)| *v)
                .collect()
        }

        pub fn clear_trace(&self) {
            self.trace.borrow_mut().clear();
        }

        fn slot(&self, reg: Register) -> Option<&Cell<u8>> {
            self.regs.get(reg.addr() as usize)
        }

        fn is_input_register(reg: Register) -> bool {
            reg == PINA || reg == PINB || reg == PINC || reg == PIND
        }

        fn write_adcsra(&self, value: u8) {
            let prev = self.peek(ADCSRA);
            let adif = bit(adcsra::ADIF);

            // ADIF: writing 1 clears, writing 0 leaves it alone.
            let mut next = (value & !adif) | if value & adif != 0 { 0 } else { prev & adif };

            let start = next & bit(adcsra::ADSC) != 0 && next & bit(adcsra::ADEN) != 0;
            if start && !self.adc_stalled.get() {
                let channel = self.peek(ADMUX) & admux::MUX_MASK & 0x07;
                let raw = self.analog[channel as usize].get();
                self.poke(ADCL, (raw & 0xFF) as u8);
                self.poke(ADCH, (raw >> 8) as u8);
                next = (next | adif) & !bit(adcsra::ADSC);
            }
            self.poke(ADCSRA, next);
        }
    }

    impl Default for SimBus {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RegisterBus for SimBus {
        fn read(&self, reg: Register) -> u8 {
            self.peek(reg)
        }

        fn write(&self, reg: Register, value: u8) {
            self.trace.borrow_mut().push((reg, value));
            if Self::is_input_register(reg) {
                return;
            }
            if reg == ADCSRA {
                self.write_adcsra(value);
                return;
            }
            self.poke(reg, value);
        }
    }
}
