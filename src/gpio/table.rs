//! Read-only pin descriptor table.
//!
//! Each of the 32 identifiers maps to the three registers that control it
//! plus the bit position inside them.  The table is built at compile time
//! and lives in `.rodata` (flash on AVR); callers never hold a reference
//! into it.  [`fetch`] copies one descriptor out, the caller uses the copy,
//! and the next operation fetches again.

use super::{NUM_PINS, PinId, Port, PINS_PER_PORT};
use crate::registers::Register;

/// Registers and bit position controlling one pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDescriptor {
    /// PINx
    pub input: Register,
    /// PORTx
    pub output: Register,
    /// DDRx
    pub direction: Register,
    pub bit: u8,
}

impl PinDescriptor {
    const fn for_index(index: u8) -> Self {
        let port = match Port::from_index(index / PINS_PER_PORT) {
            Some(p) => p,
            None => panic!("pin table index out of range"),
        };
        Self {
            input: port.pin_reg(),
            output: port.port_reg(),
            direction: port.ddr_reg(),
            bit: index % PINS_PER_PORT,
        }
    }

    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }
}

const fn build_table() -> [PinDescriptor; NUM_PINS as usize] {
    let mut table = [PinDescriptor::for_index(0); NUM_PINS as usize];
    let mut i = 1;
    while i < NUM_PINS {
        table[i as usize] = PinDescriptor::for_index(i);
        i += 1;
    }
    table
}

static PIN_TABLE: [PinDescriptor; NUM_PINS as usize] = build_table();

/// Copy the descriptor for `id` out of the table.
#[inline]
pub fn fetch(id: PinId) -> PinDescriptor {
    // `PinId` is always < NUM_PINS, so the index is in bounds.
    PIN_TABLE[id.raw() as usize]
}
