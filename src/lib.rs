//! Smart-home controller firmware library.
//!
//! Peripheral access for the ATmega32 (register map, identifier-addressed
//! GPIO, Timer0 PWM/CTC, ADC), the board drivers built on it, and the
//! application control loop behind hexagonal ports.
//!
//! Every driver is generic over [`registers::RegisterBus`]: volatile MMIO on
//! `target_arch = "avr"`, an in-memory [`registers::SimBus`] everywhere else
//! so the whole stack runs under `cargo test`.

#![cfg_attr(target_arch = "avr", no_std)]
#![deny(unused_must_use)]

pub mod adc;
pub mod adapters;
pub mod app;
pub mod config;
pub mod delay;
pub mod drivers;
pub mod error;
pub mod gpio;
pub mod interrupts;
pub mod pins;
pub mod registers;
pub mod sensors;
pub mod timer0;
pub mod util;

pub use error::{Error, Result};
