//! 10-bit successive-approximation ADC driver.
//!
//! Reference is the internal 2.56 V bandgap, prescaler /128, polled (no
//! interrupt).  A conversion is started by setting ADSC and finishes when
//! ADIF rises; ADIF is cleared by writing a one to it.
//!
//! The poll loop is bounded by [`WaitPolicy`].  With
//! [`WaitPolicy::Unbounded`] a stuck converter hangs the caller, exactly as
//! the bare busy-wait would.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::AdcError;
use crate::registers::{ADCH, ADCL, ADCSRA, ADMUX, RegisterBus, adcsra, admux, bit};

pub const CHANNELS: u8 = 8;
pub const MAX_READING: u16 = 1023;
pub const REFERENCE_MV: u32 = 2560;

/// How long [`Adc::read_channel`] waits for ADIF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitPolicy {
    Unbounded,
    Bounded { max_polls: u32 },
}

impl Default for WaitPolicy {
    fn default() -> Self {
        // A /128 conversion takes 13 ADC clocks = 1664 CPU cycles; each poll
        // is at least a handful of cycles, so this is generous.
        Self::Bounded { max_polls: 10_000 }
    }
}

pub struct Adc<'a, B: RegisterBus> {
    bus: &'a B,
    policy: WaitPolicy,
}

impl<B: RegisterBus> Clone for Adc<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: RegisterBus> Copy for Adc<'_, B> {}

impl<'a, B: RegisterBus> Adc<'a, B> {
    pub fn new(bus: &'a B, policy: WaitPolicy) -> Self {
        Self { bus, policy }
    }

    pub fn policy(&self) -> WaitPolicy {
        self.policy
    }

    pub fn init(&self) {
        self.bus.write(ADMUX, bit(admux::REFS1) | bit(admux::REFS0));
        // Enable with prescaler /128, interrupt off, and clear any stale flag.
        self.bus.write(
            ADCSRA,
            bit(adcsra::ADEN) | bit(adcsra::ADIF) | adcsra::ADPS_MASK,
        );
        debug!("adc: enabled, vref=2.56V, prescaler=/128");
    }

    /// Start a single conversion on `channel` and return the 10-bit result.
    pub fn read_channel(&self, channel: u8) -> Result<u16, AdcError> {
        if channel >= CHANNELS {
            warn!("adc: rejected channel {channel}");
            return Err(AdcError::InvalidChannel(channel));
        }

        self.bus.modify(ADMUX, |v| (v & admux::CONFIG_MASK) | channel);
        // Any ADIF set before the start belongs to an earlier conversion
        // (e.g. one that timed out); clear it in the same write.
        self.bus.modify(ADCSRA, |v| v | bit(adcsra::ADSC) | bit(adcsra::ADIF));

        if !self.wait_for_completion() {
            warn!("adc: conversion on channel {channel} timed out");
            return Err(AdcError::Timeout { channel });
        }

        self.bus.modify(ADCSRA, |v| v | bit(adcsra::ADIF));
        // ADCL first: reading it locks ADCH until ADCH is read.
        let low = self.bus.read(ADCL) as u16;
        let high = self.bus.read(ADCH) as u16;
        Ok(((high << 8) | low) & MAX_READING)
    }

    /// Conversion result scaled to millivolts against the 2.56 V reference.
    pub fn read_millivolts(&self, channel: u8) -> Result<u32, AdcError> {
        let raw = self.read_channel(channel)?;
        Ok(raw as u32 * REFERENCE_MV / MAX_READING as u32)
    }

    fn conversion_done(&self) -> bool {
        self.bus.get_bit(ADCSRA, adcsra::ADIF) != 0
    }

    fn wait_for_completion(&self) -> bool {
        match self.policy {
            WaitPolicy::Unbounded => {
                while !self.conversion_done() {
                    core::hint::spin_loop();
                }
                true
            }
            WaitPolicy::Bounded { max_polls } => {
                for _ in 0..max_polls {
                    if self.conversion_done() {
                        return true;
                    }
                    core::hint::spin_loop();
                }
                self.conversion_done()
            }
        }
    }
}
