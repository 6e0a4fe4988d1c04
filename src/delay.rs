//! Blocking delays behind `embedded_hal::delay::DelayNs`.
//!
//! - [`CycleDelay`]: calibrated spin loop for the bare-metal target.
//! - [`StdDelay`]: `std::thread::sleep`, for the host simulation binary.
//! - [`CountingDelay`]: records requested time without waiting; tests and
//!   fast simulation use it to assert protocol timing.

use embedded_hal::delay::DelayNs;

/// Default CPU clock of the board.
pub const DEFAULT_CPU_HZ: u32 = 8_000_000;

/// Busy-wait delay calibrated against the CPU clock.
#[derive(Debug, Clone, Copy)]
pub struct CycleDelay {
    cpu_hz: u32,
}

impl CycleDelay {
    /// Approximate cycles per spin iteration (loop overhead + `spin_loop`).
    const CYCLES_PER_SPIN: u32 = 4;

    pub const fn new(cpu_hz: u32) -> Self {
        Self { cpu_hz }
    }
}

impl Default for CycleDelay {
    fn default() -> Self {
        Self::new(DEFAULT_CPU_HZ)
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (u64::from(ns) * u64::from(self.cpu_hz)).div_ceil(1_000_000_000);
        let spins = cycles.div_ceil(u64::from(Self::CYCLES_PER_SPIN));
        for _ in 0..spins {
            core::hint::spin_loop();
        }
    }
}

#[cfg(not(target_arch = "avr"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

#[cfg(not(target_arch = "avr"))]
impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Accumulates the total requested delay instead of waiting.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingDelay {
    total_ns: u64,
    calls: u32,
}

impl CountingDelay {
    pub const fn new() -> Self {
        Self { total_ns: 0, calls: 0 }
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us.saturating_mul(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
        self.calls += 1;
    }
}
