//! System configuration parameters
//!
//! All tunable parameters for the smart-home controller.  Defaults match
//! the shipped board; the host binary can override them from a JSON file.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::adc::WaitPolicy;
use crate::drivers::Polarity;
use crate::error::{Error, Result};
use crate::sensors::flame::ActiveLevel;

pub const MAX_FAN_STEPS: usize = 8;

/// Upper bounds (inclusive, percent) of the three lit light bands.
///
/// | Light %                     | LEDs             |
/// |-----------------------------|------------------|
/// | `..= all_on_max`            | blue, green, red |
/// | `..= green_red_max`         | green, red       |
/// | `..= red_only_max`          | red              |
/// | above                       | none             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightBands {
    pub all_on_max: u16,
    pub green_red_max: u16,
    pub red_only_max: u16,
}

impl Default for LightBands {
    fn default() -> Self {
        Self {
            all_on_max: 15,
            green_red_max: 50,
            red_only_max: 70,
        }
    }
}

/// Fan runs clockwise at `speed` percent when temperature ≥ `min_celsius`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanStep {
    pub min_celsius: u16,
    pub speed: u8,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Outputs ---
    pub led_polarity: Polarity,
    pub buzzer_polarity: Polarity,

    // --- Inputs ---
    pub flame_active_level: ActiveLevel,
    /// Enable the internal pull-up on the push button input.
    pub button_pull_up: bool,
    pub adc_wait: WaitPolicy,

    // --- Control tables ---
    pub light_bands: LightBands,
    /// Hottest first; the first step whose threshold is met wins.
    pub fan_steps: Vec<FanStep, MAX_FAN_STEPS>,

    // --- Timing ---
    /// Main loop period (milliseconds)
    pub loop_interval_ms: u32,
    /// LCD settle time between bus transitions (microseconds)
    pub lcd_settle_us: u32,
    /// Emit a telemetry event every N loop ticks (0 disables)
    pub telemetry_interval_ticks: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut fan_steps = Vec::new();
        for (min_celsius, speed) in [(40, 100), (35, 75), (30, 50), (25, 25)] {
            // Capacity is MAX_FAN_STEPS, well above four.
            let _ = fan_steps.push(FanStep { min_celsius, speed });
        }

        Self {
            led_polarity: Polarity::ActiveHigh,
            buzzer_polarity: Polarity::ActiveHigh,

            flame_active_level: ActiveLevel::High,
            button_pull_up: true,
            adc_wait: WaitPolicy::default(),

            light_bands: LightBands::default(),
            fan_steps,

            loop_interval_ms: 200,
            lcd_settle_us: 1,
            telemetry_interval_ticks: 25,
        }
    }
}

impl SystemConfig {
    /// Reject tables the control loop cannot interpret unambiguously.
    pub fn validate(&self) -> Result<()> {
        let b = &self.light_bands;
        if !(b.all_on_max < b.green_red_max && b.green_red_max < b.red_only_max) {
            return Err(Error::Config("light bands must be strictly increasing"));
        }

        if self.fan_steps.iter().any(|s| s.speed > 100) {
            return Err(Error::Config("fan speed above 100%"));
        }
        if self
            .fan_steps
            .windows(2)
            .any(|w| w[0].min_celsius <= w[1].min_celsius)
        {
            return Err(Error::Config("fan steps must be ordered hottest first"));
        }

        if let WaitPolicy::Bounded { max_polls: 0 } = self.adc_wait {
            return Err(Error::Config("ADC poll budget must be non-zero"));
        }
        if self.loop_interval_ms == 0 {
            return Err(Error::Config("loop interval must be non-zero"));
        }
        Ok(())
    }
}
