//! Fuzz target: `SystemConfig` JSON loading
//!
//! Feeds arbitrary bytes through the same parse-then-validate path the host
//! binary uses for config files.  Any config that validates must drive the
//! pure decision helpers without panicking.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use smarthome::app::service::{compose_screen, fan_for, led_pattern_for};
use smarthome::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<SystemConfig>(data) else {
        return;
    };
    if config.validate().is_err() {
        return;
    }

    for value in [0u16, 15, 50, 100, 255, u16::MAX] {
        let leds = led_pattern_for(value, &config.light_bands);
        let fan = fan_for(value, &config.fan_steps);
        assert!(fan.speed <= 100);
        let screen = compose_screen(leds.red, fan, value, value);
        assert!(screen.rows.iter().all(|r| r.len() >= 16));
    }
});
