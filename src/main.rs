//! Smart-home controller: host simulation entry point.
//!
//! Runs the full firmware stack against the in-memory register file and
//! feeds it a scripted sweep of light, temperature, flame and button input.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter (SensorPort + ActuatorPort)   LogEventSink    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlLoop (pure logic)                  │    │
//! │  │  light bands · fan table · flame alarm · status screen │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Drivers → IndexedGpio / PortGpio / Timer0 / ADC → SimBus      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `smarthome [CONFIG.json] [ITERATIONS]`
#![deny(unused_must_use)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use log::{LevelFilter, info};

use smarthome::adapters::hardware::HardwareAdapter;
use smarthome::adapters::log_sink::{ConsoleLogger, LogEventSink};
use smarthome::app::service::ControlLoop;
use smarthome::config::SystemConfig;
use smarthome::delay::CountingDelay;
use smarthome::interrupts;
use smarthome::pins;
use smarthome::registers::{PIND, SimBus};
use smarthome::sensors::flame::ActiveLevel;
use smarthome::timer0::{self, Vector};

const DEFAULT_ITERATIONS: u32 = 60;

// ── Timer heartbeat ───────────────────────────────────────────

static HEARTBEATS: AtomicU32 = AtomicU32::new(0);

fn heartbeat() {
    HEARTBEATS.fetch_add(1, Ordering::Relaxed);
}

// ── Scripted environment ──────────────────────────────────────

/// Sensor inputs for one iteration of the sweep.
struct Stimulus {
    ldr_raw: u16,
    lm35_raw: u16,
    flame: bool,
    button_down: bool,
}

fn stimulus(i: u32, iterations: u32) -> Stimulus {
    let phase = i * 256 / iterations.max(1);
    Stimulus {
        // 0 → 250 raw: dark through past full scale.
        ldr_raw: (phase * 250 / 256) as u16,
        // 80 → 180 raw: about 20 °C to 45 °C.
        lm35_raw: (80 + phase * 100 / 256) as u16,
        flame: (iterations * 2 / 3..iterations * 3 / 4).contains(&i),
        button_down: i % 20 == 10,
    }
}

fn load_config(path: Option<&str>) -> Result<SystemConfig> {
    let Some(path) = path else {
        return Ok(SystemConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config: SystemConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config.validate().with_context(|| format!("validating {path}"))?;
    info!("Config loaded from {path}");
    Ok(config)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    ConsoleLogger::init(LevelFilter::Info).map_err(|e| anyhow!("installing logger: {e}"))?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartHome v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let iterations = match args.get(1) {
        Some(n) => n.parse::<u32>().with_context(|| format!("bad iteration count {n:?}"))?,
        None => DEFAULT_ITERATIONS,
    };
    if iterations == 0 {
        bail!("iteration count must be positive");
    }

    // ── 3. Hardware ───────────────────────────────────────────
    let bus = SimBus::new();
    // Button released (pulled high) before the input is sampled.
    bus.drive_input(PIND, pins::BUTTON.bit(), true);

    let mut hw = HardwareAdapter::new(&bus, &config, CountingDelay::new());
    hw.init();

    timer0::set_callback(heartbeat);
    interrupts::clear();

    // ── 4. Control loop ───────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = ControlLoop::new(config.clone());
    app.start(&mut hw, &mut sink);

    info!("System ready. Running {iterations} iterations.");

    for i in 0..iterations {
        let s = stimulus(i, iterations);
        bus.set_analog(pins::LDR_CHANNEL, s.ldr_raw);
        bus.set_analog(pins::LM35_CHANNEL, s.lm35_raw);
        let flame_high = match config.flame_active_level {
            ActiveLevel::High => s.flame,
            ActiveLevel::Low => !s.flame,
        };
        bus.drive_input(PIND, pins::FLAME_SENSOR.bit(), flame_high);
        bus.drive_input(PIND, pins::BUTTON.bit(), !s.button_down);

        // The PWM timer overflows continuously; one notification per tick
        // stands in for the hardware vector.
        interrupts::raise(Vector::Overflow);
        interrupts::service_pending();

        app.tick(&mut hw, &mut sink);

        std::thread::sleep(Duration::from_millis(u64::from(config.loop_interval_ms)));
    }

    let t = app.telemetry();
    info!(
        "Done: {} ticks, {} timer heartbeats, fan {:?}@{}%, LCD waited {} us",
        t.tick,
        HEARTBEATS.load(Ordering::Relaxed),
        t.fan.state,
        t.fan.speed,
        hw.lcd().delay().total_us(),
    );
    Ok(())
}
