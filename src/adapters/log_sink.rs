//! Log-based event sink adapter, plus the host console logger.
//!
//! [`LogEventSink`] implements [`EventSink`] by writing structured
//! application events through the `log` facade.  On the host the facade is
//! backed by [`ConsoleLogger`]; on the board, by whatever serial logger the
//! binary installs.

use log::{info, warn};

use crate::app::events::{AppEvent, SensorKind};
use crate::app::ports::{EventSink, LedPattern};

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn led_flags(p: LedPattern) -> [char; 3] {
    [
        if p.blue { 'B' } else { '-' },
        if p.green { 'G' } else { '-' },
        if p.red { 'R' } else { '-' },
    ]
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                let [b, g, r] = led_flags(t.leds);
                info!(
                    "TELEM | tick={} | light={}% | T={}C | leds={}{}{} | fan={:?}@{}% | flame={}",
                    t.tick,
                    t.light_percent,
                    t.temperature_c,
                    b,
                    g,
                    r,
                    t.fan.state,
                    t.fan.speed,
                    if t.flame_alarm { "ALARM" } else { "clear" },
                );
            }
            AppEvent::LedPatternChanged { from, to } => {
                let [fb, fg, fr] = led_flags(*from);
                let [tb, tg, tr] = led_flags(*to);
                info!("LEDS  | {fb}{fg}{fr} -> {tb}{tg}{tr}");
            }
            AppEvent::FanChanged { from, to } => {
                info!("FAN   | {:?}@{}% -> {:?}@{}%", from.state, from.speed, to.state, to.speed);
            }
            AppEvent::FlameAlarm(true) => warn!("FLAME | alarm raised"),
            AppEvent::FlameAlarm(false) => info!("FLAME | alarm cleared"),
            AppEvent::SensorFault { sensor, error } => {
                let name = match sensor {
                    SensorKind::Light => "light",
                    SensorKind::Temperature => "temperature",
                };
                warn!("FAULT | {name}: {error}");
            }
            AppEvent::Started => info!("START | actuators off"),
        }
    }
}

// ── Host console logger ───────────────────────────────────────

#[cfg(not(target_arch = "avr"))]
pub use console::ConsoleLogger;

#[cfg(not(target_arch = "avr"))]
mod console {
    use std::io::Write as _;

    use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

    /// Minimal `log` backend writing `LEVEL target: message` lines to stderr.
    pub struct ConsoleLogger {
        level: LevelFilter,
    }

    static LOGGER: ConsoleLogger = ConsoleLogger { level: LevelFilter::Trace };

    impl ConsoleLogger {
        /// Install as the global logger with the given maximum level.
        pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
            log::set_logger(&LOGGER)?;
            log::set_max_level(level);
            Ok(())
        }
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record<'_>) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let mut err = std::io::stderr().lock();
            let _ = writeln!(err, "{:<5} {}: {}", record.level(), record.target(), record.args());
        }

        fn flush(&self) {
            let _ = std::io::stderr().flush();
        }
    }
}
