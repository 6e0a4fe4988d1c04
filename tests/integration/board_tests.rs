//! End-to-end tests: ControlLoop driving the real drivers on [`SimBus`].
//!
//! Stimulus goes in through the simulated PIN/ADC registers; assertions are
//! made on PORT, OCR0 and the LCD data-port write trace.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::mock_hw::LogSink;

use smarthome::adapters::hardware::HardwareAdapter;
use smarthome::adc::WaitPolicy;
use smarthome::app::events::{AppEvent, SensorKind};
use smarthome::app::service::ControlLoop;
use smarthome::config::SystemConfig;
use smarthome::delay::CountingDelay;
use smarthome::error::AdcError;
use smarthome::interrupts;
use smarthome::pins;
use smarthome::registers::{OCR0, PIND, PORTB, PORTC, PORTD, SimBus};
use smarthome::timer0::{self, Vector};

/// Serializes tests that touch the Timer0 callback slot or the pending
/// interrupt queue.
static GLOBALS: Mutex<()> = Mutex::new(());

const LED_MASK: u8 = 0b1110_0000;
const BUZZER_MASK: u8 = 1 << 3;

type Board<'a> = HardwareAdapter<'a, SimBus, CountingDelay>;

fn boot<'a>(bus: &'a SimBus, config: &SystemConfig) -> (Board<'a>, ControlLoop, LogSink) {
    bus.drive_input(PIND, pins::BUTTON.bit(), true);
    let mut hw = HardwareAdapter::new(bus, config, CountingDelay::new());
    hw.init();
    let mut app = ControlLoop::new(config.clone());
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    (hw, app, sink)
}

fn lcd_text(bus: &SimBus) -> String {
    String::from_utf8_lossy(&bus.writes_to(PORTC)).into_owned()
}

#[test]
fn dark_and_warm_room() {
    let bus = SimBus::new();
    let (mut hw, mut app, mut sink) = boot(&bus, &SystemConfig::default());

    bus.set_analog(pins::LDR_CHANNEL, 20); // 10 %
    bus.set_analog(pins::LM35_CHANNEL, 124); // 31 C
    bus.clear_trace();
    app.tick(&mut hw, &mut sink);

    assert_eq!(bus.peek(PORTB) & LED_MASK, LED_MASK, "all three LEDs on");
    assert_eq!(bus.peek(OCR0), 127, "fan at 50 %");
    assert_eq!(bus.peek(PORTB) & 0b11, 0b01, "IN1 high, IN2 low");
    assert_eq!(bus.peek(PORTD) & BUZZER_MASK, 0);

    let text = lcd_text(&bus);
    assert!(text.contains("FAN is ON       "), "{text:?}");
    assert!(text.contains("Temp=31C LDR=10%"), "{text:?}");
}

#[test]
fn bright_and_cool_room() {
    let bus = SimBus::new();
    let (mut hw, mut app, mut sink) = boot(&bus, &SystemConfig::default());

    bus.set_analog(pins::LDR_CHANNEL, 180); // 90 %
    bus.set_analog(pins::LM35_CHANNEL, 80); // 20 C
    app.tick(&mut hw, &mut sink);

    assert_eq!(bus.peek(PORTB) & LED_MASK, 0);
    assert_eq!(bus.peek(OCR0), 0);
    assert_eq!(bus.peek(PORTB) & 0b11, 0, "motor stopped");
    assert!(lcd_text(&bus).contains("FAN is OFF"));
}

#[test]
fn flame_sounds_buzzer_and_shows_alert() {
    let bus = SimBus::new();
    let (mut hw, mut app, mut sink) = boot(&bus, &SystemConfig::default());
    bus.set_analog(pins::LDR_CHANNEL, 120);
    bus.set_analog(pins::LM35_CHANNEL, 100);

    bus.drive_input(PIND, pins::FLAME_SENSOR.bit(), true);
    bus.clear_trace();
    app.tick(&mut hw, &mut sink);
    assert_eq!(bus.peek(PORTD) & BUZZER_MASK, BUZZER_MASK);
    let text = lcd_text(&bus);
    assert!(text.contains(" CRITICAL ALERT "), "{text:?}");
    assert!(text.contains("      FIRE      "), "{text:?}");

    bus.drive_input(PIND, pins::FLAME_SENSOR.bit(), false);
    app.tick(&mut hw, &mut sink);
    assert_eq!(bus.peek(PORTD) & BUZZER_MASK, 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FlameAlarm(_))), 2);
}

#[test]
fn active_low_leds_invert_the_port() {
    let bus = SimBus::new();
    let config = SystemConfig {
        led_polarity: smarthome::drivers::Polarity::ActiveLow,
        ..SystemConfig::default()
    };
    let (mut hw, mut app, mut sink) = boot(&bus, &config);
    // Off at start means driven high.
    assert_eq!(bus.peek(PORTB) & LED_MASK, LED_MASK);

    bus.set_analog(pins::LDR_CHANNEL, 120); // 60 %: red only
    app.tick(&mut hw, &mut sink);
    assert_eq!(bus.peek(PORTB) & LED_MASK, 0b0110_0000);
}

#[test]
fn stalled_adc_reports_faults_and_holds_outputs() {
    let bus = SimBus::new();
    let config = SystemConfig {
        adc_wait: WaitPolicy::Bounded { max_polls: 8 },
        ..SystemConfig::default()
    };
    let (mut hw, mut app, mut sink) = boot(&bus, &config);

    bus.set_analog(pins::LDR_CHANNEL, 20);
    bus.set_analog(pins::LM35_CHANNEL, 160); // 40 C
    app.tick(&mut hw, &mut sink);
    assert_eq!(bus.peek(OCR0), 255);

    bus.stall_adc(true);
    app.tick(&mut hw, &mut sink);
    assert_eq!(bus.peek(OCR0), 255, "fan holds last speed");
    assert_eq!(bus.peek(PORTB) & LED_MASK, LED_MASK);
    assert!(sink.events.contains(&AppEvent::SensorFault {
        sensor: SensorKind::Light,
        error: AdcError::Timeout { channel: pins::LDR_CHANNEL },
    }));
    assert!(sink.events.contains(&AppEvent::SensorFault {
        sensor: SensorKind::Temperature,
        error: AdcError::Timeout { channel: pins::LM35_CHANNEL },
    }));
}

#[test]
fn button_press_emits_one_telemetry_per_press() {
    let bus = SimBus::new();
    let (mut hw, mut app, mut sink) = boot(&bus, &SystemConfig::default());

    app.tick(&mut hw, &mut sink);
    bus.drive_input(PIND, pins::BUTTON.bit(), false);
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    bus.drive_input(PIND, pins::BUTTON.bit(), true);
    app.tick(&mut hw, &mut sink);

    assert_eq!(sink.telemetry_count(), 1);
}

static HEARTBEATS: AtomicU32 = AtomicU32::new(0);

fn heartbeat() {
    HEARTBEATS.fetch_add(1, Ordering::Relaxed);
}

#[test]
fn pending_vectors_reach_the_timer_callback() {
    let _guard = GLOBALS.lock().unwrap_or_else(|e| e.into_inner());
    interrupts::clear();
    HEARTBEATS.store(0, Ordering::Relaxed);
    timer0::set_callback(heartbeat);

    assert!(interrupts::raise(Vector::Overflow));
    assert!(interrupts::raise(Vector::CompareMatch));
    assert_eq!(interrupts::pending_len(), 2);
    assert_eq!(interrupts::service_pending(), 2);
    assert_eq!(HEARTBEATS.load(Ordering::Relaxed), 2);

    timer0::clear_callback();
    assert!(interrupts::raise(Vector::Overflow));
    assert_eq!(interrupts::service_pending(), 1);
    assert_eq!(HEARTBEATS.load(Ordering::Relaxed), 2, "empty slot runs nothing");
}
