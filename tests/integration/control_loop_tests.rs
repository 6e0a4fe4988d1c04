//! Integration tests for the ControlLoop → ports pipeline.
//!
//! Scripted sensor snapshots go in through [`MockHardware`]; the recorded
//! actuator calls and emitted events come out.

use crate::mock_hw::{ActuatorCall, LogSink, MockHardware, reading, timed_out};

use smarthome::app::events::{AppEvent, SensorKind};
use smarthome::app::ports::{FanCommand, LedPattern};
use smarthome::app::service::{ALARM_BOTTOM, ControlLoop};
use smarthome::config::SystemConfig;
use smarthome::error::AdcError;
use smarthome::sensors::SensorSnapshot;

fn make_app() -> (ControlLoop, MockHardware, LogSink) {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_turns_everything_off_and_announces() {
    let (app, hw, sink) = make_app();
    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
    assert_eq!(sink.events, vec![AppEvent::Started]);
    assert_eq!(app.tick_count(), 0);
    assert_eq!(app.leds(), LedPattern::OFF);
    assert_eq!(app.fan(), FanCommand::OFF);
}

// ── Light → LEDs ──────────────────────────────────────────────

#[test]
fn light_sweep_walks_through_every_band() {
    let (mut app, mut hw, mut sink) = make_app();
    let expected = [
        (5, LedPattern::ALL_ON),
        (30, LedPattern::GREEN_RED),
        (60, LedPattern::RED_ONLY),
        (90, LedPattern::OFF),
    ];
    for (light, pattern) in expected {
        hw.push(reading(light, 20));
        app.tick(&mut hw, &mut sink);
        assert_eq!(app.leds(), pattern, "light {light}%");
    }
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::LedPatternChanged { .. })),
        4
    );
}

#[test]
fn unchanged_pattern_is_reapplied_but_not_reported() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(reading(10, 20));
    for _ in 0..3 {
        app.tick(&mut hw, &mut sink);
    }
    let applied = hw
        .calls
        .iter()
        .filter(|c| **c == ActuatorCall::SetLeds(LedPattern::ALL_ON))
        .count();
    assert_eq!(applied, 3);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::LedPatternChanged { .. })),
        1
    );
}

// ── Temperature → fan ─────────────────────────────────────────

#[test]
fn fan_speed_follows_temperature_steps() {
    let (mut app, mut hw, mut sink) = make_app();
    let expected = [
        (22, FanCommand::OFF),
        (27, FanCommand::clockwise(25)),
        (32, FanCommand::clockwise(50)),
        (37, FanCommand::clockwise(75)),
        (44, FanCommand::clockwise(100)),
        (24, FanCommand::OFF),
    ];
    for (celsius, fan) in expected {
        hw.push(reading(100, celsius));
        app.tick(&mut hw, &mut sink);
        assert_eq!(app.fan(), fan, "{celsius} C");
        assert_eq!(hw.fan(), fan);
    }
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FanChanged { .. })), 5);
}

#[test]
fn status_screen_reports_fan_and_readings() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(reading(42, 31));
    app.tick(&mut hw, &mut sink);
    let rows = hw.last_screen().expect("screen rendered");
    assert_eq!(rows[0], "FAN is ON       ");
    assert_eq!(rows[1], "Temp=31C LDR=42%");

    hw.push(reading(7, 20));
    app.tick(&mut hw, &mut sink);
    let rows = hw.last_screen().expect("screen rendered");
    assert_eq!(rows[0], "FAN is OFF      ");
    assert_eq!(rows[1], "Temp=20C LDR=7% ");
}

// ── Flame → buzzer ────────────────────────────────────────────

#[test]
fn flame_raises_and_clears_the_alarm() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push(SensorSnapshot { flame_detected: true, ..reading(50, 30) });
    app.tick(&mut hw, &mut sink);
    assert!(app.flame_alarm());
    assert!(hw.buzzer_on());
    let rows = hw.last_screen().expect("screen rendered");
    assert_eq!(rows[0], " CRITICAL ALERT ");
    assert_eq!(rows[1], ALARM_BOTTOM);

    // Fan and LEDs keep working during the alarm.
    assert_eq!(app.fan(), FanCommand::clockwise(50));
    assert_eq!(app.leds(), LedPattern::GREEN_RED);

    hw.push(reading(50, 30));
    app.tick(&mut hw, &mut sink);
    assert!(!app.flame_alarm());
    assert!(!hw.buzzer_on());
    assert_eq!(hw.last_screen().expect("screen rendered")[0], "FAN is ON       ");

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::FlameAlarm(_))),
        2,
        "one raise, one clear"
    );
}

#[test]
fn steady_flame_reports_once() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(SensorSnapshot { flame_detected: true, ..reading(50, 20) });
    for _ in 0..5 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(sink.count(|e| *e == AppEvent::FlameAlarm(true)), 1);
    assert!(hw.buzzer_on());
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn failed_conversion_keeps_previous_value() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(reading(10, 36));
    app.tick(&mut hw, &mut sink);

    hw.push(SensorSnapshot {
        light_percent: timed_out(0),
        temperature_c: timed_out(2),
        ..reading(0, 0)
    });
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.leds(), LedPattern::ALL_ON);
    assert_eq!(app.fan(), FanCommand::clockwise(75));
    let t = app.telemetry();
    assert_eq!((t.light_percent, t.temperature_c), (10, 36));

    assert!(sink.events.contains(&AppEvent::SensorFault {
        sensor: SensorKind::Light,
        error: AdcError::Timeout { channel: 0 },
    }));
    assert!(sink.events.contains(&AppEvent::SensorFault {
        sensor: SensorKind::Temperature,
        error: AdcError::Timeout { channel: 2 },
    }));
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_is_periodic() {
    let (mut app, mut hw, mut sink) = make_app();
    let interval = app.config().telemetry_interval_ticks;
    for _ in 0..interval * 2 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(sink.telemetry_count(), 2);
    match sink.events.last() {
        Some(AppEvent::Telemetry(t)) => assert_eq!(t.tick, interval * 2),
        other => panic!("expected telemetry last, got {other:?}"),
    }
}

#[test]
fn zero_interval_disables_periodic_telemetry() {
    let config = SystemConfig { telemetry_interval_ticks: 0, ..SystemConfig::default() };
    let mut app = ControlLoop::new(config);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    for _ in 0..100 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(sink.telemetry_count(), 0);
}

#[test]
fn button_press_requests_telemetry() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(reading(20, 26));
    hw.push(SensorSnapshot { button_pressed: true, ..reading(20, 26) });
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    assert_eq!(sink.telemetry_count(), 1);
    let telemetry = sink.events.iter().find_map(|e| match e {
        AppEvent::Telemetry(t) => Some(*t),
        _ => None,
    });
    let t = telemetry.expect("telemetry emitted");
    assert_eq!(t.tick, 2);
    assert_eq!(t.leds, LedPattern::GREEN_RED);
    assert_eq!(t.fan, FanCommand::clockwise(25));
    assert!(!t.flame_alarm);
}

#[test]
fn custom_light_bands_are_honoured() {
    let mut config = SystemConfig::default();
    config.light_bands.all_on_max = 5;
    config.light_bands.green_red_max = 10;
    config.light_bands.red_only_max = 20;
    config.validate().expect("bands are increasing");

    let mut app = ControlLoop::new(config);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);

    hw.push(reading(15, 20));
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.leds(), LedPattern::RED_ONLY);
}
