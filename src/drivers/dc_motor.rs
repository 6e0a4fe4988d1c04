//! DC fan motor: two direction pins plus a PWM enable on OC0.
//!
//! ## Hardware
//!
//! | Signal | Pin | Function                         |
//! |--------|-----|----------------------------------|
//! | IN1    | PB0 | H-bridge input 1                 |
//! | IN2    | PB1 | H-bridge input 2                 |
//! | EN     | PB3 | OC0, Timer0 fast PWM (/8, clear) |
//!
//! Speed is a percentage (0–100), clamped, then scaled to the 8-bit
//! compare value.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::gpio::indexed::IndexedGpio;
use crate::gpio::{Direction, Level};
use crate::pins;
use crate::registers::RegisterBus;
use crate::timer0::{ClockSource, CompareOutput, Mode, Timer0, Timer0Config};
use crate::util::percent_to_duty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorState {
    Clockwise,
    CounterClockwise,
    Stop,
}

/// Timer0 setup for the enable line.
pub const MOTOR_PWM: Timer0Config = Timer0Config {
    mode: Mode::FastPwm,
    clock: ClockSource::Div8,
    compare_output: CompareOutput::ClearOnMatch,
    interrupt: false,
    tick: 255,
    initial_count: 0,
};

pub struct DcMotor<'a, B: RegisterBus> {
    gpio: IndexedGpio<'a, B>,
    timer: Timer0<'a, B>,
    state: MotorState,
    speed: u8,
}

impl<'a, B: RegisterBus> DcMotor<'a, B> {
    pub fn new(gpio: IndexedGpio<'a, B>, timer: Timer0<'a, B>) -> Self {
        Self {
            gpio,
            timer,
            state: MotorState::Stop,
            speed: 0,
        }
    }

    pub fn init(&mut self) {
        self.timer.init(&MOTOR_PWM);
        for pin in [pins::MOTOR_IN1, pins::MOTOR_IN2, pins::MOTOR_ENABLE] {
            self.gpio.pin(pin).set_direction(Direction::Output);
        }
    }

    /// Set direction, then duty.  `speed` above 100 is treated as 100.
    pub fn rotate(&mut self, state: MotorState, speed: u8) {
        let (in1, in2) = match state {
            MotorState::Clockwise => (Level::High, Level::Low),
            MotorState::CounterClockwise => (Level::Low, Level::High),
            MotorState::Stop => (Level::Low, Level::Low),
        };
        self.gpio.pin(pins::MOTOR_IN1).write(in1);
        self.gpio.pin(pins::MOTOR_IN2).write(in2);

        let speed = speed.min(100);
        self.timer.set_duty_cycle(percent_to_duty(speed));

        if state != self.state || speed != self.speed {
            debug!("motor: {state:?} @ {speed}%");
        }
        self.state = state;
        self.speed = speed;
    }

    pub fn stop(&mut self) {
        self.rotate(MotorState::Stop, 0);
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn duty(&self) -> u8 {
        self.timer.duty_cycle()
    }
}
