// Motor capability and the fixed four-wheel ordering used by every wheel array

use std::ops::{Index, IndexMut};

/// A single motor output as seen by the drivetrain.
///
/// Implementations wrap whatever hardware (or simulation) sits behind the handle.
/// The drivetrain treats both calls as infallible: implementations must not
/// panic, and report or swallow hardware faults themselves.
pub trait Motor {
    /// Command a fractional duty, nominally in [-1.0, 1.0]
    fn set(&mut self, power: f64);

    /// Stop the motor
    fn stop_motor(&mut self);
}

/// Wheel position on the chassis. The discriminant is the index into every
/// four-wheel array in the crate.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorSlot {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl MotorSlot {
    /// All slots in index order
    pub const ALL: [MotorSlot; 4] = [
        MotorSlot::FrontLeft,
        MotorSlot::FrontRight,
        MotorSlot::BackLeft,
        MotorSlot::BackRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// True for the two motors affected by the side-inversion multiplier
    pub fn is_right_side(self) -> bool {
        matches!(self, MotorSlot::FrontRight | MotorSlot::BackRight)
    }
}

/// Four wheel powers indexed by [`MotorSlot`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelPowers(pub [f64; 4]);

impl WheelPowers {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(front_left: f64, front_right: f64, back_left: f64, back_right: f64) -> Self {
        Self([front_left, front_right, back_left, back_right])
    }

    /// Largest absolute value across the four wheels
    pub fn max_abs(&self) -> f64 {
        self.0.iter().fold(0.0, |acc, p| acc.max(p.abs()))
    }
}

impl Index<MotorSlot> for WheelPowers {
    type Output = f64;

    fn index(&self, slot: MotorSlot) -> &f64 {
        &self.0[slot.index()]
    }
}

impl IndexMut<MotorSlot> for WheelPowers {
    fn index_mut(&mut self, slot: MotorSlot) -> &mut f64 {
        &mut self.0[slot.index()]
    }
}

/// In-process motor that keeps the last commanded power.
///
/// Used by the runtime, which publishes what the drivetrain wrote instead of
/// driving hardware directly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatchedMotor {
    power: f64,
    stopped: bool,
}

impl LatchedMotor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last power written, 0.0 after a stop
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Whether the last call was `stop_motor`
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Motor for LatchedMotor {
    fn set(&mut self, power: f64) {
        self.power = power;
        self.stopped = false;
    }

    fn stop_motor(&mut self) {
        self.power = 0.0;
        self.stopped = true;
    }
}
