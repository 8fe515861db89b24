// Mecanum drivetrain controller
//
// Owns the four wheel motors, conditions drive inputs, runs the kinematics
// and writes the resulting powers to the motors.

use tracing::{debug, trace, warn};

use super::input::{DriveError, InputRange, Result};
use super::kinematics::{field_centric_wheel_speeds, heading_wheel_powers};
use super::motor::{Motor, MotorSlot, WheelPowers};
use crate::config::DEFAULT_MAX_SPEED;

/// Controller for a four-wheel mecanum base.
///
/// The drive methods are meant to be called once per control-loop iteration.
/// The drivetrain holds its motors exclusively for its whole lifetime and
/// stops them when dropped.
pub struct MecanumDrive<M: Motor> {
    motors: [M; 4], // [front_left, front_right, back_left, back_right]
    right_side_multiplier: f64,
    range: InputRange,
    max_output: f64,
}

impl<M: Motor> MecanumDrive<M> {
    /// Create a drivetrain with the right side inverted
    pub fn new(front_left: M, front_right: M, back_left: M, back_right: M) -> Self {
        Self::with_auto_invert(true, front_left, front_right, back_left, back_right)
    }

    /// Create a drivetrain, inverting the right side only if `auto_invert` is set
    pub fn with_auto_invert(
        auto_invert: bool,
        front_left: M,
        front_right: M,
        back_left: M,
        back_right: M,
    ) -> Self {
        let mut drive = Self {
            motors: [front_left, front_right, back_left, back_right],
            right_side_multiplier: 1.0,
            range: InputRange::default(),
            max_output: DEFAULT_MAX_SPEED,
        };
        drive.set_right_side_inverted(auto_invert);
        drive
    }

    /// True if the right side multiplier is -1
    pub fn is_right_side_inverted(&self) -> bool {
        self.right_side_multiplier == -1.0
    }

    pub fn set_right_side_inverted(&mut self, inverted: bool) {
        self.right_side_multiplier = if inverted { -1.0 } else { 1.0 };
        debug!("Right side inverted: {}", inverted);
    }

    pub fn range(&self) -> InputRange {
        self.range
    }

    /// Set the range drive inputs are clipped to.
    ///
    /// Rejects non-finite bounds and `min > max`; the previous range is kept.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<()> {
        match InputRange::new(min, max) {
            Ok(range) => {
                debug!("Input range set to [{}, {}]", min, max);
                self.range = range;
                Ok(())
            }
            Err(e) => {
                warn!("Rejected input range: {}", e);
                Err(e)
            }
        }
    }

    pub fn max_speed(&self) -> f64 {
        self.max_output
    }

    /// Set the multiplier applied to every wheel power of the trig-rotation drive.
    ///
    /// Rejects negative or non-finite values; the previous value is kept.
    pub fn set_max_speed(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            let e = DriveError::InvalidMaxSpeed(value);
            warn!("Rejected max speed: {}", e);
            return Err(e);
        }
        debug!("Max speed set to {}", value);
        self.max_output = value;
        Ok(())
    }

    /// Clip `value` into the configured range
    pub fn clip_range(&self, value: f64) -> f64 {
        self.range.clip(value)
    }

    /// Stop all four motors
    pub fn stop(&mut self) {
        debug!("Stopping all motors");
        for motor in self.motors.iter_mut() {
            motor.stop_motor();
        }
    }

    /// Drive relative to the robot's own forward direction
    ///
    /// # Arguments
    /// * `strafe` - Sideways speed, positive = right
    /// * `forward` - Forward speed, positive = forward
    /// * `turn` - Turn speed, positive = clockwise
    pub fn drive_robot_centric(&mut self, strafe: f64, forward: f64, turn: f64) {
        self.drive_field_centric(strafe, forward, turn, 0.0);
    }

    /// Robot-centric drive, optionally squaring each input for finer low-speed control
    pub fn drive_robot_centric_squared(
        &mut self,
        strafe: f64,
        forward: f64,
        turn: f64,
        square_inputs: bool,
    ) {
        let strafe = self.range.condition(strafe, square_inputs);
        let forward = self.range.condition(forward, square_inputs);
        let turn = self.range.condition(turn, square_inputs);

        self.drive_robot_centric(strafe, forward, turn);
    }

    /// Drive relative to the field: pushing forward always drives away from the
    /// driver, whatever the robot's heading.
    ///
    /// # Arguments
    /// * `strafe` - Sideways speed, positive = right
    /// * `forward` - Forward speed, positive = forward
    /// * `turn` - Turn speed, positive = clockwise
    /// * `gyro_angle` - Robot heading in radians, counter-clockwise positive
    pub fn drive_field_centric(
        &mut self,
        strafe: f64,
        forward: f64,
        turn: f64,
        gyro_angle: f64,
    ) {
        let strafe = self.clip_range(strafe);
        let forward = self.clip_range(forward);
        let turn = self.clip_range(turn);

        let speeds = field_centric_wheel_speeds(strafe, forward, turn, gyro_angle);

        let mut output = WheelPowers::zero();
        for slot in MotorSlot::ALL {
            let side = if slot.is_right_side() {
                self.right_side_multiplier
            } else {
                1.0
            };
            output[slot] = speeds[slot] * side * self.max_output;
        }

        trace!("Field-centric wheel powers: {:?}", output);
        self.write(output);
    }

    /// Field-centric drive, optionally squaring each input for finer low-speed control
    pub fn drive_field_centric_squared(
        &mut self,
        strafe: f64,
        forward: f64,
        turn: f64,
        gyro_angle: f64,
        square_inputs: bool,
    ) {
        let strafe = self.range.condition(strafe, square_inputs);
        let forward = self.range.condition(forward, square_inputs);
        let turn = self.range.condition(turn, square_inputs);

        self.drive_field_centric(strafe, forward, turn, gyro_angle);
    }

    /// Field-centric drive from raw joystick axes with the heading in degrees.
    ///
    /// Inputs are not clipped, and neither side inversion nor max speed is
    /// applied. The scaled powers go straight to the motors and may exceed 1.
    pub fn drive_field_centric_heading(
        &mut self,
        joystick_x: f64,
        joystick_y: f64,
        turn: f64,
        heading: f64,
    ) {
        let powers = heading_wheel_powers(joystick_x, joystick_y, turn, heading);
        trace!("Heading-form wheel powers: {:?}", powers);
        self.write(powers);
    }

    /// Read-only view of the motors in slot order
    pub fn motors(&self) -> &[M; 4] {
        &self.motors
    }

    pub fn motor(&self, slot: MotorSlot) -> &M {
        &self.motors[slot.index()]
    }

    fn write(&mut self, powers: WheelPowers) {
        for slot in MotorSlot::ALL {
            self.motors[slot.index()].set(powers[slot]);
        }
    }
}

impl<M: Motor> Drop for MecanumDrive<M> {
    fn drop(&mut self) {
        self.stop();
    }
}
