// Mecanum inverse kinematics for a four-wheel base
// Converts (strafe, forward, turn, heading) commands to normalized wheel powers.
//
// Two formulations are kept side by side. They differ in angle units, wheel
// scaling and in whether the caller applies side inversion, so they are not
// interchangeable.

use std::f64::consts::FRAC_PI_4;

use nalgebra::Vector2;

use super::motor::{MotorSlot, WheelPowers};
use super::vector::{polar, rotate};

/// Below this the raw wheel vector carries no direction
const NORMALIZE_EPSILON: f64 = 1e-12;

/// Trig-rotation form.
///
/// Rotates `(strafe, forward)` by `-gyro_angle` into the robot frame, projects
/// it onto the two roller diagonals, superposes the turn term and keeps every
/// wheel within [-1, 1]. Side inversion and max output are applied by the caller.
///
/// # Arguments
/// * `strafe` - Sideways speed, positive = right
/// * `forward` - Forward speed, positive = forward
/// * `turn` - Turn speed, positive = clockwise
/// * `gyro_angle` - Robot heading in radians (0.0 for robot-centric drive)
pub fn field_centric_wheel_speeds(
    strafe: f64,
    forward: f64,
    turn: f64,
    gyro_angle: f64,
) -> WheelPowers {
    let input = rotate(&Vector2::new(strafe, forward), -gyro_angle);
    let (theta, magnitude) = polar(&input);

    let mut speeds = WheelPowers::zero();
    speeds[MotorSlot::FrontLeft] = (theta + FRAC_PI_4).sin();
    speeds[MotorSlot::FrontRight] = (theta - FRAC_PI_4).sin();
    speeds[MotorSlot::BackLeft] = (theta - FRAC_PI_4).sin();
    speeds[MotorSlot::BackRight] = (theta + FRAC_PI_4).sin();

    normalize_to_magnitude(&mut speeds.0, magnitude);

    speeds[MotorSlot::FrontLeft] += turn;
    speeds[MotorSlot::FrontRight] -= turn;
    speeds[MotorSlot::BackLeft] += turn;
    speeds[MotorSlot::BackRight] -= turn;

    normalize(&mut speeds.0);
    speeds
}

/// Scale so the largest absolute value equals `magnitude`.
/// An all-zero input is left unchanged.
pub fn normalize_to_magnitude(speeds: &mut [f64; 4], magnitude: f64) {
    let max = max_abs(speeds);
    if max < NORMALIZE_EPSILON {
        return;
    }
    for speed in speeds.iter_mut() {
        *speed = *speed / max * magnitude;
    }
}

/// Scale down (never up) so no value exceeds 1 in magnitude
pub fn normalize(speeds: &mut [f64; 4]) {
    let max = max_abs(speeds);
    if max > 1.0 {
        for speed in speeds.iter_mut() {
            *speed /= max;
        }
    }
}

/// Polar form of a joystick deflection: `(angle in degrees, magnitude)`.
///
/// The angle is shifted by 180 degrees so that the reference direction matches
/// the heading formulation below.
pub fn joystick_polar(joystick_x: f64, joystick_y: f64) -> (f64, f64) {
    let angle = joystick_y.atan2(joystick_x).to_degrees() + 180.0;
    let magnitude = (joystick_x.powi(2) + joystick_y.powi(2)).sqrt();
    (angle, magnitude)
}

/// Angle/magnitude form with the heading in degrees.
///
/// Powers are scaled with [`scale_powers`], which may scale up past 1.0.
/// No side inversion is applied to this formulation.
///
/// # Arguments
/// * `joystick_x` - Joystick X deflection
/// * `joystick_y` - Joystick Y deflection
/// * `turn` - Turn speed
/// * `heading` - Robot heading in degrees
pub fn heading_wheel_powers(
    joystick_x: f64,
    joystick_y: f64,
    turn: f64,
    heading: f64,
) -> WheelPowers {
    let (angle, magnitude) = joystick_polar(joystick_x, joystick_y);
    let absolute = angle - heading;

    // FL/BR share one diagonal, FR/BL the other
    let v1 = magnitude * (absolute + 45.0).to_radians().sin();
    let v2 = magnitude * (absolute - 45.0).to_radians().sin();

    // [front_left, back_left, front_right, back_right]
    let mut powers = [v1 + turn, v2 + turn, v2 - turn, v1 - turn];
    scale_powers(&mut powers);

    let mut wheels = WheelPowers::zero();
    wheels[MotorSlot::FrontLeft] = powers[0];
    wheels[MotorSlot::BackLeft] = powers[1];
    wheels[MotorSlot::FrontRight] = powers[2];
    wheels[MotorSlot::BackRight] = powers[3];
    wheels
}

/// Fit powers to the motor range: all zeros stay zero, a max above 1 is scaled
/// down to exactly 1, anything else is multiplied by `1 / sin(135°)`.
///
/// The scale-up branch can leave values above 1 and is not idempotent.
pub fn scale_powers(powers: &mut [f64; 4]) {
    let max = max_abs(powers);
    if max == 0.0 {
        return;
    }

    if max > 1.0 {
        for power in powers.iter_mut() {
            *power /= max;
        }
    } else {
        let factor = 1.0 / 135.0_f64.to_radians().sin();
        for power in powers.iter_mut() {
            *power *= factor;
        }
    }
}

fn max_abs(values: &[f64; 4]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}
