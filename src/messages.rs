// Define message types for the runtime

use serde::{Deserialize, Serialize};

use crate::drive::{MotorSlot, WheelPowers};

// Command from teleop/scripts -> runtime
// The "mode" field selects which drive operation the runtime calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DriveCommand {
    RobotCentric {
        strafe: f64,
        forward: f64,
        turn: f64,
        #[serde(default)]
        square_inputs: bool,
    },
    FieldCentric {
        strafe: f64,
        forward: f64,
        turn: f64,
        /// radians
        gyro_angle: f64,
        #[serde(default)]
        square_inputs: bool,
    },
    FieldCentricHeading {
        joystick_x: f64,
        joystick_y: f64,
        turn: f64,
        /// degrees
        heading: f64,
    },
    Stop,
}

impl DriveCommand {
    /// True if every numeric field is finite
    pub fn is_finite(&self) -> bool {
        // Unused slots are padded with 0.0
        let values: [f64; 4] = match self {
            DriveCommand::RobotCentric {
                strafe,
                forward,
                turn,
                ..
            } => [*strafe, *forward, *turn, 0.0],
            DriveCommand::FieldCentric {
                strafe,
                forward,
                turn,
                gyro_angle,
                ..
            } => [*strafe, *forward, *turn, *gyro_angle],
            DriveCommand::FieldCentricHeading {
                joystick_x,
                joystick_y,
                turn,
                heading,
            } => [*joystick_x, *joystick_y, *turn, *heading],
            DriveCommand::Stop => [0.0; 4],
        };
        values.iter().all(|v| v.is_finite())
    }
}

// Wheel powers written by the drivetrain -> motor hardware
// Has default values because a stopped base reports zeros
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct WheelActuation {
    pub front_left: f64,
    pub front_right: f64,
    pub back_left: f64,
    pub back_right: f64,
}

impl From<&WheelPowers> for WheelActuation {
    fn from(powers: &WheelPowers) -> Self {
        Self {
            front_left: powers[MotorSlot::FrontLeft],
            front_right: powers[MotorSlot::FrontRight],
            back_left: powers[MotorSlot::BackLeft],
            back_right: powers[MotorSlot::BackRight],
        }
    }
}

/// Health status published by runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    CmdStale,
}
