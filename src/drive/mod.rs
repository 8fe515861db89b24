// Mecanum drive core
//
// Provides:
// - Motor capability and fixed wheel ordering
// - Input conditioning (range clipping, squaring)
// - Mecanum inverse kinematics (drive command -> wheel powers)
// - Drivetrain controller owning the four motors

mod drivetrain;
pub mod input;
pub mod kinematics;
pub mod motor;
pub mod vector;

pub use drivetrain::MecanumDrive;
pub use input::{DriveError, InputRange};
pub use kinematics::{field_centric_wheel_speeds, heading_wheel_powers, scale_powers};
pub use motor::{LatchedMotor, Motor, MotorSlot, WheelPowers};
