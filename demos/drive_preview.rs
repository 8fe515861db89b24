// Drive preview: prints the wheel powers the drivetrain writes for a few
// representative commands. No hardware or network needed.
//
// Usage: cargo run --example drive_preview -- [max_speed]

use mecanum_zenoh_drive::drive::{LatchedMotor, MecanumDrive, MotorSlot};
use mecanum_zenoh_drive::messages::DriveCommand;
use mecanum_zenoh_drive::runtime::apply_command;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let max_speed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<f64>()?,
        None => 1.0,
    };

    let mut drive = MecanumDrive::new(
        LatchedMotor::new(),
        LatchedMotor::new(),
        LatchedMotor::new(),
        LatchedMotor::new(),
    );
    drive.set_max_speed(max_speed)?;

    let robot = |strafe, forward, turn, square_inputs| DriveCommand::RobotCentric {
        strafe,
        forward,
        turn,
        square_inputs,
    };
    let commands = [
        ("forward", robot(0.0, 1.0, 0.0, false)),
        ("strafe right", robot(1.0, 0.0, 0.0, false)),
        ("turn in place", robot(0.0, 0.0, 0.5, false)),
        ("diagonal + turn", robot(0.5, 0.5, 0.3, true)),
        (
            "field fwd @ 90deg",
            DriveCommand::FieldCentric {
                strafe: 0.0,
                forward: 1.0,
                turn: 0.0,
                gyro_angle: std::f64::consts::FRAC_PI_2,
                square_inputs: false,
            },
        ),
        (
            "heading form x=1",
            DriveCommand::FieldCentricHeading {
                joystick_x: 1.0,
                joystick_y: 0.0,
                turn: 0.0,
                heading: 0.0,
            },
        ),
        ("stop", DriveCommand::Stop),
    ];

    println!(
        "max speed: {}, right side inverted: {}",
        drive.max_speed(),
        drive.is_right_side_inverted()
    );
    println!("{:<20} {:>8} {:>8} {:>8} {:>8}", "command", "FL", "FR", "BL", "BR");
    for (label, cmd) in &commands {
        apply_command(&mut drive, cmd);
        println!(
            "{:<20} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            label,
            drive.motor(MotorSlot::FrontLeft).power(),
            drive.motor(MotorSlot::FrontRight).power(),
            drive.motor(MotorSlot::BackLeft).power(),
            drive.motor(MotorSlot::BackRight).power(),
        );
    }

    Ok(())
}
