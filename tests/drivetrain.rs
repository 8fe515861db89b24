use std::cell::RefCell;
use std::rc::Rc;

use mecanum_zenoh_drive::drive::{LatchedMotor, MecanumDrive, Motor, MotorSlot};
use mecanum_zenoh_drive::messages::DriveCommand;
use mecanum_zenoh_drive::runtime::apply_command;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Call {
    Set(MotorSlot, f64),
    Stop(MotorSlot),
}

/// Motor that appends every call to a log shared by all four wheels
struct RecordingMotor {
    slot: MotorSlot,
    log: Rc<RefCell<Vec<Call>>>,
}

impl Motor for RecordingMotor {
    fn set(&mut self, power: f64) {
        self.log.borrow_mut().push(Call::Set(self.slot, power));
    }

    fn stop_motor(&mut self) {
        self.log.borrow_mut().push(Call::Stop(self.slot));
    }
}

fn recording_drive(auto_invert: bool) -> (MecanumDrive<RecordingMotor>, Rc<RefCell<Vec<Call>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let motor = |slot| RecordingMotor {
        slot,
        log: Rc::clone(&log),
    };
    let drive = MecanumDrive::with_auto_invert(
        auto_invert,
        motor(MotorSlot::FrontLeft),
        motor(MotorSlot::FrontRight),
        motor(MotorSlot::BackLeft),
        motor(MotorSlot::BackRight),
    );
    (drive, log)
}

/// Powers from the last four `set` calls, in slot order
fn last_powers(log: &Rc<RefCell<Vec<Call>>>) -> [f64; 4] {
    let mut powers = [f64::NAN; 4];
    for call in log.borrow().iter().rev().take(4) {
        if let Call::Set(slot, power) = *call {
            powers[slot.index()] = power;
        }
    }
    powers
}

const SAMPLES: [f64; 7] = [-1.5, -1.0, -0.4, 0.0, 0.3, 1.0, 2.0];
const HEADINGS: [f64; 4] = [0.0, 0.7, -2.1, 3.5];

#[test]
fn test_powers_bounded_by_max_speed() {
    for max_speed in [1.0, 0.6, 0.0] {
        let (mut drive, log) = recording_drive(true);
        drive.set_max_speed(max_speed).unwrap();

        for strafe in SAMPLES {
            for forward in SAMPLES {
                for turn in SAMPLES {
                    for heading in HEADINGS {
                        drive.drive_field_centric(strafe, forward, turn, heading);
                        for p in last_powers(&log) {
                            assert!(
                                p.abs() <= max_speed + 1e-9,
                                "power {p} exceeds {max_speed} for ({strafe}, {forward}, {turn}, {heading})"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_robot_centric_matches_zero_heading() {
    let (mut robot, robot_log) = recording_drive(true);
    let (mut field, field_log) = recording_drive(true);

    for strafe in SAMPLES {
        for forward in SAMPLES {
            for turn in SAMPLES {
                robot.drive_robot_centric(strafe, forward, turn);
                field.drive_field_centric(strafe, forward, turn, 0.0);
                assert_eq!(last_powers(&robot_log), last_powers(&field_log));
            }
        }
    }
}

#[test]
fn test_strafe_right_sign_pattern() {
    let (mut plain, plain_log) = recording_drive(false);
    let (mut inverted, inverted_log) = recording_drive(true);

    plain.drive_robot_centric(1.0, 0.0, 0.0);
    inverted.drive_robot_centric(1.0, 0.0, 0.0);

    let p = last_powers(&plain_log);
    assert!((p[0] - p[3]).abs() < 1e-9);
    assert!((p[1] - p[2]).abs() < 1e-9);
    assert!(p[0] > 0.0 && p[1] < 0.0);

    let q = last_powers(&inverted_log);
    assert!((q[0] - p[0]).abs() < 1e-9);
    assert!((q[2] - p[2]).abs() < 1e-9);
    assert!((q[1] + p[1]).abs() < 1e-9);
    assert!((q[3] + p[3]).abs() < 1e-9);
}

#[test]
fn test_pure_rotation_pattern() {
    let (mut drive, log) = recording_drive(false);
    drive.drive_robot_centric(0.0, 0.0, -0.6);

    let p = last_powers(&log);
    assert!((p[0] + 0.6).abs() < 1e-9);
    assert!((p[2] + 0.6).abs() < 1e-9);
    assert!((p[1] - 0.6).abs() < 1e-9);
    assert!((p[3] - 0.6).abs() < 1e-9);
}

#[test]
fn test_squared_conditioning_applies_to_every_input() {
    let (mut squared, squared_log) = recording_drive(true);
    let (mut manual, manual_log) = recording_drive(true);

    squared.drive_field_centric_squared(0.5, -0.8, 0.3, 0.4, true);
    manual.drive_field_centric(0.25, -0.64, 0.09, 0.4);

    let a = last_powers(&squared_log);
    let b = last_powers(&manual_log);
    for i in 0..4 {
        assert!((a[i] - b[i]).abs() < 1e-12);
    }
}

#[test]
fn test_each_drive_call_writes_all_motors() {
    let (mut drive, log) = recording_drive(true);
    drive.drive_field_centric_heading(0.3, 0.4, 0.1, 30.0);

    let slots: Vec<MotorSlot> = log
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Set(slot, _) => Some(*slot),
            Call::Stop(_) => None,
        })
        .collect();
    assert_eq!(slots.len(), 4);
    for slot in MotorSlot::ALL {
        assert!(slots.contains(&slot));
    }
}

#[test]
fn test_stop_reaches_every_motor() {
    let (mut drive, log) = recording_drive(true);
    drive.drive_robot_centric(0.2, 0.9, -0.1);
    log.borrow_mut().clear();

    drive.stop();
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Stop(MotorSlot::FrontLeft),
            Call::Stop(MotorSlot::FrontRight),
            Call::Stop(MotorSlot::BackLeft),
            Call::Stop(MotorSlot::BackRight),
        ]
    );
}

#[test]
fn test_drop_stops_motors() {
    let (drive, log) = recording_drive(true);
    drop(drive);
    let stops = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::Stop(_)))
        .count();
    assert_eq!(stops, 4);
}

/// Motor whose hardware has faulted: writes are dropped and counted, never panic
struct FaultedMotor {
    dropped_writes: u32,
    stop_requests: Rc<RefCell<u32>>,
}

impl Motor for FaultedMotor {
    fn set(&mut self, _power: f64) {
        self.dropped_writes += 1;
    }

    fn stop_motor(&mut self) {
        *self.stop_requests.borrow_mut() += 1;
    }
}

#[test]
fn test_stop_with_faulted_motor_reaches_all_motors() {
    let stops = Rc::new(RefCell::new(0));
    let faulted = |stops: &Rc<RefCell<u32>>| FaultedMotor {
        dropped_writes: 0,
        stop_requests: Rc::clone(stops),
    };
    let mut drive = MecanumDrive::new(
        faulted(&stops),
        faulted(&stops),
        faulted(&stops),
        faulted(&stops),
    );

    drive.drive_robot_centric(0.5, 0.5, 0.0);
    assert!(drive.motors().iter().all(|m| m.dropped_writes == 1));

    drive.stop();
    assert_eq!(*stops.borrow(), 4);
}

#[test]
fn test_field_centric_command_uses_heading() {
    let latched = || {
        MecanumDrive::new(
            LatchedMotor::new(),
            LatchedMotor::new(),
            LatchedMotor::new(),
            LatchedMotor::new(),
        )
    };
    let mut robot = latched();
    let mut field = latched();

    apply_command(
        &mut robot,
        &DriveCommand::RobotCentric {
            strafe: 0.0,
            forward: 0.6,
            turn: 0.0,
            square_inputs: true,
        },
    );
    apply_command(
        &mut field,
        &DriveCommand::FieldCentric {
            strafe: 0.0,
            forward: 0.6,
            turn: 0.0,
            gyro_angle: 45.0_f64.to_radians(),
            square_inputs: true,
        },
    );

    let robot_powers = robot.motors().map(|m| m.power());
    let field_powers = field.motors().map(|m| m.power());
    assert!(
        robot_powers
            .iter()
            .zip(field_powers.iter())
            .any(|(r, f)| (r - f).abs() > 1e-3)
    );

    // Heading 0 reproduces robot-centric output exactly
    apply_command(
        &mut field,
        &DriveCommand::FieldCentric {
            strafe: 0.0,
            forward: 0.6,
            turn: 0.0,
            gyro_angle: 0.0,
            square_inputs: true,
        },
    );
    assert_eq!(field.motors().map(|m| m.power()), robot_powers);
}
