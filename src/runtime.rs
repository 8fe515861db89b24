// Fixed-rate drive loop with watchdog
// Note: if teleop stops sending commands, the watchdog stops the drivetrain
// instead of repeating the last command forever

use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

// local imports
use crate::config::{MAX_LOOP_HZ, RuntimeOptions, TOPIC_CMD_DRIVE, TOPIC_HEALTH, TOPIC_RT_WHEELS};
use crate::drive::{DriveError, LatchedMotor, MecanumDrive, Motor, WheelPowers};
use crate::messages::{DriveCommand, RuntimeHealth, WheelActuation};

/// Errors raised when starting the runtime from invalid options
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Drive(#[from] DriveError),

    #[error("Invalid loop rate {0} Hz: must be between 1 and {max}", max = MAX_LOOP_HZ)]
    InvalidLoopRate(u64),
}

pub struct Runtime {
    drive: MecanumDrive<LatchedMotor>,
    tick_period: Duration,
    cmd_timeout: Duration,
    latest_cmd: Option<DriveCommand>,
    cmd_received_at: Instant,
    health: RuntimeHealth,
}

impl Runtime {
    /// Build the drivetrain from `options`, failing on an invalid loop rate,
    /// range or max speed
    pub fn new(options: &RuntimeOptions) -> Result<Self, RuntimeError> {
        if options.loop_hz == 0 || options.loop_hz > MAX_LOOP_HZ {
            return Err(RuntimeError::InvalidLoopRate(options.loop_hz));
        }
        let tick_period = Duration::from_secs_f64(1.0 / options.loop_hz as f64);

        let mut drive = MecanumDrive::with_auto_invert(
            options.auto_invert,
            LatchedMotor::new(),
            LatchedMotor::new(),
            LatchedMotor::new(),
            LatchedMotor::new(),
        );
        drive.set_range(options.range_min, options.range_max)?;
        drive.set_max_speed(options.max_speed)?;

        Ok(Self {
            drive,
            tick_period,
            cmd_timeout: options.cmd_timeout,
            latest_cmd: None,
            cmd_received_at: Instant::now(),
            health: RuntimeHealth::CmdStale, // Start stale until first cmd
        })
    }

    /// Period of one control cycle
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn health(&self) -> RuntimeHealth {
        self.health
    }

    /// Process incoming command
    pub fn on_command(&mut self, cmd: DriveCommand) {
        if !cmd.is_finite() {
            warn!("Ignoring command with non-finite values: {:?}", cmd);
            return;
        }
        info!("Received command: {:?}", &cmd);
        self.latest_cmd = Some(cmd);
        self.cmd_received_at = Instant::now();
    }

    /// Run one control cycle and report what was written to the motors
    pub fn compute_actuation(&mut self) -> WheelActuation {
        let cmd_age = self.cmd_received_at.elapsed();

        match self.latest_cmd {
            Some(ref cmd) if cmd_age <= self.cmd_timeout => {
                self.health = RuntimeHealth::Ok;
                apply_command(&mut self.drive, cmd);
            }
            Some(_) => {
                // Watchdog triggered - stop the robot
                if self.health != RuntimeHealth::CmdStale {
                    warn!("Command stale ({:?} old), stopping drivetrain", cmd_age);
                }
                self.health = RuntimeHealth::CmdStale;
                self.drive.stop();
            }
            None => {
                // No command ever received
                self.health = RuntimeHealth::CmdStale;
                self.drive.stop();
            }
        }

        let powers = WheelPowers(self.drive.motors().map(|m| m.power()));
        WheelActuation::from(&powers)
    }
}

/// Dispatch a command to the matching drivetrain operation
pub fn apply_command<M: Motor>(drive: &mut MecanumDrive<M>, cmd: &DriveCommand) {
    match *cmd {
        DriveCommand::RobotCentric {
            strafe,
            forward,
            turn,
            square_inputs,
        } => drive.drive_robot_centric_squared(strafe, forward, turn, square_inputs),
        DriveCommand::FieldCentric {
            strafe,
            forward,
            turn,
            gyro_angle,
            square_inputs,
        } => drive.drive_field_centric_squared(strafe, forward, turn, gyro_angle, square_inputs),
        DriveCommand::FieldCentricHeading {
            joystick_x,
            joystick_y,
            turn,
            heading,
        } => drive.drive_field_centric_heading(joystick_x, joystick_y, turn, heading),
        DriveCommand::Stop => drive.stop(),
    }
}

pub async fn run(options: RuntimeOptions) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut runtime = Runtime::new(&options)?;

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let subscriber = session.declare_subscriber(TOPIC_CMD_DRIVE).await?;
    let pub_wheels = session.declare_publisher(TOPIC_RT_WHEELS).await?;
    let pub_health = session.declare_publisher(TOPIC_HEALTH).await?;

    let mut tick = interval(runtime.tick_period());

    info!(
        "Runtime started: {}Hz loop, {}ms watchdog timeout",
        options.loop_hz,
        options.cmd_timeout.as_millis()
    );
    info!("Subscribed to: {}", TOPIC_CMD_DRIVE);
    info!("Publishing to: {}, {}", TOPIC_RT_WHEELS, TOPIC_HEALTH);

    loop {
        tick.tick().await;

        // 1. Drain all pending commands (non-blocking), keep latest
        while let Ok(Some(sample)) = subscriber.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<DriveCommand>(&payload) {
                Ok(cmd) => {
                    runtime.on_command(cmd);
                }
                Err(e) => {
                    warn!("Failed to parse command: {}", e);
                }
            }
        }

        // 2. Drive (includes watchdog logic)
        let actuation = runtime.compute_actuation();

        // 3. Publish wheel powers
        let actuation_json = serde_json::to_string(&actuation)?;
        pub_wheels.put(actuation_json).await?;

        // 4. Publish health
        let health_json = serde_json::to_string(&runtime.health())?;
        pub_health.put(health_json).await?;
    }
}
