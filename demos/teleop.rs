// Keyboard teleop: WASD strafe/forward, Z/X turn, R/F speed, C toggle field-centric,
// [/] nudge the simulated heading, Q quit
//
// Usage: cargo run --example teleop
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use mecanum_zenoh_drive::config::TOPIC_CMD_DRIVE;
use mecanum_zenoh_drive::messages::DriveCommand;
use std::time::{Duration, Instant};
use tracing::info;

const SPEEDS: [f64; 3] = [0.3, 0.6, 1.0]; // fraction of full power
const INPUT_TIMEOUT_MS: u64 = 100; // Reset inputs after this much time with no key press
const HEADING_STEP_DEG: f64 = 15.0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher(TOPIC_CMD_DRIVE).await?;

    info!("Controls: WASD=move, Z/X=turn, R/F=speed, C=field-centric, [/]=heading, Q=quit");
    info!("Speed: LOW");

    enable_raw_mode()?;
    let result = run_teleop(&publisher).await;
    disable_raw_mode()?;

    result
}

async fn run_teleop(
    publisher: &zenoh::pubsub::Publisher<'_>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut speed_idx: usize = 0;
    let mut field_centric = false;
    // No gyro on the keyboard: the heading is simulated, in degrees
    let mut heading_deg: f64 = 0.0;

    let mut strafe = 0.0;
    let mut forward = 0.0;
    let mut turn = 0.0;
    let mut last_movement_input = Instant::now();

    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;

                match code {
                    KeyCode::Char('w') if pressed => {
                        forward = SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        forward = -SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        strafe = -SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        strafe = SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }

                    // Turn, positive = clockwise
                    KeyCode::Char('z') if pressed => {
                        turn = -SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('x') if pressed => {
                        turn = SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }

                    KeyCode::Char('r') if pressed => {
                        speed_idx = (speed_idx + 1).min(2);
                        print_speed(speed_idx);
                    }
                    KeyCode::Char('f') if pressed => {
                        speed_idx = speed_idx.saturating_sub(1);
                        print_speed(speed_idx);
                    }

                    KeyCode::Char('c') if kind == KeyEventKind::Press => {
                        field_centric = !field_centric;
                        info!("Field-centric: {}", field_centric);
                    }

                    // Counter-clockwise positive
                    KeyCode::Char('[') if pressed => {
                        heading_deg = (heading_deg + HEADING_STEP_DEG).rem_euclid(360.0);
                        info!("Heading: {}°", heading_deg);
                    }
                    KeyCode::Char(']') if pressed => {
                        heading_deg = (heading_deg - HEADING_STEP_DEG).rem_euclid(360.0);
                        info!("Heading: {}°", heading_deg);
                    }

                    KeyCode::Char('q') | KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        if last_movement_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            strafe = 0.0;
            forward = 0.0;
            turn = 0.0;
        }

        let cmd = if field_centric {
            DriveCommand::FieldCentric {
                strafe,
                forward,
                turn,
                gyro_angle: heading_deg.to_radians(),
                square_inputs: true,
            }
        } else {
            DriveCommand::RobotCentric {
                strafe,
                forward,
                turn,
                square_inputs: true,
            }
        };
        publisher.put(serde_json::to_string(&cmd)?).await?;
    }

    publisher.put(serde_json::to_string(&DriveCommand::Stop)?).await?;
    Ok(())
}

fn print_speed(idx: usize) {
    let label = ["LOW", "MED", "HIGH"][idx];
    info!("Speed: {}", label);
}
