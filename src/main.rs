use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mecanum_zenoh_drive::config::{
    CMD_TIMEOUT, DEFAULT_MAX_SPEED, DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN, LOOP_HZ, RuntimeOptions,
};

/// Mecanum drivetrain runtime: drive commands in, wheel powers out
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Control loop frequency, 1 to 1000 Hz
    #[arg(long, default_value_t = LOOP_HZ)]
    loop_hz: u64,

    /// Stop the drivetrain when no command arrives within this many milliseconds
    #[arg(long, default_value_t = CMD_TIMEOUT.as_millis() as u64)]
    cmd_timeout_ms: u64,

    /// Do not invert the right-side motors
    #[arg(long)]
    no_auto_invert: bool,

    /// Lower bound drive inputs are clipped to
    #[arg(long, default_value_t = DEFAULT_RANGE_MIN, allow_hyphen_values = true)]
    range_min: f64,

    /// Upper bound drive inputs are clipped to
    #[arg(long, default_value_t = DEFAULT_RANGE_MAX, allow_hyphen_values = true)]
    range_max: f64,

    /// Multiplier applied to every wheel power
    #[arg(long, default_value_t = DEFAULT_MAX_SPEED)]
    max_speed: f64,
}

impl From<Args> for RuntimeOptions {
    fn from(args: Args) -> Self {
        Self {
            loop_hz: args.loop_hz,
            cmd_timeout: Duration::from_millis(args.cmd_timeout_ms),
            auto_invert: !args.no_auto_invert,
            range_min: args.range_min,
            range_max: args.range_max,
            max_speed: args.max_speed,
        }
    }
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init(); // installs the subscriber globally

    let options = RuntimeOptions::from(Args::parse());

    if let Err(e) = mecanum_zenoh_drive::runtime::run(options).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
