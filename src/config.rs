// Timeouts, topics, drivetrain defaults
use std::time::Duration;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;
pub const MAX_LOOP_HZ: u64 = 1000;

// Command timeout for watchdog
pub const CMD_TIMEOUT: Duration = Duration::from_millis(250);

// Zenoh topics
pub const TOPIC_CMD_DRIVE: &str = "mecanum/cmd/drive"; // commands
pub const TOPIC_RT_WHEELS: &str = "mecanum/rt/wheels"; // wheel powers
pub const TOPIC_HEALTH: &str = "mecanum/state/health"; // health status

// Drivetrain defaults
pub const DEFAULT_RANGE_MIN: f64 = -1.0;
pub const DEFAULT_RANGE_MAX: f64 = 1.0;
pub const DEFAULT_MAX_SPEED: f64 = 1.0;

/// Settings the runtime is started with
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeOptions {
    pub loop_hz: u64,
    pub cmd_timeout: Duration,
    pub auto_invert: bool,
    pub range_min: f64,
    pub range_max: f64,
    pub max_speed: f64,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            loop_hz: LOOP_HZ,
            cmd_timeout: CMD_TIMEOUT,
            auto_invert: true,
            range_min: DEFAULT_RANGE_MIN,
            range_max: DEFAULT_RANGE_MAX,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}
