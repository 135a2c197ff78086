//! Actuator commands.
//!
//! Fan and LED commands are acknowledged and logged only. Nothing is sent to
//! a device yet; there is no broker or device link behind these calls.

use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FanCommand {
    /// Free-form speed, e.g. `"low"`, `"high"`, `"off"`. Not validated.
    pub speed: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LedCommand {
    pub state: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Display label for an LED state in log lines.
pub fn led_label(state: bool) -> &'static str {
    if state {
        "ON"
    } else {
        "OFF"
    }
}

pub fn apply_fan(command: &FanCommand) {
    info!(
        speed = %command.speed,
        user_id = ?command.user_id,
        "Fan command received; not forwarded to any device"
    );
}

pub fn apply_led(command: &LedCommand) {
    info!(
        state = led_label(command.state),
        user_id = ?command.user_id,
        "LED command received; not forwarded to any device"
    );
}
