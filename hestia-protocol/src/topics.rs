//! MQTT topic constants and builders

use core::fmt::Write;

use heapless::String;

use crate::payload::Door;

/// Root of every topic the remote publishes or subscribes to
pub const TOPIC_ROOT: &str = "home/m5stack/core2";

/// Fridge door sensor state, `OPEN` | `CLOSED`
pub const FRIDGE_STATUS_TOPIC: &str = "home/m5stack/core2/fridge_door/status";

/// Freezer door sensor state, `OPEN` | `CLOSED`
pub const FREEZER_STATUS_TOPIC: &str = "home/m5stack/core2/freezer_door/status";

/// Scene activation, payload is the scene name verbatim
pub const SCENES_CONTROL_TOPIC: &str = "home/m5stack/core2/scenes/control";

/// Longest topic the remote ever builds or matches
pub const MAX_TOPIC_LEN: usize = 64;

/// Build the control topic for a device slug:
/// `home/m5stack/core2/devices/<slug>/control`
pub fn device_control_topic(slug: &str) -> String<MAX_TOPIC_LEN> {
    let mut topic = String::new();
    let _ = write!(topic, "{}/devices/{}/control", TOPIC_ROOT, slug);
    topic
}

/// Identify which door sensor a status topic belongs to.
///
/// Exact match only; no wildcard or prefix logic.
pub fn door_for_topic(topic: &str) -> Option<Door> {
    match topic {
        FRIDGE_STATUS_TOPIC => Some(Door::Fridge),
        FREEZER_STATUS_TOPIC => Some(Door::Freezer),
        _ => None,
    }
}
