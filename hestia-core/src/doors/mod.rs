//! Door sensor tracking and the alert rule

pub mod monitor;

pub use monitor::{DoorMonitor, FREEZER_ALERT, FRIDGE_ALERT};
